//! Provide shared, pure source-text primitives for the quipu parsing toolkit.
//!
//! This crate is intentionally small and dependency-light. It contains deterministic helpers that both:
//! - the syntax layer can use while matching terminals and building tables, and
//! - host applications can use to map diagnostics back onto source text.
//!
//! ## Notes
//!
//! - This is a "source core" crate: **no IO**, no global state, and no grammar-specific types.
//! - Current scope: byte-offset spans, line/column locations, the [`SourceStream`] cursor,
//!   and ASCII case folding for case-insensitive grammars.

pub mod source;

pub use source::{location_at, Location, SourceStream, Span};

/// Check whether `text` begins with `prefix`, optionally ignoring ASCII case.
///
/// ## Notes
/// - Case folding is ASCII-only. Grammar keywords and delimiters are ASCII in
///   practice; non-ASCII text always compares byte-for-byte.
pub fn starts_with_folded(text: &str, prefix: &str, ignore_case: bool) -> bool {
    if !ignore_case {
        return text.starts_with(prefix);
    }
    match text.get(..prefix.len()) {
        Some(head) => head.eq_ignore_ascii_case(prefix),
        None => false,
    }
}
