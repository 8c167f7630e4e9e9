//! Escaped/quoted string literal matching.
//!
//! A [`StringDialect`] describes one literal-matching terminal instance: its
//! start/end quote pairs (multi-character delimiters supported, longest tried
//! first), raw prefixes that disable escape decoding (`r'...'`, `@"..."`),
//! the escape marker and which escape families it enables, delimiter doubling,
//! multi-line policy, and an optional one-character type suffix.
//!
//! Dialect presets ([`StringDialect::python`], [`StringDialect::csharp`],
//! [`StringDialect::vb`], ...) are parameterizations of the same algorithm,
//! not separate code paths.

use super::{MatchOutcome, TerminalMatcher, TokenMatch};
use crate::diagnostics::LexicalError;
use crate::scanner::TokenValue;
use quipu_core::SourceStream;

/// Maximum digits consumed by a `\x` escape.
const MAX_HEX_DIGITS: usize = 4;
/// Maximum digits consumed by an octal escape.
const MAX_OCTAL_DIGITS: usize = 3;

/// One start/end delimiter pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotePair {
    pub start: String,
    pub end: String,
    /// Raw line breaks are allowed in the body (triple-quote style).
    pub multi_line: bool,
}

/// A prefix that turns the literal raw: escape decoding is disabled for the
/// whole body. The prefix can grant doubling and multi-line on top of the
/// dialect's own settings (`@"..."` verbatim style).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPrefix {
    pub text: String,
    pub doubling: bool,
    pub multi_line: bool,
}

/// Which escape families the marker enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeFlags {
    /// `\a \b \t \n \v \f \r`, the escaped quote, and the escaped marker.
    pub simple: bool,
    /// `\x` followed by one to four hex digits, greedy.
    pub hex: bool,
    /// `\u` (exactly four hex digits) and `\U` (exactly eight).
    pub unicode: bool,
    /// One to three octal digits, greedy; the digit after a complete escape
    /// is never folded in.
    pub octal: bool,
}

impl EscapeFlags {
    pub fn all() -> Self {
        Self {
            simple: true,
            hex: true,
            unicode: true,
            octal: true,
        }
    }
}

/// Configuration of one quoted-string terminal.
#[derive(Debug, Clone)]
pub struct StringDialect {
    pairs: Vec<QuotePair>,
    prefixes: Vec<RawPrefix>,
    escape_marker: Option<char>,
    escapes: EscapeFlags,
    doubling: bool,
    char_suffixes: Vec<char>,
    char_literal: bool,
}

impl Default for StringDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl StringDialect {
    pub fn new() -> Self {
        Self {
            pairs: Vec::new(),
            prefixes: Vec::new(),
            escape_marker: None,
            escapes: EscapeFlags {
                simple: false,
                hex: false,
                unicode: false,
                octal: false,
            },
            doubling: false,
            char_suffixes: Vec::new(),
            char_literal: false,
        }
    }

    /// Add a single-line quote with identical start and end delimiters.
    pub fn quote(mut self, delimiter: &str) -> Self {
        self.pairs.push(QuotePair {
            start: delimiter.to_string(),
            end: delimiter.to_string(),
            multi_line: false,
        });
        self
    }

    /// Add a multi-line quote (triple-quote style).
    pub fn multi_line_quote(mut self, delimiter: &str) -> Self {
        self.pairs.push(QuotePair {
            start: delimiter.to_string(),
            end: delimiter.to_string(),
            multi_line: true,
        });
        self
    }

    /// Add a pair with distinct start and end delimiters.
    pub fn quote_pair(mut self, start: &str, end: &str, multi_line: bool) -> Self {
        self.pairs.push(QuotePair {
            start: start.to_string(),
            end: end.to_string(),
            multi_line,
        });
        self
    }

    /// Enable escape decoding with the given marker and all escape families.
    pub fn escape_marker(mut self, marker: char) -> Self {
        self.escape_marker = Some(marker);
        self.escapes = EscapeFlags::all();
        self
    }

    /// Restrict which escape families the marker enables.
    pub fn escape_flags(mut self, flags: EscapeFlags) -> Self {
        self.escapes = flags;
        self
    }

    /// Two consecutive end delimiters in the body denote one literal copy.
    pub fn doubling(mut self) -> Self {
        self.doubling = true;
        self
    }

    /// Add a raw prefix (`r'...'` style): escapes are left undecoded.
    pub fn raw_prefix(mut self, text: &str) -> Self {
        self.prefixes.push(RawPrefix {
            text: text.to_string(),
            doubling: false,
            multi_line: false,
        });
        self
    }

    /// Add a verbatim prefix (`@"..."` style): raw, with doubling and
    /// embedded line breaks allowed.
    pub fn verbatim_prefix(mut self, text: &str) -> Self {
        self.prefixes.push(RawPrefix {
            text: text.to_string(),
            doubling: true,
            multi_line: true,
        });
        self
    }

    /// Recognize a one-character type suffix after the closing delimiter
    /// (compared ASCII case-insensitively) marking the literal as a character.
    pub fn char_suffix(mut self, suffix: char) -> Self {
        self.char_suffixes.push(suffix);
        self
    }

    /// The delimiters themselves denote a character literal; the decoded body
    /// must be exactly one character.
    pub fn char_literal(mut self) -> Self {
        self.char_literal = true;
        self
    }

    // ========================================================================
    // Presets
    // ========================================================================

    /// Python-style strings: `'`/`"` plus triple-quote multi-line variants,
    /// backslash escapes, `r`/`R` raw prefixes.
    pub fn python() -> Self {
        Self::new()
            .multi_line_quote("'''")
            .multi_line_quote("\"\"\"")
            .quote("'")
            .quote("\"")
            .escape_marker('\\')
            .raw_prefix("r")
            .raw_prefix("R")
    }

    /// C#-style strings: `"` with backslash escapes (hex, unicode, octal) and
    /// the `@"..."` verbatim variant with doubled quotes and line breaks.
    pub fn csharp() -> Self {
        Self::new().quote("\"").escape_marker('\\').verbatim_prefix("@")
    }

    /// C#-style character literal: `'x'` with escapes, body of exactly one
    /// character, no verbatim prefix.
    pub fn csharp_char() -> Self {
        Self::new().quote("'").escape_marker('\\').char_literal()
    }

    /// VB-style strings: `"` with doubled-quote escaping only (no escape
    /// marker) and an optional `c` character suffix.
    pub fn vb() -> Self {
        Self::new().quote("\"").doubling().char_suffix('c')
    }
}

/// The compiled quoted-string matcher.
#[derive(Debug, Clone)]
pub struct StringMatcher {
    dialect: StringDialect,
}

impl StringMatcher {
    pub fn new(mut dialect: StringDialect) -> Self {
        // A triple-quote delimiter must be tried before its single-quote
        // prefix, and the longest raw prefix before shorter ones.
        dialect.pairs.sort_by(|a, b| b.start.len().cmp(&a.start.len()));
        dialect.prefixes.sort_by(|a, b| b.text.len().cmp(&a.text.len()));
        Self { dialect }
    }

    /// Prefix strings for the scanner's first-character index.
    pub fn firsts(&self) -> Vec<String> {
        let mut firsts: Vec<String> = self.dialect.pairs.iter().map(|p| p.start.clone()).collect();
        firsts.extend(self.dialect.prefixes.iter().map(|p| p.text.clone()));
        firsts
    }

    fn find_pair(&self, text: &str) -> Option<&QuotePair> {
        self.dialect.pairs.iter().find(|p| text.starts_with(&p.start))
    }

    fn is_quote_char(&self, c: char) -> bool {
        self.dialect
            .pairs
            .iter()
            .any(|p| p.start.starts_with(c) || p.end.starts_with(c))
    }

    /// Decode one escape sequence. `tail` starts just after the marker.
    ///
    /// Returns the bytes consumed after the marker and the decoded character;
    /// `None` means the escape produced no output (line continuation).
    fn decode_escape(&self, tail: &str) -> Result<(usize, Option<char>), LexicalError> {
        let flags = &self.dialect.escapes;
        let Some(c) = tail.chars().next() else {
            // marker at end of input; the literal is unterminated either way
            return Err(LexicalError::UnterminatedString);
        };
        // Line continuation: an escaped literal line break is deleted from the
        // output, not decoded as a control character.
        if c == '\n' {
            return Ok((1, None));
        }
        if c == '\r' {
            let consumed = if tail[1..].starts_with('\n') { 2 } else { 1 };
            return Ok((consumed, None));
        }
        if Some(c) == self.dialect.escape_marker {
            return Ok((c.len_utf8(), Some(c)));
        }
        if self.is_quote_char(c) {
            return Ok((c.len_utf8(), Some(c)));
        }
        if flags.hex && c == 'x' {
            return self.decode_digits(&tail[1..], 1, MAX_HEX_DIGITS, 16).map(|(n, ch)| (1 + n, Some(ch)));
        }
        if flags.unicode && c == 'u' {
            return self.decode_digits(&tail[1..], 4, 4, 16).map(|(n, ch)| (1 + n, Some(ch)));
        }
        if flags.unicode && c == 'U' {
            return self.decode_digits(&tail[1..], 8, 8, 16).map(|(n, ch)| (1 + n, Some(ch)));
        }
        if flags.octal && c.is_digit(8) {
            // the first digit is part of the escape
            return self.decode_digits(tail, 1, MAX_OCTAL_DIGITS, 8).map(|(n, ch)| (n, Some(ch)));
        }
        if flags.simple {
            let decoded = match c {
                'a' => Some('\u{07}'),
                'b' => Some('\u{08}'),
                't' => Some('\t'),
                'n' => Some('\n'),
                'v' => Some('\u{0B}'),
                'f' => Some('\u{0C}'),
                'r' => Some('\r'),
                _ => None,
            };
            if let Some(ch) = decoded {
                return Ok((c.len_utf8(), Some(ch)));
            }
        }
        Err(LexicalError::InvalidEscape(c))
    }

    /// Consume `min..=max` digits in `radix`, greedily, stopping early at the
    /// first non-digit. Digits beyond a complete escape are never folded in.
    fn decode_digits(
        &self,
        tail: &str,
        min: usize,
        max: usize,
        radix: u32,
    ) -> Result<(usize, char), LexicalError> {
        let mut value: u32 = 0;
        let mut count = 0;
        for c in tail.chars() {
            match c.to_digit(radix) {
                Some(d) if count < max => {
                    value = value * radix + d;
                    count += 1;
                }
                _ => break,
            }
        }
        if count == 0 && min <= 1 {
            return Err(LexicalError::MissingEscapeDigits);
        }
        if count < min {
            return Err(LexicalError::EscapeDigits {
                expected: min,
                found: count,
            });
        }
        let ch = char::from_u32(value).ok_or(LexicalError::InvalidCodepoint(value))?;
        Ok((count, ch))
    }
}

impl TerminalMatcher for StringMatcher {
    fn try_match(&self, source: &SourceStream<'_>) -> MatchOutcome {
        let rest = source.rest();

        // 1. Optional raw prefix, which must be followed by a quote start.
        let mut prefix: Option<&RawPrefix> = None;
        let mut offset = 0;
        for p in &self.dialect.prefixes {
            if rest.starts_with(&p.text) && self.find_pair(&rest[p.text.len()..]).is_some() {
                prefix = Some(p);
                offset = p.text.len();
                break;
            }
        }

        // 2. Start delimiter, longest first.
        let Some(pair) = self.find_pair(&rest[offset..]) else {
            return MatchOutcome::NoMatch;
        };
        let body_start = offset + pair.start.len();
        let body = &rest[body_start..];

        let escapes_active = prefix.is_none() && self.dialect.escape_marker.is_some();
        let doubling = self.dialect.doubling || prefix.is_some_and(|p| p.doubling);
        let multi_line = pair.multi_line || prefix.is_some_and(|p| p.multi_line);

        // Body errors consume through the end of the current line so the
        // scanner resumes on sane input.
        let error_region = |at: usize| {
            let line_end = rest[at..].find('\n').map(|i| at + i).unwrap_or(rest.len());
            line_end.max(1)
        };

        // 3. Scan the body.
        let mut out = String::new();
        let mut i = 0;
        let closed = loop {
            let tail = &body[i..];
            if tail.is_empty() {
                // End of input before the end delimiter, including a lone
                // start delimiter as the last character of input.
                return MatchOutcome::Error {
                    error: LexicalError::UnterminatedString,
                    length: rest.len().max(1),
                };
            }
            if tail.starts_with(&pair.end) {
                if doubling && tail[pair.end.len()..].starts_with(&pair.end) {
                    out.push_str(&pair.end);
                    i += pair.end.len() * 2;
                    continue;
                }
                i += pair.end.len();
                break body_start + i;
            }
            let c = tail.chars().next().expect("INVARIANT: tail is non-empty");
            if escapes_active && Some(c) == self.dialect.escape_marker {
                match self.decode_escape(&tail[c.len_utf8()..]) {
                    Ok((consumed, decoded)) => {
                        if let Some(ch) = decoded {
                            out.push(ch);
                        }
                        i += c.len_utf8() + consumed;
                        continue;
                    }
                    Err(error) => {
                        return MatchOutcome::Error {
                            error,
                            length: error_region(body_start + i),
                        };
                    }
                }
            }
            if c == '\n' && !multi_line {
                return MatchOutcome::Error {
                    error: LexicalError::UnterminatedString,
                    length: error_region(body_start + i),
                };
            }
            out.push(c);
            i += c.len_utf8();
        };

        // 4. Optional type suffix after the closing delimiter.
        let mut total = closed;
        let mut as_char = self.dialect.char_literal;
        if let Some(c) = rest[total..].chars().next() {
            if self
                .dialect
                .char_suffixes
                .iter()
                .any(|s| s.eq_ignore_ascii_case(&c))
            {
                as_char = true;
                total += c.len_utf8();
            }
        }

        let value = if as_char {
            let mut chars = out.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => TokenValue::Char(ch),
                _ => {
                    return MatchOutcome::Error {
                        error: LexicalError::BadCharLiteral(out.chars().count()),
                        length: total,
                    };
                }
            }
        } else {
            TokenValue::Text(out)
        };

        MatchOutcome::Match(TokenMatch { length: total, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_match(dialect: StringDialect, input: &str) -> MatchOutcome {
        StringMatcher::new(dialect).try_match(&SourceStream::new(input))
    }

    fn text(dialect: StringDialect, input: &str) -> String {
        match try_match(dialect, input) {
            MatchOutcome::Match(TokenMatch {
                value: TokenValue::Text(s),
                ..
            }) => s,
            other => panic!("expected a string match, got {other:?}"),
        }
    }

    fn ch(dialect: StringDialect, input: &str) -> char {
        match try_match(dialect, input) {
            MatchOutcome::Match(TokenMatch {
                value: TokenValue::Char(c),
                ..
            }) => c,
            other => panic!("expected a char match, got {other:?}"),
        }
    }

    fn error(dialect: StringDialect, input: &str) -> LexicalError {
        match try_match(dialect, input) {
            MatchOutcome::Error { error, .. } => error,
            other => panic!("expected a match error, got {other:?}"),
        }
    }

    // ========================================================================
    // Python-style dialect
    // ========================================================================

    #[test]
    fn python_simple_escapes() {
        assert_eq!(
            text(StringDialect::python(), r"'00\a\b\t\n\v\f\r\'\\00'  "),
            "00\u{7}\u{8}\t\n\u{b}\u{c}\r'\\00"
        );
    }

    #[test]
    fn python_raw_line_break_is_an_error() {
        assert_eq!(
            error(StringDialect::python(), "'abcd\nefg'  "),
            LexicalError::UnterminatedString
        );
    }

    #[test]
    fn python_triple_quote_allows_line_breaks() {
        assert_eq!(text(StringDialect::python(), "'''abcd\nefg'''  "), "abcd\nefg");
    }

    #[test]
    fn python_escaped_line_break_is_deleted() {
        assert_eq!(text(StringDialect::python(), "'abcd\\\nefg'  "), "abcdefg");
        assert_eq!(text(StringDialect::python(), "'''abcd\\\nefg'''  "), "abcdefg");
    }

    #[test]
    fn python_raw_prefix_disables_escapes() {
        assert_eq!(
            text(StringDialect::python(), r"r'00\a\b\t\n\v\f\r00'  "),
            r"00\a\b\t\n\v\f\r00"
        );
    }

    #[test]
    fn python_unrecognized_escape_is_an_error() {
        assert_eq!(error(StringDialect::python(), r"'ab\qcd'"), LexicalError::InvalidEscape('q'));
    }

    #[test]
    fn quote_just_before_end_of_input_is_an_error() {
        assert_eq!(error(StringDialect::python(), "'"), LexicalError::UnterminatedString);
    }

    #[test]
    fn empty_string_is_fine() {
        assert_eq!(text(StringDialect::python(), "''"), "");
    }

    // ========================================================================
    // C#-style dialect
    // ========================================================================

    #[test]
    fn csharp_double_escape_at_end_of_string() {
        assert_eq!(text(StringDialect::csharp(), "\"abcd\\\\\"  "), "abcd\\");
    }

    #[test]
    fn csharp_escaped_marker_then_escaped_quote() {
        assert_eq!(text(StringDialect::csharp(), "\"abcd\\\\\\\"efg\"  "), "abcd\\\"efg");
    }

    #[test]
    fn csharp_verbatim_prefix_disables_escapes() {
        assert_eq!(
            text(StringDialect::csharp(), "@\"00\\a\\b\\t\\n\\v\\f\\r00\"  "),
            r"00\a\b\t\n\v\f\r00"
        );
    }

    #[test]
    fn csharp_verbatim_allows_line_breaks() {
        assert_eq!(text(StringDialect::csharp(), "@\"abc\ndef\"  "), "abc\ndef");
    }

    #[test]
    fn csharp_verbatim_doubles_quotes() {
        assert_eq!(text(StringDialect::csharp(), "@\"say \"\"hi\"\"\""), "say \"hi\"");
    }

    #[test]
    fn csharp_unicode_escapes() {
        assert_eq!(text(StringDialect::csharp(), "\"abc\\u0040def\"  "), "abc@def");
        assert_eq!(text(StringDialect::csharp(), "\"abc\\U00000040def\"  "), "abc@def");
    }

    #[test]
    fn csharp_unicode_escape_with_too_few_digits_is_an_error() {
        assert_eq!(
            error(StringDialect::csharp(), "\"abc\\u004\"  "),
            LexicalError::EscapeDigits {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn csharp_hex_escapes_consume_up_to_four_digits() {
        assert_eq!(text(StringDialect::csharp(), "\"abc\\x0040xyz\"  "), "abc@xyz");
        assert_eq!(text(StringDialect::csharp(), "\"abc\\x040xyz\"  "), "abc@xyz");
        assert_eq!(text(StringDialect::csharp(), "\"abc\\x40xyz\"  "), "abc@xyz");
    }

    #[test]
    fn csharp_octal_escapes_stop_after_three_digits() {
        // the trailing "1" is appended unconsumed
        assert_eq!(text(StringDialect::csharp(), "\"abc\\0601xyz\"  "), "abc01xyz");
        assert_eq!(text(StringDialect::csharp(), "\"abc\\060xyz\"  "), "abc0xyz");
        assert_eq!(text(StringDialect::csharp(), "\"abc\\60xyz\"  "), "abc0xyz");
        assert_eq!(text(StringDialect::csharp(), "\"abc\\0xyz\"  "), "abc\0xyz");
    }

    #[test]
    fn csharp_char_literals() {
        assert_eq!(ch(StringDialect::csharp_char(), "'a'  "), 'a');
        assert_eq!(ch(StringDialect::csharp_char(), r"'\n'  "), '\n');
        assert_eq!(
            error(StringDialect::csharp_char(), "''  "),
            LexicalError::BadCharLiteral(0)
        );
        assert_eq!(
            error(StringDialect::csharp_char(), "'abc'  "),
            LexicalError::BadCharLiteral(3)
        );
    }

    // ========================================================================
    // VB-style dialect (doubling only, no escape marker)
    // ========================================================================

    #[test]
    fn vb_backslashes_stay_literal() {
        assert_eq!(
            text(StringDialect::vb(), "\"00\\a\\b\\t\\n\\v\\f\\r\\\\00\"  "),
            r"00\a\b\t\n\v\f\r\\00"
        );
    }

    #[test]
    fn vb_line_break_is_an_error() {
        assert_eq!(error(StringDialect::vb(), "\"abcd\nefg\"  "), LexicalError::UnterminatedString);
    }

    #[test]
    fn vb_doubled_quote_decodes_to_one_quote() {
        assert_eq!(text(StringDialect::vb(), "\"abcd\"\"efg\"  "), "abcd\"efg");
    }

    #[test]
    fn vb_char_suffix() {
        assert_eq!(ch(StringDialect::vb(), "\"A\"c  "), 'A');
        assert_eq!(error(StringDialect::vb(), "\"\"c  "), LexicalError::BadCharLiteral(0));
        assert_eq!(error(StringDialect::vb(), "\"ab\"C  "), LexicalError::BadCharLiteral(2));
    }

    // ========================================================================
    // Delimiter selection
    // ========================================================================

    #[test]
    fn longest_start_delimiter_wins() {
        // '''' must not be parsed as the empty string '' followed by ''
        assert_eq!(
            error(StringDialect::python(), "''''"),
            LexicalError::UnterminatedString
        );
        assert_eq!(text(StringDialect::python(), "''''''"), "");
    }

    #[test]
    fn distinct_start_and_end_delimiters() {
        let dialect = StringDialect::new().quote_pair("<<", ">>", false);
        assert_eq!(text(dialect, "<<hello>> rest"), "hello");
    }

    #[test]
    fn match_length_covers_prefix_and_suffix() {
        let outcome = try_match(StringDialect::python(), "r'ab' tail");
        assert_eq!(
            outcome,
            MatchOutcome::Match(TokenMatch {
                length: 5,
                value: TokenValue::Text("ab".to_string())
            })
        );
    }
}
