/// Parser core types and entrypoint state.
///
/// This chunk defines the [`Parser`] type, its stack entries, and the
/// [`ParseOutcome`] returned to hosts. The drive loop lives in `engine.rs`,
/// panic-mode recovery in `recovery.rs`.

/// Result of one parse run.
///
/// ## Notes
/// - A recovered parse yields a tree **and** a non-empty error list; treat the
///   discarded regions in `diagnostics` as already reported, not as clean
///   input.
/// - A node-construction failure yields no tree and a single fatal error.
#[derive(Debug)]
pub struct ParseOutcome {
    pub tree: Option<ParseValue>,
    pub errors: Vec<SyntaxError>,
    /// Discarded-region records from error recovery.
    pub diagnostics: Vec<Diagnostic>,
    pub fatal: Option<FatalParseError>,
    /// Non-grammar tokens (whitespace, comments) the scanner recorded, in
    /// source order, for formatting and comment-preserving tools.
    pub skipped: Vec<Token>,
}

impl ParseOutcome {
    /// The parse succeeded with no errors of any kind.
    pub fn is_clean(&self) -> bool {
        self.tree.is_some() && self.errors.is_empty() && self.fatal.is_none()
    }
}

/// One stack slot: the automaton state plus the value and span that got here.
/// The bottom slot carries the start state and no value.
struct StackEntry {
    state: StateId,
    value: Option<ParseValue>,
    span: Span,
}

/// Parser state.
///
/// ## Notes
/// - The engine is single-pass and synchronous; it suspends only on pulling
///   the next token from the scanner.
/// - Errors are accumulated on the parser and returned in the outcome.
pub struct Parser<'t, 'src> {
    table: &'t ParserTable,
    scanner: Scanner<'t, 'src>,
    source: &'src str,
    stack: Vec<StackEntry>,
    lookahead: Option<Token>,
    errors: Vec<SyntaxError>,
    diagnostics: Vec<Diagnostic>,
    /// Position of the last recovery, to force progress if the same token
    /// triggers recovery twice.
    last_recovery_at: Option<usize>,
}

impl<'t, 'src> Parser<'t, 'src> {
    /// Create a parser for one run over `source`.
    pub fn new(table: &'t ParserTable, source: &'src str) -> Self {
        Self {
            table,
            scanner: Scanner::new(table.grammar(), source),
            source,
            stack: vec![StackEntry {
                state: 0,
                value: None,
                span: Span::new(0, 0),
            }],
            lookahead: None,
            errors: Vec::new(),
            diagnostics: Vec::new(),
            last_recovery_at: None,
        }
    }

    fn state(&self) -> StateId {
        self.stack
            .last()
            .expect("INVARIANT: the start entry is never popped")
            .state
    }

    /// Current token without consuming it.
    fn peek(&mut self) -> &Token {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.scanner.next_token());
        }
        self.lookahead
            .as_ref()
            .expect("INVARIANT: lookahead was just filled")
    }

    /// Consume and return the current token.
    fn take(&mut self) -> Token {
        self.peek();
        self.lookahead
            .take()
            .expect("INVARIANT: lookahead was just filled")
    }

    /// Assemble the outcome, draining what the run accumulated.
    fn outcome(mut self, tree: Option<ParseValue>, fatal: Option<FatalParseError>) -> ParseOutcome {
        ParseOutcome {
            tree,
            errors: std::mem::take(&mut self.errors),
            diagnostics: std::mem::take(&mut self.diagnostics),
            fatal,
            skipped: self.scanner.take_skipped(),
        }
    }
}
