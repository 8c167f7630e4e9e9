/// Panic-mode error recovery.
///
/// Modelled as an explicit bounded search, not control flow: walk the stack
/// for a state with an error-shift transition, shift a synthesized error
/// token, then discard input tokens until one has an action again. Recovery
/// fails (and the parse ends) when no recovery state exists or input runs
/// out first.
impl<'t, 'src> Parser<'t, 'src> {
    /// Attempt recovery after a syntax error. Returns `false` when the parse
    /// cannot continue; the caller then returns the accumulated errors.
    fn recover(&mut self) -> bool {
        let table = self.table;
        let eof = table.grammar().eof();
        let error_terminal = table.grammar().error_terminal();

        // If the same position triggers recovery twice the previous attempt
        // made no progress; discard the offending token before trying again.
        let at = self.peek().span.start;
        if self.last_recovery_at == Some(at) {
            let token = self.take();
            if token.terminal == eof {
                return false;
            }
        }
        self.last_recovery_at = Some(at);

        // Deepest-first would over-discard; take the topmost recovery state.
        let Some(anchor) = self
            .stack
            .iter()
            .rposition(|entry| table.error_shift_target(entry.state).is_some())
        else {
            return false;
        };

        let discard_from = self.peek().span.start;
        self.stack.truncate(anchor + 1);
        let target = table
            .error_shift_target(self.state())
            .expect("INVARIANT: the anchor state was just found by this predicate");

        // Shift a synthesized error token so error productions can reduce
        // over the damaged region.
        let error_span = Span::new(discard_from, discard_from);
        self.stack.push(StackEntry {
            state: target,
            value: Some(ParseValue::Token(Token::new(
                error_terminal,
                error_span,
                TokenCategory::Error,
                TokenValue::None,
            ))),
            span: error_span,
        });

        // Discard input until something is shiftable/reducible again.
        let mut discarded = 0usize;
        loop {
            let terminal = self.peek().terminal;
            if self.table.action(target, terminal).is_some() {
                break;
            }
            if terminal == eof {
                self.record_discard(discard_from, discarded);
                return false;
            }
            self.take();
            discarded += 1;
        }
        self.record_discard(discard_from, discarded);
        true
    }

    fn record_discard(&mut self, from: usize, tokens: usize) {
        let to = self
            .lookahead
            .as_ref()
            .map_or(from, |t| t.span.start)
            .max(from);
        self.diagnostics.push(Diagnostic::info(DiagnosticKind::DiscardedRegion {
            span: Span::new(from, to),
            tokens,
        }));
    }
}
