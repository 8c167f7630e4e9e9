/// The shift-reduce drive loop.
///
/// Every iteration either shifts a token or reduces; both are bounded by the
/// remaining input and the grammar, so the loop terminates on any finite
/// token stream. A no-progress guard enforces the bound against degenerate
/// (cyclic) grammars whose tables survived conflict resolution.
impl<'t, 'src> Parser<'t, 'src> {
    /// Run the parse to completion.
    pub fn run(mut self, factory: &mut dyn NodeFactory) -> ParseOutcome {
        // Reduces between two shifts are bounded by stack depth × grammar
        // size; past that the table is looping without consuming input.
        let mut quiet_reduces = 0usize;
        let mut high_water = self.stack.len();

        loop {
            let (terminal, is_error) = {
                let token = self.peek();
                (token.terminal, token.is_error())
            };

            if is_error {
                self.report_lexical_error();
                if !self.recover() {
                    break;
                }
                continue;
            }

            match self.table.action(self.state(), terminal) {
                Some(Action::Shift(target)) => {
                    quiet_reduces = 0;
                    let token = self.take();
                    let span = token.span;
                    self.stack.push(StackEntry {
                        state: target,
                        value: Some(ParseValue::Token(token)),
                        span,
                    });
                    high_water = self.stack.len();
                }
                Some(Action::Reduce(production)) => {
                    high_water = high_water.max(self.stack.len());
                    quiet_reduces += 1;
                    let bound =
                        (high_water + 1) * (self.table.grammar().production_count() + 1);
                    if quiet_reduces > bound {
                        self.report_no_progress();
                        break;
                    }
                    if let Err(fatal) = self.reduce(production, factory) {
                        return self.outcome(None, Some(fatal));
                    }
                }
                Some(Action::Accept) => {
                    let tree = self.stack.pop().and_then(|entry| entry.value);
                    return self.outcome(tree, None);
                }
                None => {
                    self.report_unexpected();
                    if !self.recover() {
                        break;
                    }
                }
            }
        }

        // Recovery failed: report whatever was accumulated, no tree.
        self.outcome(None, None)
    }

    /// Pop one production's worth of values, build the node, push the goto
    /// state.
    fn reduce(
        &mut self,
        production: ProductionId,
        factory: &mut dyn NodeFactory,
    ) -> Result<(), FatalParseError> {
        let table = self.table;
        let grammar = table.grammar();
        let arity = grammar.production(production).arity();
        let head = grammar.production(production).head;

        debug_assert!(self.stack.len() > arity, "reduce past the start entry");
        let tail = self.stack.split_off(self.stack.len() - arity);

        let span = tail
            .iter()
            .map(|entry| entry.span)
            .reduce(Span::merge)
            .unwrap_or_else(|| {
                // Empty production: a zero-width span at the lookahead.
                let at = self.lookahead.as_ref().map_or(0, |t| t.span.start);
                Span::new(at, at)
            });

        // Punctuation tokens are parsed but elided from the tree.
        let mut children: Vec<ParseValue> = tail
            .into_iter()
            .filter_map(|entry| entry.value)
            .filter(|value| {
                !matches!(
                    value,
                    ParseValue::Token(t) if t.category == TokenCategory::Punctuation
                )
            })
            .collect();

        let value = if grammar.nonterminal(head).transient && children.len() == 1 {
            // Transient non-terminal: promote the single child, skip the
            // factory, avoid a needless tree layer.
            children
                .pop()
                .expect("INVARIANT: length was just checked")
        } else {
            let reduction = Reduction {
                grammar,
                source: self.source,
                production,
                node_kind: grammar.production(production).node_kind,
                span,
            };
            factory
                .build(&reduction, children)
                .map_err(|error| FatalParseError::NodeConstruction {
                    production: grammar.production_display(production),
                    message: error.message,
                })?
        };

        let below = self.state();
        let target = table
            .goto(below, head)
            .expect("INVARIANT: a converged table has a goto for every reduced non-terminal");
        self.stack.push(StackEntry {
            state: target,
            value: Some(value),
            span,
        });
        Ok(())
    }

    fn expected_names(&self) -> Vec<String> {
        let table = self.table;
        table
            .expected_terminals(self.state())
            .into_iter()
            .map(|t| table.grammar().terminal(t).name.clone())
            .collect()
    }

    fn report_unexpected(&mut self) {
        let expected = self.expected_names();
        let source = self.source;
        let token = self.peek();
        let span = token.span;
        let message = if span.is_empty() {
            "Unexpected end of input".to_string()
        } else {
            format!("Unexpected token: {}", token.text(source))
        };
        self.errors.push(
            SyntaxError::new(message, span, location_at(source, span.start)).with_expected(expected),
        );
    }

    /// A lexical error token: the scanner already rendered the cause into the
    /// token's value.
    fn report_lexical_error(&mut self) {
        let source = self.source;
        let token = self.peek();
        let span = token.span;
        let message = token
            .value
            .as_text()
            .unwrap_or("invalid token")
            .to_string();
        self.errors
            .push(SyntaxError::new(message, span, location_at(source, span.start)));
    }

    fn report_no_progress(&mut self) {
        let source = self.source;
        let at = self.peek().span.start;
        self.errors.push(SyntaxError::new(
            "Parser made no progress; the grammar derives a cycle".to_string(),
            Span::new(at, at),
            location_at(source, at),
        ));
    }
}
