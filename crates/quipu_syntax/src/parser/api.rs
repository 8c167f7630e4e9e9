/// Parse `source` against a built table with the default tree factory.
///
/// This is the main public entrypoint for parsing.
///
/// ## Notes
/// - A recovered parse yields a tree plus a non-empty `errors` list; callers
///   must check [`ParseOutcome::is_clean`] rather than only the tree.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse(table: &ParserTable, source: &str) -> ParseOutcome {
    parse_with(table, source, &mut TreeFactory)
}

/// Parse with a host-supplied node factory.
///
/// The factory is invoked on every reduction (except transient arity-1
/// promotions) with the production identity and child values; an error from
/// it aborts the parse as a node-construction failure.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_with(table: &ParserTable, source: &str, factory: &mut dyn NodeFactory) -> ParseOutcome {
    Parser::new(table, source).run(factory)
}
