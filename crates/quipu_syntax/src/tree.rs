//! Parse-tree values and the node-construction seam.
//!
//! On every reduction the engine hands the host's [`NodeFactory`] the
//! production identity (with its opaque `node_kind` hint) and the child
//! values, and pushes whatever single value the factory returns. The default
//! [`TreeFactory`] builds a generic [`TreeNode`]; hosts that want their own
//! AST return [`ParseValue::Custom`] values instead.

use crate::grammar::{Grammar, NonTerminalId, ProductionId};
use crate::scanner::Token;
use quipu_core::Span;
use std::any::Any;
use std::fmt;

/// A value on the parse stack: a shifted token, a reduced node, or whatever
/// the host's factory produced.
pub enum ParseValue {
    Token(Token),
    Node(TreeNode),
    Custom(Box<dyn Any + Send>),
}

impl ParseValue {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            ParseValue::Token(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&TreeNode> {
        match self {
            ParseValue::Node(n) => Some(n),
            _ => None,
        }
    }

    /// Render as an s-expression over the source text, for tests and debug
    /// output: tokens print their matched text, nodes print
    /// `(head child ...)`.
    pub fn sexpr(&self, grammar: &Grammar, source: &str) -> String {
        match self {
            ParseValue::Token(t) => t.text(source).to_string(),
            ParseValue::Node(n) => {
                let mut out = format!("({}", grammar.nonterminal(n.head).name);
                for child in &n.children {
                    out.push(' ');
                    out.push_str(&child.sexpr(grammar, source));
                }
                out.push(')');
                out
            }
            ParseValue::Custom(_) => "<custom>".to_string(),
        }
    }
}

impl fmt::Debug for ParseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseValue::Token(t) => f.debug_tuple("Token").field(t).finish(),
            ParseValue::Node(n) => f.debug_tuple("Node").field(n).finish(),
            ParseValue::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Generic parse-tree node produced by the default factory.
#[derive(Debug)]
pub struct TreeNode {
    pub production: ProductionId,
    pub head: NonTerminalId,
    /// The production's opaque node hint, for host dispatch.
    pub node_kind: Option<&'static str>,
    pub span: Span,
    pub children: Vec<ParseValue>,
}

/// Reduction context passed to the factory.
pub struct Reduction<'a> {
    pub grammar: &'a Grammar,
    /// The source text, so factories can read token spellings.
    pub source: &'a str,
    pub production: ProductionId,
    pub node_kind: Option<&'static str>,
    /// Merged span of the children (zero-width at the lookahead for an empty
    /// production).
    pub span: Span,
}

/// Error returned by a factory; aborts the parse as a node-construction
/// failure.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct NodeError {
    pub message: String,
}

impl NodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Host seam invoked on each reduction.
pub trait NodeFactory {
    fn build(&mut self, reduction: &Reduction<'_>, children: Vec<ParseValue>) -> Result<ParseValue, NodeError>;
}

/// Default factory: builds the generic [`TreeNode`] tree.
#[derive(Debug, Default)]
pub struct TreeFactory;

impl NodeFactory for TreeFactory {
    fn build(&mut self, reduction: &Reduction<'_>, children: Vec<ParseValue>) -> Result<ParseValue, NodeError> {
        let production = reduction.grammar.production(reduction.production);
        Ok(ParseValue::Node(TreeNode {
            production: reduction.production,
            head: production.head,
            node_kind: reduction.node_kind,
            span: reduction.span,
            children,
        }))
    }
}
