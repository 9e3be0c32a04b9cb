//! Lenient HTML fragment parser.
//!
//! This crate turns an HTML fragment into a flat list of top-level [`Node`]s.
//! Tag and attribute names keep their source case, entities are left encoded,
//! and comments or directives survive as raw text nodes.

pub mod ast;
pub mod parser;

pub use ast::{Attributes, Node};
pub use parser::{parse, ParseError, MAX_DEPTH};
