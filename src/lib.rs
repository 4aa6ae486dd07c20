//! json-tree - a small JSON document model with a parser and a printer.
//!
//! # Architecture
//!
//! - [`types`] - `Value` sum type, the immutable `Node` handle and `Document`
//! - [`limits`] - parser configuration
//! - [`reader`] - byte source with one byte of pushback
//! - [`parser`] - recursive descent parser
//! - [`printer`] - canonical text output
//! - [`error`] - parse and type-mismatch errors
//!
//! # Example
//!
//! ```
//! use json_tree::{load, print, Node};
//!
//! let doc = load(&br#"{"b": [1, 2.5], "a": "x\ny"}"#[..]).unwrap();
//! assert_eq!(doc.root().get("a").unwrap().as_str().unwrap(), "x\ny");
//! assert_eq!(doc.root().get("b").unwrap().get_index(1), Some(&Node::from(2.5)));
//!
//! let mut out = Vec::new();
//! print(&doc, &mut out).unwrap();
//! assert_eq!(out, br#"{"a" : "x\ny", "b" : [ 1, 2.5 ]}"#);
//! ```

// Library code reports failures through Result; tests are checked separately.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod error;
pub mod limits;
pub mod parser;
pub mod printer;
pub mod reader;
pub mod types;

// Re-export commonly used items
pub use error::{Error, ParseError, ParseResult, TypeMismatch};
pub use limits::Limits;
pub use parser::{load, load_str, load_with_limits, Parser};
pub use printer::{print, to_string, write_node};
pub use types::{Array, Document, Node, Object, Value};
