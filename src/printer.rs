//! Canonical JSON output.
//!
//! Printing is a pure function of the tree:
//!
//! - arrays print as `[ a, b ]`, objects as `{"k" : v, "k2" : v2}`
//! - object keys come out in sorted order
//! - strings escape `\n \r \" \\ \t` and emit everything else verbatim
//! - doubles use the shortest text that reads back to the same value, with
//!   a `.0` suffix when it would otherwise read back as an integer
//!
//! The only failure is an error from the sink itself.

use std::fmt;
use std::io;

use crate::types::{Document, Node, Object, Value};

/// Write a document to a byte stream.
pub fn print<W: io::Write>(doc: &Document, output: &mut W) -> io::Result<()> {
    tracing::trace!(kind = doc.root().type_name(), "printing document");
    write!(output, "{doc}")
}

/// Render a node to a new string.
pub fn to_string(node: &Node) -> String {
    node.to_string()
}

/// Serialize a node into any `fmt::Write` sink.
pub fn write_node<W: fmt::Write + ?Sized>(node: &Node, output: &mut W) -> fmt::Result {
    write_value(node.value(), output)
}

fn write_value<W: fmt::Write + ?Sized>(value: &Value, output: &mut W) -> fmt::Result {
    match value {
        Value::Null => output.write_str("null"),
        Value::Bool(true) => output.write_str("true"),
        Value::Bool(false) => output.write_str("false"),
        Value::Int(n) => write!(output, "{n}"),
        Value::Double(d) => write_double(*d, output),
        Value::String(s) => write_string(s, output),
        Value::Array(arr) => write_array(arr, output),
        Value::Object(obj) => write_object(obj, output),
    }
}

/// Serialize a double so it reads back as a double.
///
/// Non-finite values have no JSON form and print as `null`.
fn write_double<W: fmt::Write + ?Sized>(value: f64, output: &mut W) -> fmt::Result {
    if !value.is_finite() {
        return output.write_str("null");
    }
    let text = value.to_string();
    output.write_str(&text)?;
    if !text.contains(['.', 'e', 'E']) {
        output.write_str(".0")?;
    }
    Ok(())
}

/// Serialize a string with JSON escaping.
fn write_string<W: fmt::Write + ?Sized>(s: &str, output: &mut W) -> fmt::Result {
    output.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => output.write_str("\\\"")?,
            '\\' => output.write_str("\\\\")?,
            '\n' => output.write_str("\\n")?,
            '\r' => output.write_str("\\r")?,
            '\t' => output.write_str("\\t")?,
            c => output.write_char(c)?,
        }
    }
    output.write_char('"')
}

fn write_array<W: fmt::Write + ?Sized>(arr: &[Node], output: &mut W) -> fmt::Result {
    if arr.is_empty() {
        return output.write_str("[]");
    }
    output.write_str("[ ")?;
    for (i, node) in arr.iter().enumerate() {
        if i > 0 {
            output.write_str(", ")?;
        }
        write_node(node, output)?;
    }
    output.write_str(" ]")
}

fn write_object<W: fmt::Write + ?Sized>(obj: &Object, output: &mut W) -> fmt::Result {
    output.write_char('{')?;
    for (i, (key, node)) in obj.iter().enumerate() {
        if i > 0 {
            output.write_str(", ")?;
        }
        write_string(key, output)?;
        output.write_str(" : ")?;
        write_node(node, output)?;
    }
    output.write_char('}')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(self, f)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(self, f)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(self.root(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Array;

    #[test]
    fn test_primitives() {
        assert_eq!(to_string(&Node::null()), "null");
        assert_eq!(to_string(&Node::from(true)), "true");
        assert_eq!(to_string(&Node::from(false)), "false");
        assert_eq!(to_string(&Node::from(42)), "42");
        assert_eq!(to_string(&Node::from(-7)), "-7");
    }

    #[test]
    fn test_doubles() {
        assert_eq!(to_string(&Node::from(1.5)), "1.5");
        assert_eq!(to_string(&Node::from(3.0)), "3.0");
        assert_eq!(to_string(&Node::from(-0.25)), "-0.25");
        assert_eq!(to_string(&Node::from(1.5e10)), "15000000000.0");
        assert_eq!(to_string(&Node::from(f64::NAN)), "null");
        assert_eq!(to_string(&Node::from(f64::INFINITY)), "null");
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(to_string(&Node::from("hello")), "\"hello\"");
        assert_eq!(to_string(&Node::from("a\nb")), "\"a\\nb\"");
        assert_eq!(to_string(&Node::from("a\rb")), "\"a\\rb\"");
        assert_eq!(to_string(&Node::from("a\tb")), "\"a\\tb\"");
        assert_eq!(to_string(&Node::from("a\"b")), "\"a\\\"b\"");
        assert_eq!(to_string(&Node::from("a\\b")), "\"a\\\\b\"");
        // no unicode escaping
        assert_eq!(to_string(&Node::from("é/\u{1}")), "\"é/\u{1}\"");
    }

    #[test]
    fn test_array() {
        let arr = Node::from(vec![Node::from(1), Node::from(2), Node::from(3)]);
        assert_eq!(to_string(&arr), "[ 1, 2, 3 ]");
        assert_eq!(to_string(&Node::from(vec![Node::null()])), "[ null ]");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(to_string(&Node::from(Array::new())), "[]");
        assert_eq!(to_string(&Node::from(Object::new())), "{}");
    }

    #[test]
    fn test_object_keys_sorted() {
        let mut obj = Object::new();
        obj.insert("b".to_string(), Node::from(2));
        obj.insert("a".to_string(), Node::from(1));
        assert_eq!(to_string(&Node::from(obj)), r#"{"a" : 1, "b" : 2}"#);
    }

    #[test]
    fn test_object_key_escaped() {
        let node: Node = [("a\"b", Node::from(1))].into_iter().collect();
        assert_eq!(to_string(&node), r#"{"a\"b" : 1}"#);
    }

    #[test]
    fn test_nested() {
        let inner: Node = [("x", Node::from(1))].into_iter().collect();
        let outer: Node = [
            ("arr", Node::from(vec![Node::from(1.5), Node::from("s")])),
            ("obj", inner),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            to_string(&outer),
            r#"{"arr" : [ 1.5, "s" ], "obj" : {"x" : 1}}"#
        );
    }

    #[test]
    fn test_write_node_appends_to_sink() {
        let node = Node::from(vec![Node::from(1), Node::from("a")]);
        let mut out = String::from("root=");
        write_node(&node, &mut out).unwrap();
        assert_eq!(out, r#"root=[ 1, "a" ]"#);
        assert_eq!(to_string(&Node::from(2.0)), Node::from(2.0).to_string());
    }

    #[test]
    fn test_print_to_stream() {
        let doc = Document::new(Node::from(vec![Node::from(true)]));
        let mut out = Vec::new();
        print(&doc, &mut out).unwrap();
        assert_eq!(out, b"[ true ]");
        assert_eq!(doc.to_string(), "[ true ]");
    }
}
