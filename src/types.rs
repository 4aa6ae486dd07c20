//! JSON value model.
//!
//! A [`Node`] owns exactly one [`Value`] and, for arrays and objects, all of
//! its children. Trees are built once, by the parser or by a caller using the
//! `From` constructors, and are read-only afterwards.
//!
//! Equality is structural: variants must match and contents must be
//! recursively equal. `Int` and `Double` never compare equal to each other,
//! even when numerically identical, but [`Node::as_double`] widens an `Int`.

use std::collections::BTreeMap;

use crate::error::TypeMismatch;

/// Ordered sequence of nodes.
pub type Array = Vec<Node>;

/// String-keyed map of nodes, kept in key order.
pub type Object = BTreeMap<String, Node>;

/// One of the seven JSON value kinds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON `null`
    #[default]
    Null,
    /// JSON `true` / `false`
    Bool(bool),
    /// Integral number that fits in 32 bits
    Int(i32),
    /// Any other number
    Double(f64),
    /// Escape-decoded string
    String(String),
    /// Ordered list of values
    Array(Array),
    /// Key-sorted map of values
    Object(Object),
}

impl Value {
    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

/// Immutable handle to one JSON value and its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node(Value);

impl Node {
    /// Wrap a value.
    pub fn new(value: Value) -> Self {
        Node(value)
    }

    /// The `null` node.
    pub fn null() -> Self {
        Node(Value::Null)
    }

    /// Borrow the wrapped value.
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Unwrap into the owned value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns the type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self.0, Value::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self.0, Value::Bool(_))
    }

    /// Returns true if this is an `Int`.
    pub fn is_int(&self) -> bool {
        matches!(self.0, Value::Int(_))
    }

    /// True only for the `Double` variant.
    pub fn is_pure_double(&self) -> bool {
        matches!(self.0, Value::Double(_))
    }

    /// True for both `Int` and `Double`; see [`Node::as_double`].
    pub fn is_double(&self) -> bool {
        self.is_int() || self.is_pure_double()
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self.0, Value::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self.0, Value::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self.0, Value::Object(_))
    }

    /// Returns the boolean if this is a `Bool`.
    pub fn as_bool(&self) -> Result<bool, TypeMismatch> {
        match self.0 {
            Value::Bool(b) => Ok(b),
            _ => Err(self.mismatch("bool")),
        }
    }

    /// Returns the integer if this is an `Int`.
    pub fn as_int(&self) -> Result<i32, TypeMismatch> {
        match self.0 {
            Value::Int(n) => Ok(n),
            _ => Err(self.mismatch("int")),
        }
    }

    /// Returns the number as `f64`, widening an `Int`.
    pub fn as_double(&self) -> Result<f64, TypeMismatch> {
        match self.0 {
            Value::Double(d) => Ok(d),
            Value::Int(n) => Ok(f64::from(n)),
            _ => Err(self.mismatch("double")),
        }
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Result<&str, TypeMismatch> {
        self.as_string().map(String::as_str)
    }

    /// Returns a reference to the string if this is a `String`.
    pub fn as_string(&self) -> Result<&String, TypeMismatch> {
        match &self.0 {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch("string")),
        }
    }

    /// Returns a reference to the elements if this is an `Array`.
    pub fn as_array(&self) -> Result<&Array, TypeMismatch> {
        match &self.0 {
            Value::Array(a) => Ok(a),
            _ => Err(self.mismatch("array")),
        }
    }

    /// Returns a reference to the entries if this is an `Object`.
    pub fn as_object(&self) -> Result<&Object, TypeMismatch> {
        match &self.0 {
            Value::Object(o) => Ok(o),
            _ => Err(self.mismatch("object")),
        }
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match &self.0 {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&Node> {
        match &self.0 {
            Value::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    fn mismatch(&self, expected: &'static str) -> TypeMismatch {
        TypeMismatch {
            expected,
            found: self.type_name(),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node(value)
    }
}

impl From<()> for Node {
    fn from(_: ()) -> Self {
        Node(Value::Null)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node(Value::Bool(value))
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node(Value::Int(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node(Value::Double(value))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node(Value::String(value))
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node(Value::String(value.to_owned()))
    }
}

impl From<Array> for Node {
    fn from(value: Array) -> Self {
        Node(Value::Array(value))
    }
}

impl From<Object> for Node {
    fn from(value: Object) -> Self {
        Node(Value::Object(value))
    }
}

impl FromIterator<Node> for Node {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Node(Value::Array(iter.into_iter().collect()))
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        Node(Value::Object(
            iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }
}

/// The result of parsing one complete JSON text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Wrap a root node.
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Borrow the root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Unwrap into the root node.
    pub fn into_root(self) -> Node {
        self.root
    }
}

impl From<Node> for Document {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}
