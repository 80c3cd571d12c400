//! Variable values and binding contexts.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Runtime value of a template variable.
///
/// Bindings are caller-owned and created per expansion or match; the engine
/// never retains them. Equality is structural, and key order of an
/// associative value is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Undefined (i.e. null).
    Undefined,
    /// String value.
    String(String),
    /// Ordered list of strings.
    List(Vec<String>),
    /// Associative array with unique keys. Iterated in key order, which
    /// makes expansion of associative values deterministic.
    Assoc(BTreeMap<String, String>),
}

impl Value {
    /// Builds a list value from an iterator of strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_template::Value;
    ///
    /// let list = Value::from_list(["red", "green", "blue"]);
    /// assert_eq!(list.list().len(), 3);
    /// ```
    pub fn from_list<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::List(iter.into_iter().map(Into::into).collect())
    }

    /// Builds an associative value from an iterator of key-value pairs.
    ///
    /// A later duplicate of a key overwrites the earlier entry.
    pub fn from_assoc<I, K, V>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Assoc(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns the type of the value.
    #[inline]
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Undefined => ValueType::Undefined,
            Self::String(_) => ValueType::String,
            Self::List(_) => ValueType::List,
            Self::Assoc(_) => ValueType::Assoc,
        }
    }

    /// Returns the string content.
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Value::String`]. Asking a value for the
    /// wrong representation is a programming error.
    #[must_use]
    pub fn string(&self) -> &str {
        match self {
            Self::String(s) => s,
            other => panic!("value is not a string: {:?}", other.value_type()),
        }
    }

    /// Returns the list content.
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Value::List`].
    #[must_use]
    pub fn list(&self) -> &[String] {
        match self {
            Self::List(items) => items,
            other => panic!("value is not a list: {:?}", other.value_type()),
        }
    }

    /// Returns the associative content.
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Value::Assoc`].
    #[must_use]
    pub fn assoc(&self) -> &BTreeMap<String, String> {
        match self {
            Self::Assoc(pairs) => pairs,
            other => panic!("value is not an associative array: {:?}", other.value_type()),
        }
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// Value type designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// The value is not defined.
    Undefined,
    /// A string.
    String,
    /// A list of strings.
    List,
    /// An associative array of strings.
    Assoc,
}

/// Variable bindings consumed by expansion and produced by matching.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Variable values, keyed by variable name.
    variables: BTreeMap<String, Value>,
}

impl Context {
    /// Creates a new empty context.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a binding, returning the previous value if any.
    ///
    /// Explicitly stored [`Value::Undefined`] entries are kept; the matcher
    /// uses them to report variables that did not take part in a match.
    /// Expansion treats a stored undefined the same as a missing entry.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.variables.insert(key.into(), value.into())
    }

    /// Returns the value bound to `name`.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Removes all bindings.
    #[inline]
    pub fn clear(&mut self) {
        self.variables.clear();
    }

    /// Returns the number of bindings.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns whether the context holds no bindings.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterates over bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        let string = Value::String("x".into());
        assert_eq!(string.value_type(), ValueType::String);
        assert_eq!(string.string(), "x");

        let list = Value::from_list(["a", "b"]);
        assert_eq!(list.value_type(), ValueType::List);
        assert_eq!(list.list(), ["a", "b"]);

        let assoc = Value::from_assoc([("k", "v")]);
        assert_eq!(assoc.value_type(), ValueType::Assoc);
        assert_eq!(assoc.assoc().get("k").map(String::as_str), Some("v"));

        assert_eq!(Value::Undefined.value_type(), ValueType::Undefined);
    }

    #[test]
    #[should_panic = "not a list"]
    fn string_is_not_a_list() {
        let _ = Value::String("x".into()).list();
    }

    #[test]
    #[should_panic = "not a string"]
    fn list_is_not_a_string() {
        let _ = Value::from_list(["a"]).string();
    }

    #[test]
    #[should_panic = "not an associative array"]
    fn undefined_is_not_an_assoc() {
        let _ = Value::Undefined.assoc();
    }

    #[test]
    fn assoc_equality_ignores_insertion_order() {
        let a = Value::from_assoc([("x", "1"), ("y", "2")]);
        let b = Value::from_assoc([("y", "2"), ("x", "1")]);
        assert_eq!(a, b);
    }

    #[test]
    fn context_basics() {
        let mut context = Context::new();
        assert!(context.is_empty());

        context.insert("var", "value");
        context.insert("list", Value::from_list(["a"]));
        context.insert("gone", Value::Undefined);

        assert_eq!(context.len(), 3);
        assert_eq!(context.get("var"), Some(&Value::String("value".into())));
        assert_eq!(context.get("gone"), Some(&Value::Undefined));
        assert_eq!(context.get("missing"), None);

        let names: Vec<&str> = context.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["gone", "list", "var"]);

        context.clear();
        assert!(context.is_empty());
    }
}
