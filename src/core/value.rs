//! Plain data values held in the state tree.
//!
//! Values are immutable. Lists and trees are reference counted, so cloning
//! a value shares it rather than copying it, and two clones of the same tree
//! are *identical* in the sense of [`Value::is_same`]. The combinator relies
//! on that identity to tell whether a reducer actually changed its slice.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// A dynamically typed, immutable piece of state.
///
/// `PartialEq` is deep structural equality. Use [`Value::is_same`] for the
/// identity comparison the combinator performs.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{StateTree, Value};
///
/// let todos = Value::from(vec![Value::from("write docs")]);
/// let tree = StateTree::new().with("todos", todos.clone());
///
/// // A clone shares the list, so it is the same value.
/// assert!(tree.get("todos").unwrap().is_same(&todos));
///
/// // An equal but separately built list is not.
/// let rebuilt = Value::from(vec![Value::from("write docs")]);
/// assert_eq!(rebuilt, todos);
/// assert!(!rebuilt.is_same(&todos));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(Arc<str>),
    List(Arc<Vec<Value>>),
    Tree(StateTree),
}

impl Value {
    /// Identity comparison.
    ///
    /// Scalars compare by value; lists and trees compare by reference, so a
    /// freshly built collection is never the same as an older one even when
    /// their contents are equal.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Tree(a), Value::Tree(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Name of the value's kind, as reported in shape warnings.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::List(_) => "Array",
            Value::Tree(_) => "Object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&StateTree> {
        match self {
            Value::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Deep copy into a `serde_json::Value`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.to_string()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Tree(tree) => serde_json::Value::Object(
                tree.iter()
                    .map(|(key, value)| (key.to_string(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s.into()),
            serde_json::Value::Array(items) => {
                Value::List(Arc::new(items.into_iter().map(Value::from).collect()))
            }
            serde_json::Value::Object(map) => Value::Tree(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }
}

impl From<StateTree> for Value {
    fn from(tree: StateTree) -> Self {
        Value::Tree(tree)
    }
}

impl Serialize for Value {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => items.as_slice().serialize(serializer),
            Value::Tree(tree) => tree.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

/// A plain, insertion-ordered map from slice key to slice value.
///
/// Cloning a tree shares it. Trees are never modified in place; [`StateTree::with`]
/// returns a new tree.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StateTree(Arc<IndexMap<String, Value>>);

impl StateTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether both handles point at the same tree.
    pub fn ptr_eq(&self, other: &StateTree) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a new tree with `key` set to `value`. `self` is left untouched.
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = self.0.as_ref().clone();
        map.insert(key.into(), value.into());
        Self(Arc::new(map))
    }
}

impl From<IndexMap<String, Value>> for StateTree {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(Arc::new(map))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for StateTree {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(Arc::new(
            iter.into_iter().map(|(key, value)| (key.into(), value)).collect(),
        ))
    }
}

impl Serialize for StateTree {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StateTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::<String, Value>::deserialize(deserializer).map(StateTree::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_are_same_by_value() {
        assert!(Value::from(3).is_same(&Value::from(3)));
        assert!(Value::from("a").is_same(&Value::from("a")));
        assert!(Value::Null.is_same(&Value::Null));
        assert!(!Value::from(3).is_same(&Value::from(4)));
        assert!(!Value::Null.is_same(&Value::from(false)));
    }

    #[test]
    fn collections_are_same_by_reference() {
        let list = Value::from(vec![Value::from(1)]);
        assert!(list.is_same(&list.clone()));
        assert!(!list.is_same(&Value::from(vec![Value::from(1)])));

        let tree = StateTree::new().with("a", 1);
        assert!(tree.ptr_eq(&tree.clone()));
        assert!(!tree.ptr_eq(&StateTree::new().with("a", 1)));
        assert_eq!(tree, StateTree::new().with("a", 1));
    }

    #[test]
    fn with_leaves_original_untouched() {
        let tree = StateTree::new().with("a", 1);
        let next = tree.with("b", 2);

        assert_eq!(tree.len(), 1);
        assert_eq!(next.len(), 2);
        assert!(!tree.ptr_eq(&next));
    }

    #[test]
    fn tree_keeps_insertion_order() {
        let tree = StateTree::new().with("z", 1).with("a", 2).with("m", 3);
        let keys: Vec<_> = tree.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn type_names_match_warning_vocabulary() {
        assert_eq!(Value::Null.type_name(), "Null");
        assert_eq!(Value::from(true).type_name(), "Boolean");
        assert_eq!(Value::from(1).type_name(), "Number");
        assert_eq!(Value::from("x").type_name(), "String");
        assert_eq!(Value::from(Vec::<Value>::new()).type_name(), "Array");
        assert_eq!(Value::from(StateTree::new()).type_name(), "Object");
    }

    #[test]
    fn scalar_accessors_match_their_variant() {
        let value = Value::from(json!({ "ratio": 0.5, "count": 2, "done": true, "name": "x" }));
        let tree = value.as_tree().unwrap();

        assert_eq!(tree.get("ratio").and_then(Value::as_f64), Some(0.5));
        assert_eq!(tree.get("count").and_then(Value::as_f64), Some(2.0));
        assert_eq!(tree.get("count").and_then(Value::as_i64), Some(2));
        assert_eq!(tree.get("done").and_then(Value::as_bool), Some(true));
        assert_eq!(tree.get("name").and_then(Value::as_bool), None);
        assert_eq!(tree.get("name").and_then(Value::as_f64), None);
        assert_eq!(tree.get("name").and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn json_conversion_preserves_content() {
        let source = json!({ "counter": 1, "todos": ["a", "b"], "flag": null });
        let value = Value::from(source.clone());

        assert_eq!(value.to_json(), source);
        let tree = value.as_tree().unwrap();
        assert_eq!(tree.get("counter").and_then(Value::as_i64), Some(1));
        assert_eq!(tree.get("todos").and_then(Value::as_list).map(<[_]>::len), Some(2));
    }

    #[test]
    fn value_serializes_as_plain_json() {
        let value = Value::from(StateTree::new().with("count", 2).with("name", "x"));
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, r#"{"count":2,"name":"x"}"#);

        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
    }
}
