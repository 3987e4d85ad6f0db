//! Reducer maps: the input to the combinator.

use crate::core::{Reducer, Value};
use indexmap::IndexMap;

/// What a reducer map holds under one key.
#[derive(Debug, Clone)]
pub enum ReducerEntry {
    /// A reducer that owns the slice under this key.
    Reducer(Reducer),

    /// The key was declared but never given a reducer. Reported in
    /// development builds, then dropped.
    Unset,

    /// Something other than a reducer was stored. Dropped silently.
    NotAReducer(Value),
}

impl ReducerEntry {
    pub fn as_reducer(&self) -> Option<&Reducer> {
        match self {
            Self::Reducer(reducer) => Some(reducer),
            _ => None,
        }
    }
}

impl From<Reducer> for ReducerEntry {
    fn from(reducer: Reducer) -> Self {
        Self::Reducer(reducer)
    }
}

/// Insertion-ordered mapping from slice key to reducer.
///
/// The order of keys is the order in which reducers run and the order of
/// keys in every state tree the combinator builds. Setting a key that is
/// already present replaces its entry but keeps its position.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::ReducerMap;
/// use statecraft::core::{Reducer, Value};
///
/// let map = ReducerMap::new()
///     .reducer("counter", Reducer::slice(Value::from(0), |s, _| s.clone()))
///     .reducer("todos", Reducer::slice(Value::from(Vec::<Value>::new()), |s, _| s.clone()))
///     .unset("draft");
///
/// assert_eq!(map.keys().collect::<Vec<_>>(), vec!["counter", "todos", "draft"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReducerMap {
    entries: IndexMap<String, ReducerEntry>,
}

impl ReducerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reducer, or anything that converts into one (such as a
    /// `Combination`, for nesting).
    pub fn reducer(self, key: impl Into<String>, reducer: impl Into<Reducer>) -> Self {
        self.entry(key, ReducerEntry::Reducer(reducer.into()))
    }

    /// Declare a key without a reducer.
    pub fn unset(self, key: impl Into<String>) -> Self {
        self.entry(key, ReducerEntry::Unset)
    }

    /// Store a plain value where a reducer was expected.
    pub fn value(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entry(key, ReducerEntry::NotAReducer(value.into()))
    }

    pub fn entry(mut self, key: impl Into<String>, entry: ReducerEntry) -> Self {
        self.insert(key, entry);
        self
    }

    /// In-place variant of [`ReducerMap::entry`].
    pub fn insert(&mut self, key: impl Into<String>, entry: ReducerEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn get(&self, key: &str) -> Option<&ReducerEntry> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReducerEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ReducerEntry)> for ReducerMap {
    fn from_iter<I: IntoIterator<Item = (K, ReducerEntry)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, entry) in iter {
            map.insert(key, entry);
        }
        map
    }
}

impl IntoIterator for ReducerMap {
    type Item = (String, ReducerEntry);
    type IntoIter = indexmap::map::IntoIter<String, ReducerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
