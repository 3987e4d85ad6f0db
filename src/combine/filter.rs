//! Key filtering: keep only the entries that hold a reducer.

use crate::builder::{ReducerEntry, ReducerMap};
use crate::core::Reducer;
use crate::diagnostics::WarningSink;
use indexmap::IndexMap;

/// Reducers that survived filtering, in input key order.
pub(crate) type FinalReducers = IndexMap<String, Reducer>;

/// Drop every entry that is not a reducer.
///
/// When `sink` is present (development builds), each unset key is reported.
/// Entries holding some other value are dropped without a message.
pub(crate) fn filter_reducers(map: ReducerMap, sink: Option<&dyn WarningSink>) -> FinalReducers {
    let mut reducers = FinalReducers::with_capacity(map.len());

    for (key, entry) in map {
        match entry {
            ReducerEntry::Reducer(reducer) => {
                reducers.insert(key, reducer);
            }
            ReducerEntry::Unset => {
                if let Some(sink) = sink {
                    sink.warn(&format!("No reducer provided for key \"{key}\""));
                }
            }
            ReducerEntry::NotAReducer(value) => {
                tracing::trace!(key = %key, kind = value.type_name(), "Ignoring non-reducer entry");
            }
        }
    }

    reducers
}
