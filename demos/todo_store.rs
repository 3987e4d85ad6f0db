//! Todo Store
//!
//! This example wires a combined reducer into a minimal single-store loop.
//!
//! Key concepts:
//! - Slice reducers own one key of the state tree each
//! - The root reducer returns the same tree for no-op dispatches
//! - Stray keys in a preloaded state are reported once, in development builds
//!
//! Run with: RUST_LOG=statecraft=debug cargo run --example todo_store

use statecraft::{
    combine_reducers_with, compose, reducers, Action, BuildMode, Combination, CombineError,
    CombineOptions, Reducer, StateTree, Value,
};
use tracing_subscriber::EnvFilter;

/// Holds the current state and runs the root reducer on dispatch.
struct Store {
    root: Combination,
    state: Value,
    subscribers_notified: usize,
}

impl Store {
    fn new(root: Combination, preloaded: Option<Value>) -> Result<Self, CombineError> {
        let state = root.reduce(preloaded.as_ref(), &Action::init())?;
        Ok(Self {
            root,
            state,
            subscribers_notified: 0,
        })
    }

    fn dispatch(&mut self, action: Action) -> Result<(), CombineError> {
        let next = self.root.reduce(Some(&self.state), &action)?;
        if !next.is_same(&self.state) {
            self.subscribers_notified += 1;
            self.state = next;
        }
        Ok(())
    }
}

fn todos() -> Reducer {
    Reducer::slice(Value::from(Vec::<Value>::new()), |todos, action| {
        match (action.is("todos/add"), todos.as_list()) {
            (true, Some(items)) => {
                let mut items = items.to_vec();
                items.push(action.payload().clone());
                Value::from(items)
            }
            _ => todos.clone(),
        }
    })
}

fn filter() -> Reducer {
    Reducer::slice(Value::from("all"), |filter, action| {
        if action.is("filter/set") {
            action.payload().clone()
        } else {
            filter.clone()
        }
    })
}

fn main() -> Result<(), CombineError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let root = combine_reducers_with(
        reducers! {
            todos => todos(),
            filter => filter(),
        },
        CombineOptions::new().mode(BuildMode::Development),
    );

    let preloaded = StateTree::new()
        .with("filter", "done")
        .with("legacy_session", true);
    let mut store = Store::new(root, Some(Value::from(preloaded)))?;

    let normalize = compose!(|s: String| s.trim().to_string(), |s: String| s.to_lowercase());
    for title in ["  Write Docs ", "Ship Release"] {
        store.dispatch(Action::new("todos/add").with_payload(normalize(title.to_string())))?;
    }
    store.dispatch(Action::new("unknown/noop"))?;
    store.dispatch(Action::new("filter/set").with_payload("open"))?;

    println!("state: {}", store.state.to_json());
    println!("changes notified: {}", store.subscribers_notified);
    Ok(())
}
