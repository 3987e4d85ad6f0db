//! Macros for ergonomic reducer maps and function composition.

/// Build a [`ReducerMap`](crate::builder::ReducerMap) from `key => reducer` pairs.
///
/// Keys are identifiers and become string keys in declaration order. Values
/// are anything that converts into a [`Reducer`](crate::core::Reducer),
/// including a nested `Combination`.
///
/// # Example
///
/// ```
/// use statecraft::core::{Reducer, Value};
/// use statecraft::reducers;
///
/// let map = reducers! {
///     counter => Reducer::slice(Value::from(0), |s, _| s.clone()),
///     todos => Reducer::slice(Value::from(Vec::<Value>::new()), |s, _| s.clone()),
/// };
///
/// assert_eq!(map.keys().collect::<Vec<_>>(), vec!["counter", "todos"]);
/// ```
#[macro_export]
macro_rules! reducers {
    ($($key:ident => $reducer:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::builder::ReducerMap::new();
        $(
            map.insert(
                stringify!($key),
                $crate::builder::ReducerEntry::Reducer(::std::convert::Into::into($reducer)),
            );
        )*
        map
    }};
}

/// Compose expressions that evaluate to unary functions, right to left.
///
/// `compose!(f, g, h)` yields a closure equivalent to `|x| f(g(h(x)))`.
/// `compose!()` yields the identity and `compose!(f)` yields `f` itself.
///
/// # Example
///
/// ```
/// use statecraft::compose;
///
/// let shout = compose!(|s: String| s + "!", |s: String| s.to_uppercase());
/// assert_eq!(shout("hey".to_string()), "HEY!");
///
/// let id = compose!();
/// assert_eq!(id(3), 3);
/// ```
#[macro_export]
macro_rules! compose {
    () => {
        |x| x
    };
    ($f:expr $(,)?) => {
        $f
    };
    ($f:expr, $($rest:expr),+ $(,)?) => {{
        let outer = $f;
        let inner = $crate::compose!($($rest),+);
        move |x| outer(inner(x))
    }};
}
