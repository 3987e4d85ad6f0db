//! Right-to-left composition of unary functions.

/// A boxed unary function from `T` to `T`.
pub type Unary<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// Compose functions from right to left.
///
/// `compose(vec![f, g, h])` behaves like `|x| f(g(h(x)))`. With no functions
/// the result is the identity; a single function is returned unchanged.
///
/// For closures of differing types, see the [`compose!`](crate::compose!)
/// macro.
///
/// # Example
///
/// ```rust
/// use statecraft::compose::{compose, Unary};
///
/// let add_one: Unary<i32> = Box::new(|x| x + 1);
/// let double: Unary<i32> = Box::new(|x| x * 2);
///
/// let f = compose(vec![add_one, double]);
/// assert_eq!(f(5), 11);
/// ```
pub fn compose<T: 'static>(funcs: Vec<Unary<T>>) -> Unary<T> {
    funcs
        .into_iter()
        .reduce(|outer, inner| -> Unary<T> { Box::new(move |x| outer(inner(x))) })
        .unwrap_or_else(|| Box::new(|x: T| x))
}
