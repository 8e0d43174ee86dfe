//! Combining capability: merging two partial results.
//!
//! The right-hand side is always supplied as a thunk so containers with a
//! terminal element (such as [`FirstPresent`]) can skip producing it.

use std::collections::VecDeque;
use stillwater::Semigroup;

/// Capability to merge two containers of type `C`.
///
/// `combine` must be associative and must keep `left` before `right`.
/// It must not force `right` unless the result depends on it.
///
/// # Example
///
/// ```rust
/// use collect_until::core::{Combiner, Concat};
///
/// let merged = Concat.combine(vec![1, 2], || vec![3]);
/// assert_eq!(merged, vec![1, 2, 3]);
/// ```
pub trait Combiner<C>: Clone + Send + Sync + 'static {
    /// Merge `left` with the lazily produced `right`, keeping `left` first.
    ///
    /// `right` is called at most once, and only when the result needs it.
    fn combine<R>(&self, left: C, right: R) -> C
    where
        R: FnOnce() -> C;
}

/// Sequence concatenation for `Vec`, `VecDeque` and `String`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Concat;

impl<T> Combiner<Vec<T>> for Concat {
    fn combine<R>(&self, mut left: Vec<T>, right: R) -> Vec<T>
    where
        R: FnOnce() -> Vec<T>,
    {
        left.extend(right());
        left
    }
}

impl<T> Combiner<VecDeque<T>> for Concat {
    fn combine<R>(&self, mut left: VecDeque<T>, right: R) -> VecDeque<T>
    where
        R: FnOnce() -> VecDeque<T>,
    {
        left.extend(right());
        left
    }
}

impl Combiner<String> for Concat {
    fn combine<R>(&self, mut left: String, right: R) -> String
    where
        R: FnOnce() -> String,
    {
        left.push_str(&right());
        left
    }
}

/// Keeps the first present value; the right side is only produced when the
/// left is `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FirstPresent;

impl<T> Combiner<Option<T>> for FirstPresent {
    fn combine<R>(&self, left: Option<T>, right: R) -> Option<T>
    where
        R: FnOnce() -> Option<T>,
    {
        left.or_else(right)
    }
}

/// Delegates to the container's [`Semigroup`] instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViaSemigroup;

impl<C: Semigroup> Combiner<C> for ViaSemigroup {
    fn combine<R>(&self, left: C, right: R) -> C
    where
        R: FnOnce() -> C,
    {
        left.combine(right())
    }
}

/// Combiner built from a caller-supplied associative function.
#[derive(Clone, Copy, Debug)]
pub struct CombineWith<G> {
    merge: G,
}

/// Wrap an associative merge function as a [`Combiner`].
///
/// # Example
///
/// ```rust
/// use collect_until::core::{combine_with, Combiner};
///
/// let total = combine_with(|a: u64, b: u64| a + b);
/// assert_eq!(total.combine(40u64, || 2), 42);
/// ```
pub fn combine_with<G>(merge: G) -> CombineWith<G> {
    CombineWith { merge }
}

impl<C, G> Combiner<C> for CombineWith<G>
where
    G: Fn(C, C) -> C + Clone + Send + Sync + 'static,
{
    fn combine<R>(&self, left: C, right: R) -> C
    where
        R: FnOnce() -> C,
    {
        (self.merge)(left, right())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_vec_keeps_order() {
        let merged = Concat.combine(vec!["a1", "a2"], || vec!["b1"]);
        assert_eq!(merged, vec!["a1", "a2", "b1"]);
    }

    #[test]
    fn concat_deque_keeps_order() {
        let left: VecDeque<u8> = [1, 2].into_iter().collect();
        let merged = Concat.combine(left, || [3, 4].into_iter().collect());
        assert_eq!(merged, VecDeque::from(vec![1, 2, 3, 4]));
    }

    #[test]
    fn concat_string_appends() {
        let merged = Concat.combine("page-1;".to_string(), || "page-2;".to_string());
        assert_eq!(merged, "page-1;page-2;");
    }

    #[test]
    fn concat_is_associative() {
        let (a, b, c) = (vec![1], vec![2, 3], vec![4]);
        let left_first = Concat.combine(Concat.combine(a.clone(), || b.clone()), || c.clone());
        let right_first = Concat.combine(a, || Concat.combine(b, || c));
        assert_eq!(left_first, right_first);
    }

    #[test]
    fn first_present_never_forces_right_when_left_is_some() {
        let kept = FirstPresent.combine(Some(1), || -> Option<i32> {
            panic!("right side must stay unevaluated")
        });
        assert_eq!(kept, Some(1));
    }

    #[test]
    fn first_present_falls_back_to_right() {
        assert_eq!(FirstPresent.combine(None, || Some("fallback")), Some("fallback"));
        assert_eq!(FirstPresent.combine(None::<u8>, || None), None);
    }

    #[test]
    fn via_semigroup_concatenates_vectors() {
        let merged = ViaSemigroup.combine(vec![1, 2], || vec![3]);
        assert_eq!(merged, vec![1, 2, 3]);
    }

    #[test]
    fn combine_with_uses_supplied_function() {
        let longest = combine_with(|a: String, b: String| if b.len() > a.len() { b } else { a });
        assert_eq!(longest.combine(String::from("ab"), || "abc".to_string()), "abc");
        assert_eq!(longest.combine(String::from("abc"), || "ab".to_string()), "abc");
    }
}
