//! Sequencing capability: ordering effectful steps and lifting pure values.
//!
//! Rust has no higher-kinded types, so the effect type constructor is
//! emulated with a generic associated type. A `Sequencer` value is a
//! capability descriptor; the effect values themselves are `Self::Effect<T>`.

use std::marker::PhantomData;
use std::ops::ControlFlow;

/// Capability to sequence effectful computations of type `Effect<T>`.
///
/// # Laws
///
/// 1. **Left identity**: `sequence(lift(x), k)` is equivalent to `k(x)`
/// 2. **Short-circuit**: if an effect fails, no later continuation runs and
///    the failure propagates unchanged through every outer `sequence`
/// 3. **Associativity**: nesting of `sequence` calls does not change the
///    order in which effects run
///
/// Implementations are usually zero-sized and `Copy`; they are cloned into
/// continuations freely.
///
/// # Example
///
/// ```rust
/// use collect_until::core::{Fallible, Sequencer};
///
/// let seq = Fallible::<String>::new();
/// let doubled = seq.sequence::<i32, i32, _>(seq.lift(21), |n| Ok(n * 2));
/// assert_eq!(doubled, Ok(42));
///
/// let failed = seq.sequence::<i32, i32, _>(Err("boom".to_string()), |n| Ok(n * 2));
/// assert_eq!(failed, Err("boom".to_string()));
/// ```
pub trait Sequencer: Clone + Send + Sync + 'static {
    /// The effect wrapping a value of type `T`.
    type Effect<T: Send + 'static>;

    /// Wrap a plain value with no effect.
    fn lift<T: Send + 'static>(&self, value: T) -> Self::Effect<T>;

    /// Run `effect`, then the effect produced by `then` from its value.
    fn sequence<A, B, K>(&self, effect: Self::Effect<A>, then: K) -> Self::Effect<B>
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> Self::Effect<B> + Send + 'static;

    /// Transform the value produced by `effect`.
    fn map<A, B, G>(&self, effect: Self::Effect<A>, f: G) -> Self::Effect<B>
    where
        A: Send + 'static,
        B: Send + 'static,
        G: FnOnce(A) -> B + Send + 'static,
    {
        let this = self.clone();
        self.sequence::<A, B, _>(effect, move |value| this.lift(f(value)))
    }

    /// Repeatedly sequence `body` from `seed` until it breaks.
    ///
    /// Each iteration must run in constant stack space: implement it as a
    /// loop (or trampoline) over the effect, never as recursion through
    /// `sequence`. The collect-until driver relies on this for chains of
    /// any length.
    fn tail_rec<S, T, G>(&self, seed: S, body: G) -> Self::Effect<T>
    where
        S: Send + 'static,
        T: Send + 'static,
        G: FnMut(S) -> Self::Effect<ControlFlow<T, S>> + Send + 'static;
}

/// The effect-free sequencer: `Effect<T>` is `T` itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Immediate;

impl Sequencer for Immediate {
    type Effect<T: Send + 'static> = T;

    fn lift<T: Send + 'static>(&self, value: T) -> T {
        value
    }

    fn sequence<A, B, K>(&self, effect: A, then: K) -> B
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> B + Send + 'static,
    {
        then(effect)
    }

    fn map<A, B, G>(&self, effect: A, f: G) -> B
    where
        A: Send + 'static,
        B: Send + 'static,
        G: FnOnce(A) -> B + Send + 'static,
    {
        f(effect)
    }

    fn tail_rec<S, T, G>(&self, seed: S, mut body: G) -> T
    where
        S: Send + 'static,
        T: Send + 'static,
        G: FnMut(S) -> ControlFlow<T, S> + Send + 'static,
    {
        let mut state = seed;
        loop {
            match body(state) {
                ControlFlow::Continue(next) => state = next,
                ControlFlow::Break(done) => return done,
            }
        }
    }
}

/// Synchronous computation that may fail with `E`: `Effect<T>` is `Result<T, E>`.
pub struct Fallible<E> {
    _error: PhantomData<fn() -> E>,
}

impl<E> Fallible<E> {
    /// Create the sequencer.
    pub const fn new() -> Self {
        Self {
            _error: PhantomData,
        }
    }
}

impl<E> Clone for Fallible<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Fallible<E> {}

impl<E> Default for Fallible<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Fallible<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Fallible")
    }
}

impl<E: Send + 'static> Sequencer for Fallible<E> {
    type Effect<T: Send + 'static> = Result<T, E>;

    fn lift<T: Send + 'static>(&self, value: T) -> Result<T, E> {
        Ok(value)
    }

    fn sequence<A, B, K>(&self, effect: Result<A, E>, then: K) -> Result<B, E>
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> Result<B, E> + Send + 'static,
    {
        effect.and_then(then)
    }

    fn map<A, B, G>(&self, effect: Result<A, E>, f: G) -> Result<B, E>
    where
        A: Send + 'static,
        B: Send + 'static,
        G: FnOnce(A) -> B + Send + 'static,
    {
        effect.map(f)
    }

    fn tail_rec<S, T, G>(&self, seed: S, mut body: G) -> Result<T, E>
    where
        S: Send + 'static,
        T: Send + 'static,
        G: FnMut(S) -> Result<ControlFlow<T, S>, E> + Send + 'static,
    {
        let mut state = seed;
        loop {
            match body(state)? {
                ControlFlow::Continue(next) => state = next,
                ControlFlow::Break(done) => return Ok(done),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Eager sequencer with only the required methods, relying on the
    /// provided `map`.
    #[derive(Clone, Copy, Debug)]
    struct Maybe;

    impl Sequencer for Maybe {
        type Effect<T: Send + 'static> = Option<T>;

        fn lift<T: Send + 'static>(&self, value: T) -> Option<T> {
            Some(value)
        }

        fn sequence<A, B, K>(&self, effect: Option<A>, then: K) -> Option<B>
        where
            A: Send + 'static,
            B: Send + 'static,
            K: FnOnce(A) -> Option<B> + Send + 'static,
        {
            effect.and_then(then)
        }

        fn tail_rec<S, T, G>(&self, seed: S, mut body: G) -> Option<T>
        where
            S: Send + 'static,
            T: Send + 'static,
            G: FnMut(S) -> Option<ControlFlow<T, S>> + Send + 'static,
        {
            let mut state = seed;
            loop {
                match body(state)? {
                    ControlFlow::Continue(next) => state = next,
                    ControlFlow::Break(done) => return Some(done),
                }
            }
        }
    }

    #[test]
    fn immediate_satisfies_left_identity() {
        let k = |n: i32| n + 1;
        assert_eq!(Immediate.sequence::<i32, i32, _>(Immediate.lift(41), k), k(41));
    }

    #[test]
    fn fallible_satisfies_left_identity() {
        let seq = Fallible::<String>::new();
        let k = |n: i32| -> Result<i32, String> { Ok(n * 3) };
        assert_eq!(seq.sequence::<i32, i32, _>(seq.lift(5), k), k(5));
    }

    #[test]
    fn fallible_failure_skips_continuation() {
        let seq = Fallible::<&'static str>::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let result = seq.sequence::<i32, i32, _>(Err("unavailable"), move |n| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(n)
        });

        assert_eq!(result, Err("unavailable"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn default_map_goes_through_sequence_and_lift() {
        assert_eq!(Maybe.map::<i32, String, _>(Some(7), |n| n.to_string()), Some("7".into()));
        assert_eq!(Maybe.map::<i32, String, _>(None, |n| n.to_string()), None);
    }

    #[test]
    fn custom_tail_rec_counts_down() {
        let total = Maybe.tail_rec::<u32, u32, _>(10, |n| {
            Some(if n == 0 {
                ControlFlow::Break(42)
            } else {
                ControlFlow::Continue(n - 1)
            })
        });
        assert_eq!(total, Some(42));
    }

    #[test]
    fn custom_tail_rec_stops_on_failure() {
        let result = Maybe.tail_rec::<u32, u32, _>(0, |n| {
            if n == 3 {
                None
            } else {
                Some(ControlFlow::Continue(n + 1))
            }
        });
        assert_eq!(result, None);
    }

    #[test]
    fn immediate_tail_rec_is_stack_safe() {
        let result = Immediate.tail_rec::<u64, u64, _>(0, |n| {
            if n == 1_000_000 {
                ControlFlow::Break(n)
            } else {
                ControlFlow::Continue(n + 1)
            }
        });
        assert_eq!(result, 1_000_000);
    }

    #[test]
    fn fallible_tail_rec_propagates_first_error() {
        let seq = Fallible::<String>::new();
        let result = seq.tail_rec::<u32, u32, _>(0, |n| {
            if n == 500_000 {
                Err(format!("failed at {n}"))
            } else {
                Ok(ControlFlow::Continue(n + 1))
            }
        });
        assert_eq!(result, Err("failed at 500000".to_string()));
    }
}
