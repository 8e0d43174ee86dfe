//! Sequencer over Stillwater effects.

use crate::core::Sequencer;
use std::marker::PhantomData;
use std::ops::ControlFlow;
use stillwater::effect::{BoxedEffect, Effect};
use stillwater::prelude::*;

/// Stillwater effects failing with `E` and reading environment `Env`.
///
/// `Effect<T>` is `BoxedEffect<T, E, Env>`, so step functions can use the
/// environment pattern (`from_fn(|env: &Env| ...)`) to reach their I/O
/// capabilities. The whole run is a single effect: nothing executes until
/// it is `run` against an environment.
///
/// `tail_rec` clones the environment once per run and every step reads that
/// clone. State that steps must share with the caller belongs behind an
/// `Arc`; anything cloned by value is a private copy for the run.
pub struct Effectful<E, Env> {
    _effect: PhantomData<fn() -> (E, Env)>,
}

impl<E, Env> Effectful<E, Env> {
    /// Create the sequencer.
    pub const fn new() -> Self {
        Self {
            _effect: PhantomData,
        }
    }
}

impl<E, Env> Clone for Effectful<E, Env> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, Env> Copy for Effectful<E, Env> {}

impl<E, Env> Default for Effectful<E, Env> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, Env> std::fmt::Debug for Effectful<E, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Effectful")
    }
}

impl<E, Env> Sequencer for Effectful<E, Env>
where
    E: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    type Effect<T: Send + 'static> = BoxedEffect<T, E, Env>;

    fn lift<T: Send + 'static>(&self, value: T) -> BoxedEffect<T, E, Env> {
        pure(value).boxed()
    }

    fn sequence<A, B, K>(
        &self,
        effect: BoxedEffect<A, E, Env>,
        then: K,
    ) -> BoxedEffect<B, E, Env>
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> BoxedEffect<B, E, Env> + Send + 'static,
    {
        effect.and_then(then).boxed()
    }

    fn map<A, B, G>(&self, effect: BoxedEffect<A, E, Env>, f: G) -> BoxedEffect<B, E, Env>
    where
        A: Send + 'static,
        B: Send + 'static,
        G: FnOnce(A) -> B + Send + 'static,
    {
        effect.map(f).boxed()
    }

    /// Runs the whole loop inside one effect against a clone of the
    /// environment, so long chains never nest effects.
    fn tail_rec<S, T, G>(&self, seed: S, mut body: G) -> BoxedEffect<T, E, Env>
    where
        S: Send + 'static,
        T: Send + 'static,
        G: FnMut(S) -> BoxedEffect<ControlFlow<T, S>, E, Env> + Send + 'static,
    {
        from_async(move |env: &Env| {
            let env = env.clone();
            async move {
                let mut state = seed;
                loop {
                    match body(state).run(&env).await {
                        Ok(ControlFlow::Continue(next)) => state = next,
                        Ok(ControlFlow::Break(done)) => return Ok(done),
                        Err(error) => return Err(error),
                    }
                }
            }
        })
        .boxed()
    }
}
