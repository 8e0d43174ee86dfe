//! Asynchronous sequencer over boxed futures.

use crate::core::Sequencer;
use futures::future::{self, BoxFuture, FutureExt, TryFutureExt};
use std::marker::PhantomData;
use std::ops::ControlFlow;

/// Deferred computation that may fail with `E`.
///
/// `Effect<T>` is a `'static`, `Send` boxed future resolving to
/// `Result<T, E>`. Nothing runs until the future is polled, so building a
/// chain never executes a step.
pub struct Deferred<E> {
    _error: PhantomData<fn() -> E>,
}

impl<E> Deferred<E> {
    /// Create the sequencer.
    pub const fn new() -> Self {
        Self {
            _error: PhantomData,
        }
    }
}

impl<E> Clone for Deferred<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Deferred<E> {}

impl<E> Default for Deferred<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Deferred<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Deferred")
    }
}

impl<E: Send + 'static> Sequencer for Deferred<E> {
    type Effect<T: Send + 'static> = BoxFuture<'static, Result<T, E>>;

    fn lift<T: Send + 'static>(&self, value: T) -> BoxFuture<'static, Result<T, E>> {
        future::ready(Ok(value)).boxed()
    }

    fn sequence<A, B, K>(
        &self,
        effect: BoxFuture<'static, Result<A, E>>,
        then: K,
    ) -> BoxFuture<'static, Result<B, E>>
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> BoxFuture<'static, Result<B, E>> + Send + 'static,
    {
        async move {
            match effect.await {
                Ok(value) => then(value).await,
                Err(error) => Err(error),
            }
        }
        .boxed()
    }

    fn map<A, B, G>(
        &self,
        effect: BoxFuture<'static, Result<A, E>>,
        f: G,
    ) -> BoxFuture<'static, Result<B, E>>
    where
        A: Send + 'static,
        B: Send + 'static,
        G: FnOnce(A) -> B + Send + 'static,
    {
        effect.map_ok(f).boxed()
    }

    fn tail_rec<S, T, G>(&self, seed: S, mut body: G) -> BoxFuture<'static, Result<T, E>>
    where
        S: Send + 'static,
        T: Send + 'static,
        G: FnMut(S) -> BoxFuture<'static, Result<ControlFlow<T, S>, E>> + Send + 'static,
    {
        async move {
            let mut state = seed;
            loop {
                match body(state).await {
                    Ok(ControlFlow::Continue(next)) => state = next,
                    Ok(ControlFlow::Break(done)) => return Ok(done),
                    Err(error) => return Err(error),
                }
            }
        }
        .boxed()
    }
}
