//! The collect-until driver.
//!
//! Turns a single-step producer `I -> M<(C, Option<I>)>` into a
//! run-to-completion producer `I -> M<C>`, combining every partial result
//! in call order.

use super::combiner::Combiner;
use super::sequencer::Sequencer;
use std::ops::ControlFlow;
use std::sync::Arc;

/// Value threaded through the driving loop.
///
/// Once the first step has resolved, the accumulator always travels with
/// the token that produces the next partial result.
enum InFlight<C, I> {
    Start(I),
    Carry { acc: C, token: I, steps: usize },
}

type Flow<C, I> = ControlFlow<C, InFlight<C, I>>;

/// Capabilities bound together, waiting for a step function.
///
/// Created by [`collect_until`].
#[derive(Clone, Debug)]
pub struct CollectUntil<M, F> {
    sequencer: M,
    combiner: F,
}

/// Bind a sequencing capability and a combining capability.
///
/// # Example
///
/// ```rust
/// use collect_until::core::{collect_until, Concat, Fallible};
///
/// let collector = collect_until(Fallible::<String>::new(), Concat).run(|page: u32| {
///     let items = vec![format!("item-{page}")];
///     let next = if page < 3 { Some(page + 1) } else { None };
///     Ok::<_, String>((items, next))
/// });
///
/// let all: Result<Vec<String>, String> = collector.collect(1);
/// assert_eq!(all.unwrap(), vec!["item-1", "item-2", "item-3"]);
/// ```
pub fn collect_until<M, F>(sequencer: M, combiner: F) -> CollectUntil<M, F>
where
    M: Sequencer,
{
    CollectUntil {
        sequencer,
        combiner,
    }
}

impl<M, F> CollectUntil<M, F>
where
    M: Sequencer,
    F: Clone,
{
    /// Attach the step function.
    pub fn run<G>(&self, step: G) -> Collector<M, F, G> {
        Collector {
            sequencer: self.sequencer.clone(),
            combiner: self.combiner.clone(),
            step: Arc::new(step),
        }
    }
}

/// A step function driven to completion.
///
/// Each call to [`Collector::collect`] starts a fresh accumulation.
pub struct Collector<M, F, G> {
    sequencer: M,
    combiner: F,
    step: Arc<G>,
}

impl<M: Clone, F: Clone, G> Clone for Collector<M, F, G> {
    fn clone(&self) -> Self {
        Self {
            sequencer: self.sequencer.clone(),
            combiner: self.combiner.clone(),
            step: Arc::clone(&self.step),
        }
    }
}

impl<M, F, G> Collector<M, F, G>
where
    M: Sequencer,
{
    /// Run `step` from `input` until it stops returning a continuation token.
    ///
    /// The steps run strictly one after another, each only after the
    /// previous effect resolved. The first failure signalled by the effect
    /// ends the run and is returned as-is; nothing accumulated before it is
    /// observable.
    pub fn collect<I, C>(&self, input: I) -> M::Effect<C>
    where
        I: Send + 'static,
        C: Send + 'static,
        F: Combiner<C>,
        G: Fn(I) -> M::Effect<(C, Option<I>)> + Send + Sync + 'static,
    {
        let step = Arc::clone(&self.step);
        let sequencer = self.sequencer.clone();
        let combiner = self.combiner.clone();

        self.sequencer
            .tail_rec::<InFlight<C, I>, C, _>(InFlight::Start(input), move |state| match state {
                InFlight::Start(token) => sequencer
                    .map::<(C, Option<I>), Flow<C, I>, _>((*step)(token), |(partial, next)| {
                        advance(partial, next, 1)
                    }),
                InFlight::Carry { acc, token, steps } => {
                    let combiner = combiner.clone();
                    sequencer.map::<(C, Option<I>), Flow<C, I>, _>(
                        (*step)(token),
                        move |(partial, next)| {
                            advance(combiner.combine(acc, move || partial), next, steps + 1)
                        },
                    )
                }
            })
    }

    /// The curried form: a function from initial input to the collected effect.
    pub fn into_fn<I, C>(self) -> impl Fn(I) -> M::Effect<C>
    where
        I: Send + 'static,
        C: Send + 'static,
        F: Combiner<C>,
        G: Fn(I) -> M::Effect<(C, Option<I>)> + Send + Sync + 'static,
    {
        move |input| self.collect(input)
    }
}

fn advance<C, I>(acc: C, next: Option<I>, steps: usize) -> Flow<C, I> {
    match next {
        Some(token) => {
            log::trace!("collect_until: step {steps} returned a continuation");
            ControlFlow::Continue(InFlight::Carry { acc, token, steps })
        }
        None => {
            log::debug!("collect_until: finished after {steps} step(s)");
            ControlFlow::Break(acc)
        }
    }
}
