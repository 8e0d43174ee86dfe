//! Asynchronous sequencers: the "imperative shell" around the driver.
//!
//! - **Deferred**: boxed `futures` futures resolving to `Result<T, E>`
//! - **Effectful**: Stillwater `BoxedEffect`s run against an environment
//!
//! Both implement `Sequencer::tail_rec` with a single async loop, so a run
//! of any length polls one level of nesting per step.

mod deferred;
mod effectful;

pub use deferred::Deferred;
pub use effectful::Effectful;
