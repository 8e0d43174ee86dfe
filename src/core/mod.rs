//! The pure core: capabilities and the collect-until driver.
//!
//! This module contains everything the driver depends on:
//! - The `Sequencer` capability and its synchronous implementations
//! - The `Combiner` capability and common containers
//! - The driver itself (`collect_until`)
//!
//! Nothing here performs I/O; all effects belong to the step function and
//! to the chosen sequencer.

mod collect;
mod combiner;
mod sequencer;

pub use collect::{collect_until, CollectUntil, Collector};
pub use combiner::{combine_with, CombineWith, Combiner, Concat, FirstPresent, ViaSemigroup};
pub use sequencer::{Fallible, Immediate, Sequencer};
