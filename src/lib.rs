//! collect-until: drive an effectful step function to completion
//!
//! Many sources hand out results one batch at a time: a listing endpoint
//! returns a page plus a cursor, a scanner returns a chunk plus a resume
//! token. `collect_until` turns such a single-step producer into a
//! run-to-completion producer, combining every partial result in order,
//! all inside one effect context.
//!
//! # Core Concepts
//!
//! - **Sequencer**: how effects are ordered and how plain values are lifted
//!   (`Immediate`, `Fallible`, `Deferred`, `Effectful`)
//! - **Combiner**: how two partial results merge (`Concat`, `FirstPresent`,
//!   `ViaSemigroup`, `combine_with`)
//! - **Step function**: `I -> Effect<(C, Option<I>)>`, run until it returns
//!   no continuation token
//!
//! The driver performs no I/O and holds no state. Steps run strictly one
//! after another; the first failure ends the run and nothing accumulated
//! before it is returned.
//!
//! # Example
//!
//! ```rust
//! use collect_until::core::{collect_until, Concat, Fallible};
//!
//! fn fetch(page: u32) -> Result<(Vec<&'static str>, Option<u32>), String> {
//!     match page {
//!         1 => Ok((vec!["a1", "a2"], Some(2))),
//!         2 => Ok((vec!["b1", "b2"], Some(3))),
//!         3 => Ok((vec!["c1", "c2"], None)),
//!         other => Err(format!("no page {other}")),
//!     }
//! }
//!
//! let collector = collect_until(Fallible::<String>::new(), Concat).run(fetch);
//! let all: Result<Vec<&str>, String> = collector.collect(1);
//!
//! assert_eq!(all.unwrap(), vec!["a1", "a2", "b1", "b2", "c1", "c2"]);
//! ```

pub mod core;
pub mod effects;
pub mod page;

// Re-export commonly used types
pub use crate::core::{
    collect_until, Collector, Combiner, Concat, Fallible, Immediate, Sequencer,
};
pub use effects::{Deferred, Effectful};
pub use page::{Cursor, Page, PageError, PageRequest};
