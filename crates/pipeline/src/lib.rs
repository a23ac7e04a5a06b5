//! Conversion queue orchestration.
//!
//! - [`ConversionQueue`] -- shared queue state with the user operations
//!   (add, remove, retarget, clear) and the dispatch pass.
//! - [`Dispatcher`] -- routes one entry to the local re-encoder or the
//!   inference service.
//! - [`EventBus`] -- broadcast of [`QueueEvent`]s for front ends.

pub mod dispatcher;
pub mod error;
pub mod events;
pub mod queue;

pub use dispatcher::{select_path, ConversionPath, Dispatcher};
pub use error::DispatchError;
pub use events::{EventBus, QueueEvent};
pub use queue::{AddOutcome, ConversionQueue, PassSummary, QueueConfig, DEFAULT_MAX_IN_FLIGHT};
