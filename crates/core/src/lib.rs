//! Domain model for the conversion queue.
//!
//! Categorization, the option catalog, the queue entry state machine, the
//! ordered queue store, intake validation, download resolution and the
//! collaborator traits used by the dispatcher.

pub mod catalog;
pub mod category;
pub mod converter;
pub mod download;
pub mod entry;
pub mod error;
pub mod intake;
pub mod queue;
pub mod types;
