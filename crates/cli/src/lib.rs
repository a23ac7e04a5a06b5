//! Command-line front end for the omniconvert queue.

pub mod args;
pub mod config;
pub mod media;
pub mod output;
