//! Stagewatch Watcher Library
//!
//! This crate turns platform filesystem notifications into creation events
//! and drives the watch loop that dispatches each created file to a handler.
//!
//! The event subscription is behind the [`EventSource`] trait so the loop is
//! portable and testable with a scripted source; [`NotifyEventSource`] is the
//! production implementation built on the `notify` crate.

pub mod handler;
pub mod source;
pub mod watch;

// Re-export commonly used types
pub use handler::CreatedFileHandler;
pub use source::{CreationEvent, EventSource, NotifyEventSource, WatchError};
pub use watch::run;
