//! UI-free orchestration state for the Marquee browser.
//!
//! Everything here is a plain state machine: the GUI shell feeds in
//! completion events and executes the commands that come back out. No
//! module performs I/O of its own except the small persistence helpers
//! (`config`, `sort`), which makes the whole layer testable without a
//! running UI or network.

pub mod config;
pub mod error;
pub mod notify;
pub mod picker;
pub mod rows;
pub mod sort;

pub use error::CoreError;
