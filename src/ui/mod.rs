//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All terminal output from command handlers goes through this module so
//! quiet, debug and JSON modes are handled in one place. Library code logs
//! through `tracing` instead.

pub mod output;
