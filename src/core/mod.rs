//! core
//!
//! Core domain types and the ownership resolution engine.
//!
//! # Modules
//!
//! - [`types`] - UsernameSet, Role, DirectoryOptions
//! - [`paths`] - Directory key normalization and parent reduction
//! - [`schema`] - Declaration and alias file decoding
//! - [`index`] - The per-tree ownership index
//! - [`resolve`] - Upward walk and alias expansion
//! - [`cache`] - Concurrent per-role resolution memo
//! - [`owners`] - Loaded facade tying index, engine and cache together
//! - [`config`] - Tool configuration schema and loading
//!
//! # Design Principles
//!
//! - The index is immutable once built; reloads build a new one
//! - Queries never fail: an unknown path is an empty answer
//! - Every directory key goes through [`paths::normalize`]

pub mod cache;
pub mod config;
pub mod index;
pub mod owners;
pub mod paths;
pub mod resolve;
pub mod schema;
pub mod types;
