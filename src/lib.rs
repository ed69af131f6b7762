//! Flip Wheel library - inspect HID mice and flip their scroll-wheel direction.
//!
//! This library exposes the core of the `fw` CLI for use in tests and
//! other tools.
//!
//! # Modules
//!
//! - `store`: Hierarchical key/value store abstraction (registry, fixture, memory)
//! - `device`: Device catalog traversal and descriptor parsing
//! - `wheel`: Scroll-wheel orientation state and toggling
//! - `select`: Operator index selection
//! - `error`: Error types with user-recoverable hints
//! - `output`: Output mode abstraction (robot/human)
//! - `config`: Settings file handling
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod logging;
pub mod output;
pub mod select;
pub mod store;
pub mod theme;
pub mod wheel;
