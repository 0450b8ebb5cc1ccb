//! Board Viewer - Common Types & Logic
//!
//! Platform-independent half of the page glue: the connection lifecycle
//! state machine, the menu route table and the viewer configuration.

pub mod config;
pub mod connection;
pub mod nav;

pub use anyhow::{bail, Result};
