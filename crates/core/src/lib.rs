//! Core types for the Spott duplicate location resolver
//!
//! Domain types, the dependent-table catalogue and the pure proximity
//! detector shared by the storage, service and HTTP crates.

mod config;
mod constants;
mod dedup;
mod dependents;
mod env_config;
mod error;
mod location;
mod merge;
mod report;

pub use config::*;
pub use constants::*;
pub use dedup::*;
pub use dependents::*;
pub use env_config::*;
pub use error::*;
pub use location::*;
pub use merge::*;
pub use report::*;
