//! # Scenario Graph
//!
//! The read-only half of the profiler: a directed graph of scenario nodes,
//! each carrying display text and the labeled choices leading out of it.
//! This crate holds no session state and no scoring logic; it is loaded once
//! and shared by every session.
//!
//! ## Core Components
//!
//! - **node**: `Node`, `Choice`, and the trait consequences a choice grants
//! - **graph**: `ScenarioGraph`, parsed from JSON or TOML documents
//! - **error**: `ScenarioError`, the failures a scenario can surface

pub mod error;
pub mod graph;
pub mod node;

pub use error::*;
pub use graph::*;
pub use node::*;
