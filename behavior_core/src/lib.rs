//! # Behavior Core
//!
//! Walks a user through a `scenario_graph::ScenarioGraph` one choice at a
//! time and, once a terminal node is reached, derives a behavioral profile
//! from what was chosen and how long each choice took.
//!
//! ## Core Components
//!
//! - **session**: The per-user state machine, its scene clock, and a registry
//!   isolating concurrent sessions
//! - **results**: Pure derivation of the behavioral report from a finished session
//! - **driver**: The command loop between a session and a presentation layer
//! - **config**: Classification thresholds and radar axes
//!
//! ## Design Philosophy
//!
//! - **Caller-Owned State**: Sessions are plain values passed into every operation
//! - **Explicit Commands**: Each choice is one transition that either applies fully or not at all
//! - **Pure Results**: Computing a report never mutates the session

pub mod config;
pub mod driver;
pub mod error;
pub mod results;
pub mod session;

pub use config::*;
pub use driver::*;
pub use error::*;
pub use results::*;
pub use session::*;
