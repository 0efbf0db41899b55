//! CLI infrastructure for the `ttt` binary
//!
//! This module provides the command-line interface for training the
//! Q-learning agent, running tournaments and playing single games.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{AgentKind, AgentOptions};
