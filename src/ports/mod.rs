//! Ports (trait boundaries) between the decision core and orchestration.
//!
//! Every decision maker implements [`Agent`]; matchups, tournaments and the
//! training loop only talk to agents through this trait. Training progress
//! leaves the pipeline through [`Observer`].

pub mod agent;
pub mod observer;

pub use agent::{Agent, playable_moves};
pub use observer::Observer;
