//! Zork-themed walkthroughs of a step graph: a linear chain, conditional
//! routing, structured output, structured routing and a tool-using agent.
//!
//! Every graph is built from a shared [`ChatModel`](stepgraph_core::ChatModel)
//! and, where a step needs one, a [`KeyValueStore`](stepgraph_core::KeyValueStore),
//! so the same graphs run against OpenAI or a test double.

pub mod calculator;
pub mod config;
pub mod location;
pub mod output;
pub mod prompted;
pub mod zork;

pub use config::{ConfigError, Settings};
pub use prompted::PromptedNode;
pub use stepgraph_core;
