mod config;
mod core;
mod edges;
mod tests;

pub use config::{RunConfig, DEFAULT_MAX_HOPS};
pub use core::{Built, Graph, NotBuilt, END, START};
pub use edges::{Condition, Edge, Router};
