//! Question answering about Zork: agents, a fact checker, routers and the
//! graphs that wire them together.
//!
//! The driver runs the model-backed agent and routes on the router's reply.
//! The other bodies are selected when building a graph:
//!
//! - [`AgentVariant::Dumb`] or [`AgentVariant::RandomFact`] in [`linear_chain`].
//!   The random-fact agent draws from the [`FACTS_KEY`] set, seeded with
//!   `store.add_member(FACTS_KEY, fact)`.
//! - [`RoutingVariant::Randomly`] or [`RoutingVariant::ByConfig`] in
//!   [`conditional_edges`]. Config routing reads [`TOPIC_KEY`]; set it with
//!   `store.set(TOPIC_KEY, "zork".into())` to send every question to the agent.

mod agents;
mod graphs;
mod routing;

pub use agents::{
    dumb_agent, fact_checker, open_agent, rejector, structured_router, text_router, zork_agent,
    RandomFactAgent, StructuredRouterNode, Topic, TopicResponse,
};
pub use graphs::{conditional_edges, linear_chain, structured_routing, AgentVariant, RoutingVariant};
pub use routing::{route_by_topic, route_randomly, RouteByConfig, StructuredTopicRouter};

pub const AGENT: &str = "zork_agent";
pub const FACT_CHECKER: &str = "zork_fact_checker";
pub const ROUTER: &str = "zork_router";
pub const REJECTOR: &str = "zork_rejector";

/// Store key holding the set of canned Zork facts
pub const FACTS_KEY: &str = "zork:facts";
/// Store key holding the configured topic, `zork` or anything else
pub const TOPIC_KEY: &str = "zork:topic";

pub const REJECTION: &str = "I'm sorry, I can only answer questions about Zork.";
pub const DUMB_ANSWER: &str = "I dunno. I am a dumb Zork agent.";
pub const FALLBACK_FACT: &str = "Zork is a great game!";

pub const AGENT_PROMPT: &str = "You are a helpful assistant that answers questions about the classic \
text adventure game Zork. You will be provided with a question and you \
should answer it. You should only answer questions related to Zork. If \
a question is not related to Zork, you should respond with \"I'm sorry, \
I can only answer questions about Zork.\"";

pub const OPEN_AGENT_PROMPT: &str = "You are a helpful assistant that answers questions about the classic \
text adventure game Zork. Answer the user's question.";

pub const FACT_CHECKER_PROMPT: &str = "You are a helpful editor that edits the work of a Zork assistant. Zork \
assistants are helpful assistants that answer questions about the classic \
text adventure game Zork. Zork assistants are not the best writers and often \
make up facts. You will be provided with a question and the assistant's \
response. You should read the assistant's response and edit it to make it \
correct. If the assistant's response is already correct, you should just \
return it. DO NOT generate new responses.";

pub const ROUTER_PROMPT: &str = "You are a helpful assistant that routes questions to the right expert. You \
will be provided with a question and you should decide if it is related \
to Zork. If it is related to Zork, you should respond with \"zork\". If it \
is not related to Zork, you should respond with \"other\".";

pub const STRUCTURED_ROUTER_PROMPT: &str = "You are a helpful assistant that routes questions to the right expert. \
Determine if the question is related to Zork or not.";
