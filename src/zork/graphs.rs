use super::*;
use std::sync::Arc;
use stepgraph_core::{
    Built, ChatModel, CompileResult, Graph, KeyValueStore, RunConfig, END, START,
};

/// Which body answers in the linear chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentVariant {
    /// Prompted model call
    #[default]
    Model,
    /// Canned answer
    Dumb,
    /// Random fact from the store
    RandomFact,
}

/// Which decision function picks the branch after the text router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingVariant {
    /// The router's reply
    #[default]
    ByTopic,
    /// A coin flip
    Randomly,
    /// The `zork:topic` store key
    ByConfig,
}

fn add_agent(
    graph: &mut Graph,
    variant: AgentVariant,
    model: &Arc<dyn ChatModel>,
    store: &Arc<dyn KeyValueStore>,
) -> CompileResult<()> {
    match variant {
        AgentVariant::Model => graph.add_node(zork_agent(model.clone()))?,
        AgentVariant::Dumb => graph.add_node(dumb_agent())?,
        AgentVariant::RandomFact => graph.add_node(RandomFactAgent::new(store.clone()))?,
    };
    Ok(())
}

/// START → zork_agent → zork_fact_checker → END
pub fn linear_chain(
    model: Arc<dyn ChatModel>,
    store: Arc<dyn KeyValueStore>,
    variant: AgentVariant,
    run_config: RunConfig,
) -> CompileResult<Graph<Built>> {
    let mut graph = Graph::new("linear_chain");
    add_agent(&mut graph, variant, &model, &store)?;
    graph
        .add_node(fact_checker(model))?
        .add_edge(START, AGENT)?
        .add_edge(AGENT, FACT_CHECKER)?
        .add_edge(FACT_CHECKER, END)?
        .with_run_config(run_config);
    graph.compile()
}

/// The text router picks between the agent (then the fact checker) and the
/// rejector
pub fn conditional_edges(
    model: Arc<dyn ChatModel>,
    store: Arc<dyn KeyValueStore>,
    variant: RoutingVariant,
    run_config: RunConfig,
) -> CompileResult<Graph<Built>> {
    let mut graph = Graph::new("conditional_edges");
    graph
        .add_node(text_router(model.clone()))?
        .add_node(rejector())?
        .add_node(zork_agent(model.clone()))?
        .add_node(fact_checker(model))?
        .add_edge(START, ROUTER)?;

    let targets = [AGENT, REJECTOR];
    match variant {
        RoutingVariant::ByTopic => graph.add_conditional_edge(ROUTER, route_by_topic, targets)?,
        RoutingVariant::Randomly => graph.add_conditional_edge(ROUTER, route_randomly, targets)?,
        RoutingVariant::ByConfig => {
            graph.add_conditional_edge(ROUTER, RouteByConfig::new(store), targets)?
        }
    };

    graph
        .add_edge(AGENT, FACT_CHECKER)?
        .add_edge(FACT_CHECKER, END)?
        .add_edge(REJECTOR, END)?
        .with_run_config(run_config);
    graph.compile()
}

/// Like [`conditional_edges`], but the router returns a [`TopicResponse`]
/// and the agent answers without a fact check
pub fn structured_routing(model: Arc<dyn ChatModel>, run_config: RunConfig) -> CompileResult<Graph<Built>> {
    let mut graph = Graph::new("structured_routing");
    graph
        .add_node(structured_router(model.clone()))?
        .add_node(open_agent(model))?
        .add_node(rejector())?
        .add_edge(START, ROUTER)?
        .add_conditional_edge(ROUTER, StructuredTopicRouter, [AGENT, REJECTOR])?
        .add_edge(AGENT, END)?
        .add_edge(REJECTOR, END)?
        .with_run_config(run_config);
    graph.compile()
}
