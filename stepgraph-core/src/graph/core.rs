use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::*;
use crate::node::*;
use crate::types::*;

pub const START: &str = "_START_";
pub const END: &str = "_END_";

/// Marker types for graph construction states
#[derive(Debug)]
pub struct NotBuilt;

#[derive(Debug)]
pub struct Built;

/// A graph that executes nodes in a defined order.
///
/// `Graph<NotBuilt>` accumulates nodes and edges; `compile` validates them and
/// yields a `Graph<Built>`, which has no mutating methods and can be shared
/// between concurrent runs.
#[derive(Debug)]
pub struct Graph<BuildState = NotBuilt> {
    graph_name: String,
    nodes: HashMap<String, Arc<dyn Node>>,
    edges: HashMap<String, Edge>,
    configs: HashMap<String, NodeConfig>,
    run_config: RunConfig,
    _build_state: PhantomData<BuildState>,
}

impl Graph<NotBuilt> {
    /// Create a new graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph_name: name.into(),
            nodes: HashMap::new(),
            edges: HashMap::new(),
            configs: HashMap::new(),
            run_config: RunConfig::default(),
            _build_state: PhantomData,
        }
    }

    /// Add a node to the graph
    pub fn add_node<N>(&mut self, node: N) -> CompileResult<&mut Self>
    where
        N: Node + 'static,
    {
        let name = node.name().to_string();
        if name == START || name == END {
            return Err(CompileError::ReservedName(name));
        }
        if self.nodes.contains_key(&name) {
            return Err(CompileError::DuplicateNode(name));
        }
        self.nodes.insert(name, Arc::new(node));
        Ok(self)
    }

    /// Add a direct edge between nodes
    pub fn add_edge(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> CompileResult<&mut Self> {
        self.insert_edge(from.into(), Edge::Direct(to.into()))
    }

    /// Add a conditional edge from a node.
    ///
    /// `targets` is the allow-list the router's answer is checked against on
    /// every resolution.
    pub fn add_conditional_edge<R, I, T>(
        &mut self,
        from: impl Into<String>,
        router: R,
        targets: I,
    ) -> CompileResult<&mut Self>
    where
        R: Router + 'static,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let edge = Edge::Conditional {
            condition: Arc::new(router),
            targets: targets.into_iter().map(Into::into).collect(),
        };
        self.insert_edge(from.into(), edge)
    }

    fn insert_edge(&mut self, from: String, edge: Edge) -> CompileResult<&mut Self> {
        if from == END {
            return Err(CompileError::ReservedName(from));
        }
        if self.edges.contains_key(&from) {
            return Err(CompileError::DuplicateEdge(from));
        }
        self.edges.insert(from, edge);
        Ok(self)
    }

    /// Configure a node with specific settings
    pub fn configure_node(&mut self, name: impl Into<String>, config: NodeConfig) -> &mut Self {
        self.configs.insert(name.into(), config);
        self
    }

    /// Settings applied to every run of the compiled graph
    pub fn with_run_config(&mut self, config: RunConfig) -> &mut Self {
        self.run_config = config;
        self
    }

    /// Validate the graph and freeze it for execution
    pub fn compile(self) -> CompileResult<Graph<Built>> {
        self.validate()?;
        Ok(Graph {
            graph_name: self.graph_name,
            nodes: self.nodes,
            edges: self.edges,
            configs: self.configs,
            run_config: self.run_config,
            _build_state: PhantomData,
        })
    }

    fn validate(&self) -> CompileResult<()> {
        if !self.edges.contains_key(START) {
            return Err(CompileError::MissingEntry);
        }

        let mut sources: Vec<&String> = self.edges.keys().collect();
        sources.sort();
        for from in sources {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompileError::UnknownNode(from.clone()));
            }
            let edge = &self.edges[from];
            if let Edge::Conditional { targets, .. } = edge {
                if targets.is_empty() {
                    return Err(CompileError::EmptyRouteTargets(from.clone()));
                }
            }
            for target in edge.targets() {
                if target != END && !self.nodes.contains_key(target) {
                    return Err(CompileError::UnknownNode(target.to_string()));
                }
            }
        }

        let mut names: Vec<&String> = self.nodes.keys().collect();
        names.sort();
        if let Some(dangling) = names.into_iter().find(|n| !self.edges.contains_key(*n)) {
            return Err(CompileError::DanglingNode(dangling.clone()));
        }

        if let Some(unknown) = self.configs.keys().find(|n| !self.nodes.contains_key(*n)) {
            return Err(CompileError::UnknownNode(unknown.clone()));
        }

        Ok(())
    }
}

impl Graph<Built> {
    pub fn name(&self) -> &str {
        &self.graph_name
    }

    pub fn run_config(&self) -> &RunConfig {
        &self.run_config
    }

    /// Look up a registered node
    pub fn node(&self, name: &str) -> GraphResult<&Arc<dyn Node>> {
        self.nodes
            .get(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))
    }

    /// Names of all registered nodes, sorted
    pub fn node_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Determine which node follows `from` given the current state
    pub async fn resolve_next(&self, from: &str, state: &MessagesState) -> GraphResult<String> {
        match self.edges.get(from) {
            Some(Edge::Direct(next)) => Ok(next.clone()),
            Some(Edge::Conditional { condition, targets }) => {
                let target = condition.route(state).await.map_err(|source| {
                    GraphError::StepExecution {
                        node: from.to_string(),
                        source,
                    }
                })?;
                if targets.iter().any(|t| *t == target) {
                    Ok(target)
                } else {
                    Err(GraphError::InvalidRoute {
                        from: from.to_string(),
                        target,
                    })
                }
            }
            None => Err(GraphError::DanglingNode(from.to_string())),
        }
    }

    /// Run the graph with an initial state
    pub async fn run(&self, ctx: &Context, initial_state: MessagesState) -> GraphResult<MessagesState> {
        let max_hops = self.run_config.max_hops;
        let mut state = initial_state;
        let mut hops = 0;

        info!(graph = %self.graph_name, trace_id = %ctx.trace_id, "Starting graph run");

        let mut current = self.resolve_next(START, &state).await?;
        while current != END {
            if ctx.is_cancelled() {
                warn!(graph = %self.graph_name, node = %current, "Graph run cancelled");
                return Err(GraphError::Cancelled);
            }

            hops += 1;
            if hops > max_hops {
                warn!(graph = %self.graph_name, node = %current, max_hops, "Hop limit reached");
                return Err(GraphError::MaxHopsExceeded(max_hops));
            }

            let node = self.node(&current)?;
            debug!(graph = %self.graph_name, node = %current, hop = hops, "Executing node");

            let output = self.execute_node(ctx, &current, node.as_ref(), &state).await?;
            debug!(
                node = %current,
                appended = output.messages().len(),
                "Node execution complete"
            );
            state.append(output);

            current = self.resolve_next(&current, &state).await?;
        }

        info!(
            graph = %self.graph_name,
            trace_id = %ctx.trace_id,
            hops,
            messages = state.len(),
            "Graph run finished"
        );
        Ok(state)
    }

    async fn execute_node(
        &self,
        ctx: &Context,
        name: &str,
        node: &dyn Node,
        state: &MessagesState,
    ) -> GraphResult<NodeOutput> {
        let timeout = self.configs.get(name).and_then(|config| config.timeout);

        let result = tokio::select! {
            biased;
            _ = ctx.cancellation().cancelled() => {
                warn!(graph = %self.graph_name, node = %name, "Graph run cancelled mid-step");
                return Err(GraphError::Cancelled);
            }
            result = with_timeout(node.process(ctx, state), timeout) => result,
        };

        // A nested run observing the same token finishes with its own error
        if ctx.is_cancelled() {
            warn!(graph = %self.graph_name, node = %name, "Graph run cancelled mid-step");
            return Err(GraphError::Cancelled);
        }

        result.map_err(|source| {
            warn!(graph = %self.graph_name, node = %name, error = %source, "Node failed");
            GraphError::StepExecution {
                node: name.to_string(),
                source,
            }
        })
    }
}

async fn with_timeout<F>(step: F, timeout: Option<Duration>) -> NodeResult
where
    F: Future<Output = NodeResult>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, step)
            .await
            .unwrap_or_else(|_| Err(NodeError::Timeout(limit))),
        None => step.await,
    }
}

/// A built graph can be nested inside another graph. It runs against a copy
/// of the outer state and contributes the messages it appended.
#[async_trait]
impl Node for Graph<Built> {
    async fn process(&self, ctx: &Context, state: &MessagesState) -> NodeResult {
        let final_state = self
            .run(&ctx.child(), state.clone())
            .await
            .map_err(|e| NodeError::SubgraphExecution(e.to_string()))?;
        Ok(NodeOutput::new(final_state.since(state.len()).to_vec()))
    }

    fn name(&self) -> &str {
        &self.graph_name
    }
}
