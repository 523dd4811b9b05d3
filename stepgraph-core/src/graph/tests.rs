#[cfg(test)]
mod tests {
    use crate::*;
    use std::sync::Arc;

    fn reply(name: &'static str, text: &'static str) -> impl Node {
        FunctionNode::new(name, move |_ctx, _state: MessagesState| async move {
            Ok(NodeOutput::message(Message::ai(text)))
        })
    }

    fn topic_router(state: &MessagesState) -> String {
        match state.last_message() {
            Some(m) if m.text_content() == "zork" => "agent".to_string(),
            _ => "rejector".to_string(),
        }
    }

    // Test edge creation and debug formatting
    #[test]
    fn test_edge_creation_and_debug() {
        let direct_edge = Edge::Direct("next".to_string());
        assert!(format!("{:?}", direct_edge).contains("Direct"));

        let cond_edge = Edge::Conditional {
            condition: Arc::new(topic_router),
            targets: vec!["agent".to_string(), "rejector".to_string()],
        };
        let debug = format!("{:?}", cond_edge);
        assert!(debug.contains("Conditional"));
        assert!(debug.contains("rejector"));
        assert_eq!(cond_edge.targets(), vec!["agent", "rejector"]);
    }

    #[tokio::test]
    async fn test_closure_router() {
        let router: Condition = Arc::new(topic_router);

        let state = MessagesState::from(vec![Message::ai("zork")]);
        assert_eq!(router.route(&state).await.unwrap(), "agent");

        let state = MessagesState::from(vec![Message::ai("other")]);
        assert_eq!(router.route(&state).await.unwrap(), "rejector");
    }

    #[tokio::test]
    async fn test_resolve_next() {
        let mut graph = Graph::new("g");
        graph
            .add_node(reply("router", "zork"))
            .unwrap()
            .add_node(reply("agent", "answer"))
            .unwrap()
            .add_node(reply("rejector", "sorry"))
            .unwrap()
            .add_edge(START, "router")
            .unwrap()
            .add_conditional_edge("router", topic_router, ["agent", "rejector"])
            .unwrap()
            .add_edge("agent", END)
            .unwrap()
            .add_edge("rejector", END)
            .unwrap();
        let graph = graph.compile().unwrap();

        let state = MessagesState::from(vec![Message::ai("zork")]);
        assert_eq!(graph.resolve_next(START, &state).await.unwrap(), "router");
        assert_eq!(graph.resolve_next("router", &state).await.unwrap(), "agent");
        assert_eq!(graph.resolve_next("agent", &state).await.unwrap(), END);
        assert!(matches!(
            graph.resolve_next("missing", &state).await,
            Err(GraphError::DanglingNode(name)) if name == "missing"
        ));
        assert_eq!(graph.node_names(), vec!["agent", "rejector", "router"]);
        assert!(matches!(graph.node("ghost"), Err(GraphError::UnknownNode(_))));
    }

    #[test]
    fn test_reserved_names_rejected() {
        let mut graph = Graph::new("g");
        assert_eq!(
            graph.add_node(reply(START, "x")).err(),
            Some(CompileError::ReservedName(START.to_string()))
        );
        assert_eq!(
            graph.add_edge(END, "x").err(),
            Some(CompileError::ReservedName(END.to_string()))
        );
    }

    #[test]
    fn test_empty_allow_list_rejected() {
        let mut graph = Graph::new("g");
        graph
            .add_node(reply("router", "zork"))
            .unwrap()
            .add_edge(START, "router")
            .unwrap()
            .add_conditional_edge("router", topic_router, Vec::<String>::new())
            .unwrap();
        assert_eq!(
            graph.compile().err(),
            Some(CompileError::EmptyRouteTargets("router".to_string()))
        );
    }

    #[test]
    fn test_configuring_unknown_node_rejected() {
        let mut graph = Graph::new("g");
        graph
            .add_node(reply("agent", "hi"))
            .unwrap()
            .add_edge(START, "agent")
            .unwrap()
            .add_edge("agent", END)
            .unwrap()
            .configure_node("ghost", NodeConfig::default());
        assert_eq!(
            graph.compile().err(),
            Some(CompileError::UnknownNode("ghost".to_string()))
        );
    }

    #[test]
    fn test_run_config_default() {
        assert_eq!(RunConfig::default().max_hops, DEFAULT_MAX_HOPS);
        assert_eq!(RunConfig::default().with_max_hops(3).max_hops, 3);
    }
}
