use super::*;
use async_trait::async_trait;
use rand::Rng;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use stepgraph_core::{decode_structured, KeyValueStore, MessagesState, NodeError, Router};

fn target(is_zork: bool) -> String {
    let next = if is_zork { AGENT } else { REJECTOR };
    next.to_string()
}

/// Routes on the text router's bare-word reply
pub fn route_by_topic(state: &MessagesState) -> String {
    let is_zork = state
        .last_message()
        .map(|m| m.text_content().trim() == "zork")
        .unwrap_or(false);
    target(is_zork)
}

/// Coin-flip routing, ignores the conversation
pub fn route_randomly(_state: &MessagesState) -> String {
    target(rand::thread_rng().gen_bool(0.5))
}

/// Routes on the `zork:topic` value held in the store
pub struct RouteByConfig {
    store: Arc<dyn KeyValueStore>,
}

impl RouteByConfig {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Router for RouteByConfig {
    async fn route(&self, _state: &MessagesState) -> Result<String, NodeError> {
        let topic = self.store.get(TOPIC_KEY).await?;
        Ok(target(topic.as_deref() == Some("zork")))
    }
}

impl Debug for RouteByConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteByConfig").finish()
    }
}

/// Routes on the [`TopicResponse`] appended by the structured router.
///
/// A last message that does not decode as a `TopicResponse` fails the route.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredTopicRouter;

#[async_trait]
impl Router for StructuredTopicRouter {
    async fn route(&self, state: &MessagesState) -> Result<String, NodeError> {
        let last = state
            .last_message()
            .ok_or_else(|| NodeError::Execution("no message to route on".to_string()))?;
        let response: TopicResponse = decode_structured(last)?;
        Ok(target(response.topic == Topic::Zork))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stepgraph_core::{MemoryStore, Message};

    #[test]
    fn text_routing() {
        let zork = MessagesState::from(vec![Message::human("What is Zork?"), Message::ai("zork")]);
        assert_eq!(route_by_topic(&zork), AGENT);

        let other = MessagesState::from(vec![Message::ai("other")]);
        assert_eq!(route_by_topic(&other), REJECTOR);

        // Anything that is not exactly the word is off-topic
        let chatty = MessagesState::from(vec![Message::ai("I think zork")]);
        assert_eq!(route_by_topic(&chatty), REJECTOR);
        assert_eq!(route_by_topic(&MessagesState::new()), REJECTOR);
    }

    #[test]
    fn random_routing_stays_in_bounds() {
        for _ in 0..50 {
            let next = route_randomly(&MessagesState::new());
            assert!(next == AGENT || next == REJECTOR);
        }
    }

    #[tokio::test]
    async fn config_routing_reads_store() {
        let store = Arc::new(MemoryStore::new());
        let router = RouteByConfig::new(store.clone());
        let state = MessagesState::new();

        assert_eq!(router.route(&state).await.unwrap(), REJECTOR);

        store.set(TOPIC_KEY, "zork".to_string()).await.unwrap();
        assert_eq!(router.route(&state).await.unwrap(), AGENT);

        store.set(TOPIC_KEY, "france".to_string()).await.unwrap();
        assert_eq!(router.route(&state).await.unwrap(), REJECTOR);
    }

    #[tokio::test]
    async fn structured_routing_decodes_topic() {
        let router = StructuredTopicRouter;

        let zork = MessagesState::from(vec![Message::structured(json!({ "topic": "zork" }))]);
        assert_eq!(router.route(&zork).await.unwrap(), AGENT);

        let other = MessagesState::from(vec![Message::structured(json!({ "topic": "other" }))]);
        assert_eq!(router.route(&other).await.unwrap(), REJECTOR);

        let garbled = MessagesState::from(vec![Message::structured(json!({ "topic": "france" }))]);
        assert!(matches!(
            router.route(&garbled).await,
            Err(NodeError::Model(stepgraph_core::ModelError::SchemaViolation(_)))
        ));
    }
}
