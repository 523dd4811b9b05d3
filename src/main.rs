use anyhow::Context as _;
use std::sync::Arc;
use stepgraph::{calculator, location, output, zork, Settings};
use stepgraph_core::{
    Built, ChatModel, Context, Graph, KeyValueStore, MemoryStore, Message, MessagesState,
    OpenAiChatModel,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn run_and_print(graph: &Graph<Built>, input: &str) -> anyhow::Result<()> {
    let ctx = Context::default();
    let state = graph
        .run(&ctx, MessagesState::from(vec![Message::human(input)]))
        .await
        .with_context(|| format!("running {}", graph.name()))?;
    print!("{}", output::render_transcript(&state));
    Ok(())
}

fn heading(title: &str) {
    println!();
    println!("{}", title);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let settings = Settings::from_env().context("loading settings")?;
    info!(model = %settings.model, max_hops = settings.max_hops, "Settings loaded");

    let model: Arc<dyn ChatModel> =
        Arc::new(OpenAiChatModel::new(settings.api_key.clone()).with_options(settings.chat_options()));
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let run_config = settings.run_config();

    heading("Running just a graph");
    let chain = zork::linear_chain(
        model.clone(),
        store.clone(),
        zork::AgentVariant::Model,
        run_config.clone(),
    )
    .context("building linear chain")?;
    run_and_print(&chain, "What is Zork?").await?;

    let conditional = zork::conditional_edges(
        model.clone(),
        store.clone(),
        zork::RoutingVariant::ByTopic,
        run_config.clone(),
    )
    .context("building conditional edges")?;
    heading("Running conditional edges with a question about Zork");
    run_and_print(&conditional, "What is Zork?").await?;
    heading("Running conditional edges with a question about France");
    run_and_print(&conditional, "What is the capital of France?").await?;

    heading("Running structured output");
    let parser = location::structured_output(model.clone(), run_config.clone())
        .context("building structured output")?;
    run_and_print(&parser, location::KITCHEN).await?;

    let structured = zork::structured_routing(model.clone(), run_config.clone())
        .context("building structured routing")?;
    heading("Running structured routing with a Zork question");
    run_and_print(&structured, "What is Zork?").await?;
    heading("Running structured routing with a non-Zork question");
    run_and_print(&structured, "What is the capital of France?").await?;

    heading("Running the calculator");
    let registry = Arc::new(calculator::registry().context("registering calculator tools")?);
    let calc = calculator::calculator_graph(model, registry, run_config)
        .context("building calculator")?;
    let question = "what is 2+3+5?";
    let answer = calculator::ask(&calc, &Context::default(), question)
        .await
        .context("running calculator")?;
    println!("human:\n{}", question);
    println!("ai:\n{}", answer);
    println!();

    Ok(())
}
