use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use entity_store::client::{HttpTransport, Transport};
use entity_store::config::Config;
use entity_store::init_tracing;
use entity_store::resources::{Conversation, ConversationStore};
use entity_store::root::RootStore;

#[derive(Parser, Debug)]
#[command(name = "entity-store", version, about = "Load and print the cached conversation list")]
struct Cli {
    /// Path to a config file (default: platform config dir).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print only the conversation with this id.
    #[arg(long, value_name = "ID")]
    show: Option<i64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let transport: Arc<dyn Transport> =
        Arc::new(HttpTransport::new(&config.api).context("Failed to build HTTP client")?);
    let conversations = ConversationStore::from_config(&config, transport)?;
    let root = RootStore::builder()
        .register(conversations.reducer())?
        .build();

    println!("Loading...");
    // The failure is already stored in the collection; render from state.
    let _ = conversations.fetch_all(&root).await;

    if let Some(error) = conversations.select_error(&root) {
        println!("Error: {}", error.message);
        return Ok(ExitCode::FAILURE);
    }

    if let Some(id) = cli.show {
        return Ok(match conversations.select_by_id(&root, id) {
            Some(conversation) => {
                print_conversation(&conversation);
                ExitCode::SUCCESS
            }
            None => {
                println!("Conversation {} not found", id);
                ExitCode::FAILURE
            }
        });
    }

    let mut list = conversations.select_all(&root);
    list.sort_by_key(|c| c.id);

    println!("Conversations");
    for conversation in &list {
        print_conversation(conversation);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_conversation(conversation: &Conversation) {
    println!("- {}", conversation.title);
    println!("  {}", conversation.last_message);
    println!("  {}", conversation.timestamp);
}
