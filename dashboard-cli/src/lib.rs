pub mod commands;
pub mod runtime;
pub mod state;

use crate::runtime::{ChatOutcome, StdoutSink};
use crate::state::AppState;
use chrono::Utc;
use dashboard_core::chat::{ChatSession, RandomSteps};
use dashboard_core::config::SimulationConfig;
use dashboard_core::store::SqliteChatStore;
use dashboard_core::{DashboardError, DataProvider, FixtureProvider};
use std::sync::Arc;
use tokio::sync::watch;

pub fn build_state(db_path: &str) -> dashboard_core::Result<AppState> {
    build_state_with(db_path, SimulationConfig::from_env())
}

pub fn build_state_with(
    db_path: &str,
    config: SimulationConfig,
) -> dashboard_core::Result<AppState> {
    let provider = FixtureProvider::load()?;
    provider.validate()?;
    let store = SqliteChatStore::open(db_path)?;
    tracing::debug!(db_path, "chat store opened");

    Ok(AppState {
        provider: Arc::new(provider),
        store: Arc::new(store),
        config,
    })
}

fn print_json<T: serde::Serialize>(label: &str, value: &T) -> anyhow::Result<()> {
    println!("{label}:\n{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the landing view plus the sidebar's recent chats.
pub fn run_demo(state: &AppState) -> anyhow::Result<()> {
    let now = Utc::now();
    let view = commands::dashboard(state, now.date_naive(), now);
    print_json("reports", &view.reports)?;
    print_json("action items", &view.action_items)?;
    print_json("alerts", &view.alerts)?;
    print_json("recent chats", &commands::list_recent_chats(state, now)?)?;
    Ok(())
}

/// Runs one simulated search on the terminal. Ctrl-C cancels the reply.
pub async fn run_search(state: &AppState, query: &str) -> anyhow::Result<ChatOutcome> {
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    let mut session = ChatSession::new(state.config.clone());
    let mut steps = RandomSteps::new(&state.config);
    let mut sink = StdoutSink::default();
    let outcome = runtime::run_chat(
        &mut session,
        query,
        state.provider.as_ref(),
        state.store.as_ref(),
        &mut steps,
        &mut sink,
        cancel_rx,
    )
    .await;
    ctrl_c.abort();

    Ok(outcome?)
}

/// Prints a stored canned conversation.
pub fn show_conversation(state: &AppState, id: &str) -> anyhow::Result<()> {
    let conversation = state
        .provider
        .conversation(id)
        .ok_or_else(|| DashboardError::DanglingReference {
            owner: "search".into(),
            kind: "conversation",
            id: id.to_string(),
        })?;
    let session = ChatSession::open(state.config.clone(), &conversation);
    println!("# {}", conversation.title);
    for message in session.transcript() {
        println!("\n[{:?}]\n{}", message.role, message.content);
        for (app, sources) in message.grouped_sources() {
            println!("  {} ({})", app.label(), sources.len());
        }
    }
    Ok(())
}
