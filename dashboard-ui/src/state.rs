use crate::storage::LocalStorageChatStore;
use dashboard_core::config::SimulationConfig;
use dashboard_core::FixtureProvider;
use leptos::*;
use std::rc::Rc;

/// Shared, read-mostly handles every page pulls from context.
#[derive(Clone)]
pub struct AppContext {
    pub provider: Rc<FixtureProvider>,
    pub config: SimulationConfig,
    pub store: LocalStorageChatStore,
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}
