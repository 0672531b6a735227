use dashboard_core::actions::ActionBoard;
use dashboard_core::config::SimulationConfig;
use dashboard_core::store::ChatStore;
use dashboard_core::teams::TeamDirectory;
use dashboard_core::{DataProvider, FixtureProvider};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<FixtureProvider>,
    pub store: Arc<dyn ChatStore + Send + Sync>,
    pub config: SimulationConfig,
}

impl AppState {
    pub fn action_board(&self) -> ActionBoard {
        ActionBoard::new(self.provider.action_items())
    }

    pub fn team_directory(&self) -> TeamDirectory {
        TeamDirectory::new(self.provider.users(), self.provider.teams())
    }
}
