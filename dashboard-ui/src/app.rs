use crate::components::sidebar::Sidebar;
use crate::pages::{DashboardPage, ReportsPage, SearchPage, TeamPage};
use crate::state::AppContext;
use crate::storage::LocalStorageChatStore;
use dashboard_core::config::SimulationConfig;
use dashboard_core::FixtureProvider;
use leptos::*;
use leptos_router::*;
use std::rc::Rc;

#[component]
pub fn App() -> impl IntoView {
    let provider = match FixtureProvider::load().and_then(|p| p.validate().map(|()| p)) {
        Ok(provider) => provider,
        Err(err) => {
            logging::error!("fixtures failed to load: {err}");
            return view! { <pre class="error">{format!("Failed to load demo data\n{err}")}</pre> }
                .into_view();
        }
    };

    provide_context(AppContext {
        provider: Rc::new(provider),
        config: SimulationConfig::default(),
        store: LocalStorageChatStore,
    });

    view! {
      <Router>
        <div class="layout">
          <Sidebar/>
          <main class="content">
            <Routes>
              <Route path="/" view=DashboardPage/>
              <Route path="/daily-reports" view=ReportsPage/>
              <Route path="/search" view=SearchPage/>
              <Route path="/team" view=TeamPage/>
            </Routes>
          </main>
        </div>
      </Router>
    }
    .into_view()
}
