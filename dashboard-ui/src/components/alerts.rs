use crate::state::use_app;
use dashboard_core::model::AlertLevel;
use dashboard_core::DataProvider;
use leptos::*;

fn level_class(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Critical => "critical",
        AlertLevel::Important => "important",
        AlertLevel::Opportunity => "opportunity",
        AlertLevel::Info => "info",
    }
}

#[component]
pub fn Alerts() -> impl IntoView {
    let alerts = use_app().provider.alerts();

    view! {
      <section class="panel alerts">
        <h2>"Alerts"</h2>
        <ul>
          {alerts
            .into_iter()
            .map(|alert| view! {
              <li class=format!("alert {}", level_class(alert.level))>
                <h3>{alert.title}</h3>
                <p>{alert.message}</p>
                <div class="impact">{alert.impact}</div>
              </li>
            })
            .collect_view()}
        </ul>
      </section>
    }
}
