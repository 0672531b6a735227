use crate::components::text::preview;
use dashboard_core::model::Report;
use leptos::*;

const SUMMARY_PREVIEW: usize = 160;

#[component]
pub fn ReportCard(report: Report, #[prop(into)] on_open: Callback<Report>) -> impl IntoView {
    let apps = report.app_types();
    let summary = preview(&report.summary, SUMMARY_PREVIEW);
    let title = report.title.clone();
    let icon = report.icon.clone();

    view! {
      <article class="report-card" on:click=move |_| on_open.call(report.clone())>
        <div class="report-icon">{icon}</div>
        <h3>{title}</h3>
        <p class="summary">{summary}</p>
        <div class="logos">
          {apps
            .into_iter()
            .map(|app| view! { <img src=app.logo_path() alt=app.label() title=app.label()/> })
            .collect_view()}
        </div>
      </article>
    }
}
