use crate::components::text::RichText;
use dashboard_core::model::{Report, Source};
use leptos::*;

/// Full report with its sources. Clicking a source hands it to `on_source`.
#[component]
pub fn ReportModal(
    selected: RwSignal<Option<Report>>,
    #[prop(into)] on_source: Callback<Source>,
) -> impl IntoView {
    move || {
        selected.get().map(|report| {
            let date = report.date.format("%B %-d, %Y").to_string();
            let Report {
                icon,
                title,
                summary,
                sources,
                ..
            } = report;
            let source_count = format!("Sources ({})", sources.len());
            view! {
              <div class="modal-backdrop" on:click=move |_| selected.set(None)>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                  <header>
                    <span class="report-icon">{icon}</span>
                    <div>
                      <h2>{title}</h2>
                      <div class="meta">{date}</div>
                    </div>
                    <button class="close" on:click=move |_| selected.set(None)>"×"</button>
                  </header>
                  <RichText text=summary/>
                  <h3>{source_count}</h3>
                  <ul class="sources">
                    {sources
                      .into_iter()
                      .map(|source| {
                          let app = source.app_type;
                          let title = source.title.clone();
                          let subtitle = source.subtitle.clone();
                          view! {
                            <li on:click=move |_| on_source.call(source.clone())>
                              <img src=app.logo_path() alt=app.label()/>
                              <div>
                                <div>{title}</div>
                                <div class="meta">{subtitle}</div>
                              </div>
                            </li>
                          }
                      })
                      .collect_view()}
                  </ul>
                </div>
              </div>
            }
        })
    }
}
