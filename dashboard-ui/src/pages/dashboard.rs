use crate::components::action_items::ActionItems;
use crate::components::alerts::Alerts;
use crate::components::page_shell::PageShell;
use crate::components::report_card::ReportCard;
use crate::components::report_modal::ReportModal;
use crate::components::source_modal::SourceModal;
use crate::state::use_app;
use chrono::Local;
use dashboard_core::model::{ActionItem, Report, Source};
use dashboard_core::reports::ReportQuery;
use dashboard_core::sidebar::SEARCH;
use dashboard_core::DataProvider;
use leptos::*;
use leptos_router::*;

/// `/search?q=...` with the query URI-encoded.
fn search_url(query: &str) -> String {
    format!(
        "{}?q={}",
        SEARCH.href,
        String::from(js_sys::encode_uri_component(query))
    )
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app();
    let navigate = use_navigate();
    let today = Local::now().date_naive();
    let reports = app.provider.reports(&ReportQuery::daily(today));

    let selected_report = create_rw_signal(None::<Report>);
    let selected_source = create_rw_signal(None::<Source>);
    let selected_action = create_rw_signal(None::<ActionItem>);
    let input = create_rw_signal(String::new());

    let open_action = move |item: ActionItem| {
        selected_source.set(Some(item.source.clone()));
        selected_action.set(Some(item));
    };

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let query = input.get_untracked();
        if query.trim().is_empty() {
            return;
        }
        navigate(&search_url(query.trim()), Default::default());
    };

    view! {
      <PageShell>
        <div class="dashboard-grid">
          <section class="reports">
            <h2>"Today's Awareness Reports"</h2>
            <Show
              when={
                  let empty = reports.is_empty();
                  move || !empty
              }
              fallback=|| view! { <p class="empty">"No reports for today yet."</p> }
            >
              <div class="card-grid">
                {reports
                  .clone()
                  .into_iter()
                  .map(|report| view! {
                    <ReportCard report=report on_open=move |r| selected_report.set(Some(r))/>
                  })
                  .collect_view()}
              </div>
            </Show>
            <ActionItems on_open=open_action/>
          </section>
          <Alerts/>
        </div>

        <form class="ask" on:submit=submit>
          <textarea
            placeholder="Ask anything..."
            prop:value=move || input.get()
            on:input=move |ev| input.set(event_target_value(&ev))
          ></textarea>
          <button type="submit" disabled=move || input.with(|q| q.trim().is_empty())>"↑"</button>
        </form>

        <ReportModal
          selected=selected_report
          on_source=move |source| {
              selected_action.set(None);
              selected_source.set(Some(source));
          }
        />
        <SourceModal source=selected_source action=selected_action/>
      </PageShell>
    }
}
