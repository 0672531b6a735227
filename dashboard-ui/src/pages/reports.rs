use crate::components::page_shell::PageShell;
use crate::components::report_card::ReportCard;
use crate::components::report_modal::ReportModal;
use crate::components::source_modal::SourceModal;
use crate::state::use_app;
use chrono::{Local, NaiveDate};
use dashboard_core::model::{Report, ReportPeriod, Source};
use dashboard_core::reports::{self, Direction, ReportQuery, TeamFilter};
use dashboard_core::DataProvider;
use leptos::*;

const PERIODS: [(ReportPeriod, &str); 3] = [
    (ReportPeriod::Daily, "Daily"),
    (ReportPeriod::Weekly, "Weekly"),
    (ReportPeriod::Monthly, "Monthly"),
];

fn step_label(period: ReportPeriod, direction: Direction) -> &'static str {
    match (period, direction) {
        (ReportPeriod::Daily, Direction::Prev) => "Previous Day",
        (ReportPeriod::Daily, Direction::Next) => "Next Day",
        (ReportPeriod::Weekly, Direction::Prev) => "Previous Week",
        (ReportPeriod::Weekly, Direction::Next) => "Next Week",
        (ReportPeriod::Monthly, Direction::Prev) => "Previous Month",
        (ReportPeriod::Monthly, Direction::Next) => "Next Month",
    }
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let app = use_app();
    let provider = app.provider.clone();
    let teams = app.provider.teams();

    let query = create_rw_signal(ReportQuery::daily(Local::now().date_naive()));
    let selected_report = create_rw_signal(None::<Report>);
    let selected_source = create_rw_signal(None::<Source>);

    let found = create_memo(move |_| query.with(|q| provider.reports(q)));
    let go = move |direction: Direction| {
        query.update(|q| q.anchor = reports::step(q.period, q.anchor, direction));
    };

    view! {
      <PageShell>
        <header class="reports-header">
          <div>
            <h1>{move || query.with(|q| reports::period_label(q.period, q.anchor))}</h1>
            <p class="caption">{move || query.with(|q| reports::period_caption(q.period))}</p>
          </div>
          <div class="controls">
            <div class="button-group">
              {PERIODS
                .into_iter()
                .map(|(period, label)| view! {
                  <button
                    class:active=move || query.with(|q| q.period == period)
                    on:click=move |_| query.update(|q| q.period = period)
                  >
                    {label}
                  </button>
                })
                .collect_view()}
            </div>
            <select on:change=move |ev| {
                let team = TeamFilter::from_value(&event_target_value(&ev));
                query.update(|q| q.team = team);
            }>
              <option value="all" prop:selected=move || query.with(|q| q.team == TeamFilter::All)>
                "All Teams"
              </option>
              {teams
                .into_iter()
                .map(|team| {
                    let id = team.id.clone();
                    view! {
                      <option
                        value=team.id
                        prop:selected=move || query.with(|q| q.team.value() == id)
                      >
                        {team.name}
                      </option>
                    }
                })
                .collect_view()}
            </select>
            <button class="outline" on:click=move |_| go(Direction::Prev)>
              {move || query.with(|q| step_label(q.period, Direction::Prev))}
            </button>
            <button class="outline" on:click=move |_| go(Direction::Next)>
              {move || query.with(|q| step_label(q.period, Direction::Next))}
            </button>
            <input
              type="date"
              prop:value=move || query.with(|q| q.anchor.format("%Y-%m-%d").to_string())
              on:change=move |ev| {
                  match NaiveDate::parse_from_str(&event_target_value(&ev), "%Y-%m-%d") {
                      Ok(anchor) => query.update(|q| q.anchor = anchor),
                      Err(err) => logging::warn!("ignoring picked date: {err}"),
                  }
              }
            />
          </div>
        </header>

        <Show
          when=move || found.with(|r| !r.is_empty())
          fallback=|| view! { <p class="empty">"No reports for this period."</p> }
        >
          <div class="card-grid">
            <For
              each=move || found.get()
              key=|report: &Report| (report.id.clone(), report.date)
              children=move |report: Report| view! {
                <ReportCard report=report on_open=move |r| selected_report.set(Some(r))/>
              }
            />
          </div>
        </Show>

        <ReportModal selected=selected_report on_source=move |source| selected_source.set(Some(source))/>
        <SourceModal source=selected_source/>
      </PageShell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_labels_follow_period() {
        assert_eq!(step_label(ReportPeriod::Weekly, Direction::Prev), "Previous Week");
        assert_eq!(step_label(ReportPeriod::Monthly, Direction::Next), "Next Month");
    }
}
