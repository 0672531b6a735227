use crate::state::AppState;
use chrono::{DateTime, NaiveDate, Utc};
use dashboard_core::actions::ActionBoard;
use dashboard_core::model::{AppType, Report, ReportPeriod};
use dashboard_core::reports::{self, ReportQuery, TeamFilter};
use dashboard_core::sidebar::{format_relative, is_default_chat, recent_chats};
use dashboard_core::{DataProvider, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportCardDto {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub summary: String,
    pub date: String,
    pub team: Option<String>,
    pub apps: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportListDto {
    pub label: String,
    pub caption: String,
    pub reports: Vec<ReportCardDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionItemDto {
    pub id: String,
    pub title: String,
    pub app: String,
    pub source: String,
    pub created_at: String,
    pub flagged: bool,
    pub completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlertDto {
    pub id: String,
    pub level: String,
    pub title: String,
    pub message: String,
    pub impact: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub manager: Option<String>,
    pub members: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecentChatDto {
    pub id: String,
    pub title: String,
    pub age: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardDto {
    pub reports: Vec<ReportCardDto>,
    pub action_items: Vec<ActionItemDto>,
    pub alerts: Vec<AlertDto>,
}

fn report_card(report: &Report) -> ReportCardDto {
    ReportCardDto {
        id: report.id.clone(),
        title: report.title.clone(),
        icon: report.icon.clone(),
        summary: report.summary.clone(),
        date: report.date.to_string(),
        team: report.team.clone(),
        apps: report
            .app_types()
            .into_iter()
            .map(|app| app.label().to_string())
            .collect(),
    }
}

pub fn list_reports(state: &AppState, query: &ReportQuery) -> ReportListDto {
    let selected = state.provider.reports(query);
    ReportListDto {
        label: reports::period_label(query.period, query.anchor),
        caption: reports::period_caption(query.period).to_string(),
        reports: selected.iter().map(report_card).collect(),
    }
}

pub fn list_action_items(board: &ActionBoard, now: DateTime<Utc>) -> Vec<ActionItemDto> {
    board
        .visible(now)
        .into_iter()
        .map(|item| ActionItemDto {
            id: item.id.clone(),
            title: item.title.clone(),
            app: item.app_type.label().to_string(),
            source: item.source.title.clone(),
            created_at: item.created_at.to_rfc3339(),
            flagged: board.is_flagged(&item.id),
            completed: board.is_completed(&item.id),
        })
        .collect()
}

pub fn list_alerts(state: &AppState) -> Vec<AlertDto> {
    state
        .provider
        .alerts()
        .into_iter()
        .map(|alert| AlertDto {
            id: alert.id,
            level: format!("{:?}", alert.level).to_lowercase(),
            title: alert.title,
            message: alert.message,
            impact: alert.impact,
        })
        .collect()
}

pub fn list_teams(state: &AppState) -> Vec<TeamDto> {
    let directory = state.team_directory();
    directory
        .teams()
        .iter()
        .map(|team| TeamDto {
            id: team.id.clone(),
            name: team.name.clone(),
            description: team.description.clone(),
            manager: directory.user(&team.manager_id).map(|u| u.name.clone()),
            members: directory
                .members_of(&team.id)
                .into_iter()
                .map(|u| u.name.clone())
                .collect(),
        })
        .collect()
}

pub fn list_recent_chats(state: &AppState, now: DateTime<Utc>) -> Result<Vec<RecentChatDto>> {
    let stored = state.store.load()?;
    Ok(recent_chats(stored, now)
        .into_iter()
        .map(|chat| RecentChatDto {
            age: format_relative(&chat.created_at, now),
            id: chat.id,
            title: chat.title,
        })
        .collect())
}

/// Deletes a saved chat. The built-in history entries are never removed.
pub fn forget_chat(state: &AppState, chat_id: &str) -> Result<bool> {
    if is_default_chat(chat_id) {
        tracing::warn!(chat_id, "built-in chats cannot be deleted");
        return Ok(false);
    }
    state.store.remove(chat_id)
}

/// Landing view: today's daily reports, open action items and alerts.
pub fn dashboard(state: &AppState, today: NaiveDate, now: DateTime<Utc>) -> DashboardDto {
    let board = state.action_board();
    DashboardDto {
        reports: list_reports(state, &ReportQuery::daily(today)).reports,
        action_items: list_action_items(&board, now),
        alerts: list_alerts(state),
    }
}

pub fn report_query(period: ReportPeriod, anchor: NaiveDate, team: &str) -> ReportQuery {
    ReportQuery {
        period,
        anchor,
        team: TeamFilter::from_value(team),
    }
}

pub fn parse_app(value: &str) -> Option<AppType> {
    AppType::FILTERABLE
        .into_iter()
        .find(|app| format!("{app:?}").eq_ignore_ascii_case(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dashboard_core::config::SimulationConfig;
    use dashboard_core::model::ChatRecord;
    use dashboard_core::store::{ChatStore, MemoryChatStore};
    use dashboard_core::FixtureProvider;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState {
            provider: Arc::new(FixtureProvider::load().expect("load")),
            store: Arc::new(MemoryChatStore::new()),
            config: SimulationConfig::default(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn dashboard_lists_reports_for_today() {
        let state = state();
        let view = dashboard(&state, now().date_naive(), now());
        assert!(!view.reports.is_empty());
        assert!(view.reports.iter().all(|r| r.date == "2025-11-20"));
        assert_eq!(view.alerts.len(), 3);
        assert_eq!(view.alerts[0].level, "critical");
    }

    #[test]
    fn team_filter_narrows_weekly_reports() {
        let state = state();
        let anchor = now().date_naive();
        let all = list_reports(&state, &report_query(ReportPeriod::Weekly, anchor, "all"));
        let marketing = list_reports(
            &state,
            &report_query(ReportPeriod::Weekly, anchor, "team_003"),
        );
        assert_eq!(all.label, "Nov 16 - Nov 22, 2025");
        assert!(marketing.reports.len() <= all.reports.len());
        assert!(marketing
            .reports
            .iter()
            .all(|r| r.team.is_none() || r.team.as_deref() == Some("team_003")));
    }

    #[test]
    fn recent_chats_put_stored_first() {
        let state = state();
        state
            .store
            .prepend(ChatRecord {
                id: "chat_9".into(),
                title: "Pipeline".into(),
                created_at: now().to_rfc3339(),
            })
            .expect("prepend");

        let chats = list_recent_chats(&state, now()).expect("recent");
        assert_eq!(chats.len(), 4);
        assert_eq!(chats[0].id, "chat_9");
        assert_eq!(chats[0].age, "Just now");
    }

    #[test]
    fn forget_skips_builtin_chats() {
        let state = state();
        state
            .store
            .prepend(ChatRecord {
                id: "chat_9".into(),
                title: "Pipeline".into(),
                created_at: now().to_rfc3339(),
            })
            .expect("prepend");

        assert!(!forget_chat(&state, "chat_001").expect("builtin"));
        assert!(forget_chat(&state, "chat_9").expect("forget"));
        assert_eq!(list_recent_chats(&state, now()).expect("recent").len(), 3);
    }

    #[test]
    fn teams_resolve_manager_names() {
        let teams = list_teams(&state());
        assert!(!teams.is_empty());
        assert!(teams.iter().all(|t| t.manager.is_some()));
    }

    #[test]
    fn filtered_actions_only_show_selected_app() {
        let state = state();
        let mut board = state.action_board();
        board.toggle_filter(parse_app("slack").expect("slack"));
        let items = list_action_items(&board, now());
        assert!(items.iter().all(|i| i.app == "Slack"));
        assert_eq!(parse_app("quickbooks"), None);
    }
}
