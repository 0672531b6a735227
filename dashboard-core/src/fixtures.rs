use crate::error::{DashboardError, Result};
use crate::model::{
    ActionItem, Alert, AppType, ChatMessage, ChatRole, Conversation, Report, ReportPeriod, Source,
    Team, User,
};
use crate::reports::{self, ReportQuery};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// Conversation whose reply is replayed for every search.
pub const DEMO_CONVERSATION_ID: &str = "chat_004";

/// Read side of the dashboard's data. Presentation code only talks to this
/// trait so the fixtures can be swapped for a real backend.
pub trait DataProvider {
    fn reports(&self, query: &ReportQuery) -> Vec<Report>;
    fn report(&self, id: &str) -> Option<Report>;
    fn sources(&self) -> Vec<Source>;
    fn source(&self, id: &str) -> Option<Source>;
    fn action_items(&self) -> Vec<ActionItem>;
    fn alerts(&self) -> Vec<Alert>;
    fn users(&self) -> Vec<User>;
    fn teams(&self) -> Vec<Team>;
    fn conversations(&self) -> Vec<Conversation>;
    fn conversation(&self, id: &str) -> Option<Conversation>;

    /// Canned assistant reply used by the search simulation. Not matched
    /// against the query text.
    fn demo_reply(&self) -> Option<ChatMessage> {
        self.conversation(DEMO_CONVERSATION_ID)?
            .messages
            .into_iter()
            .find(|m| m.role == ChatRole::Assistant)
    }
}

const SOURCES_JSON: &str = include_str!("../fixtures/sources.json");
const REPORTS_JSON: &str = include_str!("../fixtures/reports.json");
const ACTION_ITEMS_JSON: &str = include_str!("../fixtures/action_items.json");
const ALERTS_JSON: &str = include_str!("../fixtures/alerts.json");
const DIRECTORY_JSON: &str = include_str!("../fixtures/directory.json");
const CONVERSATIONS_JSON: &str = include_str!("../fixtures/conversations.json");

#[derive(Deserialize)]
struct RawReport {
    id: String,
    title: String,
    icon: String,
    summary: String,
    source_ids: Vec<String>,
    date: Option<NaiveDate>,
    team: Option<String>,
    period: ReportPeriod,
}

#[derive(Deserialize)]
struct RawActionItem {
    id: String,
    title: String,
    created_at: DateTime<Utc>,
    source_id: String,
    app_type: AppType,
}

#[derive(Deserialize)]
struct RawMessage {
    role: ChatRole,
    content: String,
    #[serde(default)]
    source_ids: Vec<String>,
}

#[derive(Deserialize)]
struct RawConversation {
    id: String,
    title: String,
    messages: Vec<RawMessage>,
}

#[derive(Deserialize)]
struct RawDirectory {
    users: Vec<User>,
    teams: Vec<Team>,
}

struct StoredReport {
    report: Report,
    template: bool,
}

/// Mock data embedded in the binary.
pub struct FixtureProvider {
    sources: Vec<Source>,
    reports: Vec<StoredReport>,
    action_items: Vec<ActionItem>,
    alerts: Vec<Alert>,
    users: Vec<User>,
    teams: Vec<Team>,
    conversations: Vec<Conversation>,
}

fn parse<T: DeserializeOwned>(name: &'static str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| DashboardError::Fixture {
        name,
        reason: e.to_string(),
    })
}

impl FixtureProvider {
    pub fn load() -> Result<Self> {
        let sources: Vec<Source> = parse("sources", SOURCES_JSON)?;
        let by_id: HashMap<&str, &Source> = sources.iter().map(|s| (s.id.as_str(), s)).collect();

        let resolve = |owner: &str, id: &str| -> Result<Source> {
            by_id
                .get(id)
                .map(|s| (*s).clone())
                .ok_or_else(|| DashboardError::DanglingReference {
                    owner: owner.to_string(),
                    kind: "source",
                    id: id.to_string(),
                })
        };

        let mut reports = Vec::new();
        for raw in parse::<Vec<RawReport>>("reports", REPORTS_JSON)? {
            let sources = raw
                .source_ids
                .iter()
                .map(|id| resolve(&raw.id, id))
                .collect::<Result<Vec<_>>>()?;
            reports.push(StoredReport {
                template: raw.date.is_none(),
                report: Report {
                    id: raw.id,
                    title: raw.title,
                    icon: raw.icon,
                    summary: raw.summary,
                    sources,
                    date: raw.date.unwrap_or(NaiveDate::MIN),
                    team: raw.team,
                    period: raw.period,
                },
            });
        }

        let mut action_items = Vec::new();
        for raw in parse::<Vec<RawActionItem>>("action_items", ACTION_ITEMS_JSON)? {
            let source = resolve(&raw.id, &raw.source_id)?;
            action_items.push(ActionItem {
                id: raw.id,
                title: raw.title,
                created_at: raw.created_at,
                source,
                app_type: raw.app_type,
            });
        }

        let mut conversations = Vec::new();
        for raw in parse::<Vec<RawConversation>>("conversations", CONVERSATIONS_JSON)? {
            let mut messages = Vec::new();
            for msg in raw.messages {
                let sources = msg
                    .source_ids
                    .iter()
                    .map(|id| resolve(&raw.id, id))
                    .collect::<Result<Vec<_>>>()?;
                messages.push(ChatMessage {
                    role: msg.role,
                    content: msg.content,
                    sources,
                });
            }
            conversations.push(Conversation {
                id: raw.id,
                title: raw.title,
                messages,
            });
        }

        let directory: RawDirectory = parse("directory", DIRECTORY_JSON)?;
        let provider = Self {
            alerts: parse("alerts", ALERTS_JSON)?,
            sources,
            reports,
            action_items,
            users: directory.users,
            teams: directory.teams,
            conversations,
        };

        tracing::debug!(
            sources = provider.sources.len(),
            reports = provider.reports.len(),
            action_items = provider.action_items.len(),
            "fixtures loaded"
        );
        Ok(provider)
    }

    /// Checks the hand-maintained id references between fixtures.
    pub fn validate(&self) -> Result<()> {
        let dangling = |owner: &str, kind: &'static str, id: &str| DashboardError::DanglingReference {
            owner: owner.to_string(),
            kind,
            id: id.to_string(),
        };

        for item in &self.action_items {
            if item.source.app_type != item.app_type {
                return Err(DashboardError::Fixture {
                    name: "action_items",
                    reason: format!("{} app type disagrees with its source", item.id),
                });
            }
        }

        for report in &self.reports {
            if let Some(team) = report.report.team.as_deref() {
                if self.team_ref(team).is_none() {
                    return Err(dangling(&report.report.id, "team", team));
                }
            }
        }

        for team in &self.teams {
            if self.user_ref(&team.manager_id).is_none() {
                return Err(dangling(&team.id, "user", &team.manager_id));
            }
            for member in &team.member_ids {
                let Some(user) = self.user_ref(member) else {
                    return Err(dangling(&team.id, "user", member));
                };
                if !user.teams.contains(&team.id) {
                    return Err(DashboardError::Fixture {
                        name: "directory",
                        reason: format!("{} lists {} but not the reverse", team.id, user.id),
                    });
                }
            }
        }

        for user in &self.users {
            for team_id in &user.teams {
                let Some(team) = self.team_ref(team_id) else {
                    return Err(dangling(&user.id, "team", team_id));
                };
                if !team.member_ids.contains(&user.id) {
                    return Err(DashboardError::Fixture {
                        name: "directory",
                        reason: format!("{} lists {} but not the reverse", user.id, team.id),
                    });
                }
            }
        }

        if self.demo_reply().is_none() {
            return Err(dangling("search", "conversation", DEMO_CONVERSATION_ID));
        }
        Ok(())
    }

    fn user_ref(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn team_ref(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }
}

impl DataProvider for FixtureProvider {
    fn reports(&self, query: &ReportQuery) -> Vec<Report> {
        reports::select(
            self.reports.iter().map(|r| (&r.report, r.template)),
            query,
        )
    }

    fn report(&self, id: &str) -> Option<Report> {
        self.reports
            .iter()
            .find(|r| r.report.id == id)
            .map(|r| r.report.clone())
    }

    fn sources(&self) -> Vec<Source> {
        self.sources.clone()
    }

    fn source(&self, id: &str) -> Option<Source> {
        self.sources.iter().find(|s| s.id == id).cloned()
    }

    fn action_items(&self) -> Vec<ActionItem> {
        self.action_items.clone()
    }

    fn alerts(&self) -> Vec<Alert> {
        self.alerts.clone()
    }

    fn users(&self) -> Vec<User> {
        self.users.clone()
    }

    fn teams(&self) -> Vec<Team> {
        self.teams.clone()
    }

    fn conversations(&self) -> Vec<Conversation> {
        self.conversations.clone()
    }

    fn conversation(&self, id: &str) -> Option<Conversation> {
        self.conversations.iter().find(|c| c.id == id).cloned()
    }
}
