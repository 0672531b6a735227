use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Third-party integration a source record was pulled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    Gmail,
    Salesforce,
    Slack,
    Drive,
    Sheets,
    Quickbooks,
    #[serde(other)]
    Unknown,
}

impl AppType {
    pub const FILTERABLE: [AppType; 5] = [
        AppType::Gmail,
        AppType::Slack,
        AppType::Drive,
        AppType::Sheets,
        AppType::Salesforce,
    ];

    pub fn logo_path(self) -> &'static str {
        match self {
            AppType::Gmail => "/logos/gmail.webp",
            AppType::Salesforce => "/logos/salesforce.png",
            AppType::Slack => "/logos/slack.png",
            AppType::Drive => "/logos/drive.png",
            AppType::Sheets => "/logos/google-sheets.png",
            AppType::Quickbooks => "/logos/quickbooks.png",
            AppType::Unknown => "",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AppType::Gmail => "Gmail",
            AppType::Salesforce => "Salesforce",
            AppType::Slack => "Slack",
            AppType::Drive => "Google Drive",
            AppType::Sheets => "Google Sheets",
            AppType::Quickbooks => "QuickBooks",
            AppType::Unknown => "Other",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub app_type: AppType,
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub summary: String,
    pub sources: Vec<Source>,
    pub date: NaiveDate,
    pub team: Option<String>,
    pub period: ReportPeriod,
}

impl Report {
    /// Distinct integrations behind this report, in first-seen order.
    pub fn app_types(&self) -> Vec<AppType> {
        let mut out = Vec::new();
        for source in &self.sources {
            if !out.contains(&source.app_type) {
                out.push(source.app_type);
            }
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub source: Source,
    pub app_type: AppType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Critical,
    Important,
    Opportunity,
    #[serde(other)]
    Info,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
    pub impact: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Employee];

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub teams: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub manager_id: String,
    pub member_ids: Vec<String>,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            sources: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            sources,
        }
    }

    /// Sources bucketed by integration, preserving first-seen order.
    pub fn grouped_sources(&self) -> Vec<(AppType, Vec<&Source>)> {
        let mut groups: Vec<(AppType, Vec<&Source>)> = Vec::new();
        for source in &self.sources {
            match groups.iter_mut().find(|(app, _)| *app == source.app_type) {
                Some((_, bucket)) => bucket.push(source),
                None => groups.push((source.app_type, vec![source])),
            }
        }
        groups
    }
}

/// Canned question/answer pair used to fake an AI reply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
}

/// Recent-chat entry kept in the chat store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: String,
    pub title: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: &str, app_type: AppType) -> Source {
        Source {
            id: id.into(),
            app_type,
            title: id.into(),
            subtitle: String::new(),
            metadata: BTreeMap::new(),
            content: String::new(),
        }
    }

    #[test]
    fn unknown_app_type_has_empty_logo() {
        let app: AppType = serde_json::from_str("\"notion\"").expect("parse");
        assert_eq!(app, AppType::Unknown);
        assert_eq!(app.logo_path(), "");
        assert_eq!(AppType::Sheets.logo_path(), "/logos/google-sheets.png");
    }

    #[test]
    fn unknown_alert_level_is_info() {
        let level: AlertLevel = serde_json::from_str("\"fyi\"").expect("parse");
        assert_eq!(level, AlertLevel::Info);
    }

    #[test]
    fn report_app_types_are_distinct_in_order() {
        let report = Report {
            id: "r".into(),
            title: "r".into(),
            icon: "file".into(),
            summary: String::new(),
            sources: vec![
                source("a", AppType::Slack),
                source("b", AppType::Gmail),
                source("c", AppType::Slack),
            ],
            date: NaiveDate::from_ymd_opt(2025, 11, 20).expect("date"),
            team: None,
            period: ReportPeriod::Daily,
        };
        assert_eq!(report.app_types(), vec![AppType::Slack, AppType::Gmail]);
    }

    #[test]
    fn grouped_sources_bucket_by_app() {
        let msg = ChatMessage::assistant(
            "x",
            vec![
                source("a", AppType::Quickbooks),
                source("b", AppType::Slack),
                source("c", AppType::Quickbooks),
            ],
        );
        let groups = msg.grouped_sources();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, AppType::Quickbooks);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].1[0].id, "b");
    }

    #[test]
    fn chat_record_uses_storage_field_names() {
        let record = ChatRecord {
            id: "chat_1".into(),
            title: "t".into(),
            created_at: "2025-11-20T10:00:00Z".into(),
        };
        let json = serde_json::to_value(&record).expect("json");
        assert_eq!(
            json,
            serde_json::json!({"id": "chat_1", "title": "t", "created_at": "2025-11-20T10:00:00Z"})
        );
    }
}
