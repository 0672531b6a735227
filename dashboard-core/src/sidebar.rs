use crate::model::ChatRecord;
use chrono::{DateTime, Duration, SecondsFormat, Utc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

pub const SEARCH: NavItem = NavItem {
    name: "Search",
    href: "/search",
    icon: "search",
};

pub const NAVIGATION: [NavItem; 3] = [
    NavItem {
        name: "Dashboard",
        href: "/",
        icon: "layout-dashboard",
    },
    NavItem {
        name: "Reports",
        href: "/daily-reports",
        icon: "file-bar-chart",
    },
    NavItem {
        name: "Teams",
        href: "/team",
        icon: "users",
    },
];

impl NavItem {
    /// Search only highlights on a fresh search, not while a chat is open.
    pub fn is_active(&self, path: &str, chat_id: Option<&str>) -> bool {
        if self.href == SEARCH.href {
            return path == SEARCH.href && chat_id.is_none();
        }
        path == self.href
    }
}

const DEFAULT_CHAT_IDS: [&str; 3] = ["chat_001", "chat_002", "chat_003"];

/// Default entries cannot be renamed or deleted.
pub fn is_default_chat(id: &str) -> bool {
    DEFAULT_CHAT_IDS.contains(&id)
}

/// Hardcoded history shown beneath the stored chats.
pub fn default_chats(now: DateTime<Utc>) -> Vec<ChatRecord> {
    [
        ("chat_001", "ACME Corp project status", 2),
        ("chat_002", "Q4 Revenue Analysis", 5),
        ("chat_003", "Client Meeting Notes", 24),
    ]
    .into_iter()
    .map(|(id, title, hours)| ChatRecord {
        id: id.to_string(),
        title: title.to_string(),
        created_at: (now - Duration::hours(hours)).to_rfc3339_opts(SecondsFormat::Millis, true),
    })
    .collect()
}

pub fn recent_chats(stored: Vec<ChatRecord>, now: DateTime<Utc>) -> Vec<ChatRecord> {
    let mut out = stored;
    out.extend(default_chats(now));
    out
}

/// Short age label for the chat list. Unparseable timestamps pass through.
pub fn format_relative(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(at) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let at = at.with_timezone(&Utc);
    let hours = now.signed_duration_since(at).num_hours();
    let days = hours / 24;

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        at.format("%b %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 20, 12, 0, 0).unwrap()
    }

    fn ago(hours: i64) -> String {
        (now() - Duration::hours(hours)).to_rfc3339()
    }

    #[test]
    fn relative_labels() {
        assert_eq!(format_relative(&ago(0), now()), "Just now");
        assert_eq!(format_relative(&ago(5), now()), "5h ago");
        assert_eq!(format_relative(&ago(30), now()), "Yesterday");
        assert_eq!(format_relative(&ago(24 * 3), now()), "3d ago");
        assert_eq!(format_relative(&ago(24 * 17), now()), "Nov 3");
        assert_eq!(format_relative("garbage", now()), "garbage");
    }

    #[test]
    fn stored_chats_come_before_defaults() {
        let stored = vec![ChatRecord {
            id: "chat_9".into(),
            title: "Mine".into(),
            created_at: ago(0),
        }];
        let chats = recent_chats(stored, now());
        let ids: Vec<&str> = chats.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["chat_9", "chat_001", "chat_002", "chat_003"]);
        assert_eq!(format_relative(&chats[3].created_at, now()), "Yesterday");
    }

    #[test]
    fn only_fixture_chats_are_defaults() {
        assert!(default_chats(now()).iter().all(|c| is_default_chat(&c.id)));
        assert!(!is_default_chat("chat_1732100000000"));
    }

    #[test]
    fn search_is_inactive_with_open_chat() {
        assert!(SEARCH.is_active("/search", None));
        assert!(!SEARCH.is_active("/search", Some("chat_001")));
        assert!(NAVIGATION[0].is_active("/", None));
        assert!(!NAVIGATION[1].is_active("/", None));
    }
}
