use crate::error::{DashboardError, Result};
use crate::model::ChatRecord;
use std::sync::Mutex;

/// Key the recent-chat list lives under.
pub const CHAT_STORAGE_KEY: &str = "demoChats";

/// Narrow read/write access to the recent-chat list. No versioning: the last
/// writer wins.
pub trait ChatStore {
    fn load(&self) -> Result<Vec<ChatRecord>>;
    fn save(&self, chats: &[ChatRecord]) -> Result<()>;

    /// Puts `record` at the head of the stored list.
    fn prepend(&self, record: ChatRecord) -> Result<()> {
        let mut chats = self.load()?;
        chats.insert(0, record);
        self.save(&chats)
    }

    /// Drops the stored record with `id`. Returns whether one was removed.
    fn remove(&self, id: &str) -> Result<bool> {
        let mut chats = self.load()?;
        let before = chats.len();
        chats.retain(|c| c.id != id);
        if chats.len() == before {
            return Ok(false);
        }
        self.save(&chats)?;
        Ok(true)
    }
}

/// Decodes the stored JSON array; a missing value is an empty list.
pub fn decode_chats(raw: Option<&str>) -> Result<Vec<ChatRecord>> {
    match raw {
        None => Ok(Vec::new()),
        Some(s) if s.trim().is_empty() => Ok(Vec::new()),
        Some(s) => Ok(serde_json::from_str(s)?),
    }
}

pub fn encode_chats(chats: &[ChatRecord]) -> Result<String> {
    Ok(serde_json::to_string(chats)?)
}

#[derive(Default)]
pub struct MemoryChatStore {
    raw: Mutex<Option<String>>,
}

impl MemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw stored value.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }
}

impl ChatStore for MemoryChatStore {
    fn load(&self) -> Result<Vec<ChatRecord>> {
        let raw = self
            .raw
            .lock()
            .map_err(|e| DashboardError::Storage(e.to_string()))?;
        decode_chats(raw.as_deref())
    }

    fn save(&self, chats: &[ChatRecord]) -> Result<()> {
        let encoded = encode_chats(chats)?;
        let mut raw = self
            .raw
            .lock()
            .map_err(|e| DashboardError::Storage(e.to_string()))?;
        *raw = Some(encoded);
        Ok(())
    }
}

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteChatStore;

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::{decode_chats, encode_chats, ChatStore, CHAT_STORAGE_KEY};
    use crate::error::Result;
    use crate::model::ChatRecord;
    use rusqlite::{params, Connection, OptionalExtension};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    /// Key/value table standing in for browser local storage.
    #[derive(Clone)]
    pub struct SqliteChatStore {
        db_path: Arc<PathBuf>,
    }

    impl SqliteChatStore {
        pub fn open(path: &str) -> Result<Self> {
            let db_path = PathBuf::from(path);
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| crate::error::DashboardError::Storage(e.to_string()))?;
                }
            }

            let conn = Connection::open(&db_path)?;
            conn.execute_batch(
                "
                PRAGMA journal_mode=WAL;
                PRAGMA synchronous=NORMAL;
                CREATE TABLE IF NOT EXISTS local_storage (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );
                ",
            )?;

            Ok(Self {
                db_path: Arc::new(db_path),
            })
        }

        pub fn get_item(&self, key: &str) -> Result<Option<String>> {
            let conn = Connection::open(&*self.db_path)?;
            let value = conn
                .query_row(
                    "SELECT value FROM local_storage WHERE key = ?1",
                    params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()?;
            Ok(value)
        }

        pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
            let conn = Connection::open(&*self.db_path)?;
            conn.execute(
                "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
            Ok(())
        }
    }

    impl ChatStore for SqliteChatStore {
        fn load(&self) -> Result<Vec<ChatRecord>> {
            decode_chats(self.get_item(CHAT_STORAGE_KEY)?.as_deref())
        }

        fn save(&self, chats: &[ChatRecord]) -> Result<()> {
            self.set_item(CHAT_STORAGE_KEY, &encode_chats(chats)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ChatRecord {
        ChatRecord {
            id: id.into(),
            title: format!("title {id}"),
            created_at: "2025-11-20T09:30:00.000Z".into(),
        }
    }

    #[test]
    fn prepend_puts_newest_first() {
        let store = MemoryChatStore::new();
        store.prepend(record("chat_1")).expect("prepend");
        store.prepend(record("chat_2")).expect("prepend");
        let ids: Vec<String> = store.load().expect("load").into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["chat_2".to_string(), "chat_1".to_string()]);
    }

    #[test]
    fn malformed_value_is_an_error() {
        let store = MemoryChatStore::with_raw("{not json");
        assert!(matches!(store.load(), Err(DashboardError::Serialization(_))));
    }

    #[test]
    fn existing_entries_survive_prepend() {
        let store = MemoryChatStore::with_raw(
            r#"[{"id":"chat_old","title":"Old","created_at":"2025-11-01T00:00:00.000Z"}]"#,
        );
        store.prepend(record("chat_new")).expect("prepend");
        let chats = store.load().expect("load");
        assert_eq!(chats.len(), 2);
        assert_eq!(chats[1].id, "chat_old");
    }

    #[test]
    fn remove_drops_only_matching_record() {
        let store = MemoryChatStore::new();
        store.prepend(record("chat_1")).expect("prepend");
        store.prepend(record("chat_2")).expect("prepend");

        assert!(store.remove("chat_1").expect("remove"));
        assert!(!store.remove("chat_1").expect("remove again"));
        let chats = store.load().expect("load");
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0].id, "chat_2");
    }

    #[cfg(feature = "sqlite")]
    fn db_path(name: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        format!("/tmp/dashboard-tests/{name}-{nanos}.db")
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn sqlite_store_roundtrip() {
        let store = SqliteChatStore::open(&db_path("chat-store")).expect("open");
        assert!(store.load().expect("empty").is_empty());
        store.prepend(record("chat_1")).expect("prepend");
        store.prepend(record("chat_2")).expect("prepend");

        let chats = store.load().expect("load");
        assert_eq!(chats[0].id, "chat_2");
        assert_eq!(
            store.get_item(CHAT_STORAGE_KEY).expect("raw").map(|raw| raw.starts_with('[')),
            Some(true)
        );
    }
}
