use dashboard_core::model::ChatRecord;
use dashboard_core::store::{decode_chats, encode_chats, ChatStore, CHAT_STORAGE_KEY};
use dashboard_core::{DashboardError, Result};
use wasm_bindgen::JsValue;
use web_sys::{Event, Storage};

fn js_error(context: &str, err: JsValue) -> DashboardError {
    DashboardError::Storage(format!("{context}: {err:?}"))
}

fn local_storage() -> Result<Storage> {
    let window =
        web_sys::window().ok_or_else(|| DashboardError::Storage("window not available".into()))?;
    window
        .local_storage()
        .map_err(|e| js_error("failed to access localStorage", e))?
        .ok_or_else(|| DashboardError::Storage("localStorage unavailable".into()))
}

/// Recent chats kept in browser local storage. Every write raises a `storage`
/// event on the window so the sidebar reloads in this tab too.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageChatStore;

impl LocalStorageChatStore {
    fn notify(&self) -> Result<()> {
        let window = web_sys::window()
            .ok_or_else(|| DashboardError::Storage("window not available".into()))?;
        let event = Event::new("storage").map_err(|e| js_error("event", e))?;
        window
            .dispatch_event(&event)
            .map_err(|e| js_error("dispatch failed", e))?;
        Ok(())
    }
}

impl ChatStore for LocalStorageChatStore {
    fn load(&self) -> Result<Vec<ChatRecord>> {
        let raw = local_storage()?
            .get_item(CHAT_STORAGE_KEY)
            .map_err(|e| js_error("read failed", e))?;
        decode_chats(raw.as_deref())
    }

    fn save(&self, chats: &[ChatRecord]) -> Result<()> {
        local_storage()?
            .set_item(CHAT_STORAGE_KEY, &encode_chats(chats)?)
            .map_err(|e| js_error("write failed", e))?;
        self.notify()
    }
}
