use crate::state::use_app;
use chrono::Utc;
use dashboard_core::model::ChatRecord;
use dashboard_core::route::search_path;
use dashboard_core::sidebar::{format_relative, is_default_chat, recent_chats, NAVIGATION, SEARCH};
use dashboard_core::store::ChatStore;
use leptos::*;
use leptos_router::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let app = use_app();
    let store = app.store;
    let location = use_location();
    let query = use_query_map();
    let navigate = use_navigate();

    let load = move || match store.load() {
        Ok(chats) => chats,
        Err(err) => {
            logging::warn!("stored chats unreadable: {err}");
            Vec::new()
        }
    };
    let stored = create_rw_signal(load());
    let expanded = create_rw_signal(true);

    let listener = window_event_listener(ev::storage, move |_| stored.set(load()));
    on_cleanup(move || listener.remove());

    let current_chat = move || query.with(|q| q.get("chat_id").cloned());
    let path = move || location.pathname.get();

    let forget = move |id: String| {
        if is_default_chat(&id) {
            return;
        }
        if let Err(err) = store.remove(&id) {
            logging::warn!("failed to delete chat {id}: {err}");
        }
    };

    let open_search = {
        let navigate = navigate.clone();
        move |_| navigate(SEARCH.href, Default::default())
    };

    view! {
      <aside class="sidebar">
        <a href="/" class="brand">"Awareness"</a>

        <button
          class="nav-item"
          class:active=move || SEARCH.is_active(&path(), current_chat().as_deref())
          on:click=open_search
        >
          <span class=format!("icon icon-{}", SEARCH.icon)></span>
          {SEARCH.name}
        </button>

        <nav>
          {NAVIGATION
            .iter()
            .map(|item| {
                let item = *item;
                view! {
                  <a
                    href=item.href
                    class="nav-item"
                    class:active=move || item.is_active(&path(), current_chat().as_deref())
                  >
                    <span class=format!("icon icon-{}", item.icon)></span>
                    {item.name}
                  </a>
                }
            })
            .collect_view()}
        </nav>

        <section class="history">
          <button class="history-toggle" on:click=move |_| expanded.update(|open| *open = !*open)>
            "Recent Chats"
            <span class="chevron" class:collapsed=move || !expanded.get()></span>
          </button>
          <Show when=move || expanded.get()>
            <ul class="chat-list">
              <For
                each=move || recent_chats(stored.get(), Utc::now())
                key=|chat: &ChatRecord| chat.id.clone()
                children={
                let navigate = navigate.clone();
                move |chat: ChatRecord| {
                    let id = chat.id.clone();
                    let active_id = chat.id.clone();
                    let delete_id = chat.id.clone();
                    let deletable = !is_default_chat(&chat.id);
                    let navigate = navigate.clone();
                    let age = format_relative(&chat.created_at, Utc::now());
                    view! {
                      <li
                        class="chat"
                        class:active=move || current_chat().as_deref() == Some(active_id.as_str())
                        on:click=move |_| navigate(&search_path(&id), Default::default())
                      >
                        <div class="chat-title">{chat.title}</div>
                        <div class="meta">{age}</div>
                        <Show when=move || deletable>
                          <button
                            class="chat-delete"
                            title="Delete"
                            on:click={
                                let id = delete_id.clone();
                                move |ev| {
                                    ev.stop_propagation();
                                    forget(id.clone());
                                }
                            }
                          >
                            "×"
                          </button>
                        </Show>
                      </li>
                    }
                }
                }
              />
            </ul>
          </Show>
        </section>
      </aside>
    }
}
