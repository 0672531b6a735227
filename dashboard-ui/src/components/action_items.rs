use crate::state::use_app;
use chrono::Utc;
use dashboard_core::actions::{ActionBoard, CompletedWindow};
use dashboard_core::model::{ActionItem, AppType};
use dashboard_core::sidebar::format_relative;
use dashboard_core::DataProvider;
use leptos::*;

fn check(on: bool) -> &'static str {
    if on {
        "✓ "
    } else {
        ""
    }
}

/// "Key Action Items" panel: source filter, completed window, flag and
/// done/delete per item.
#[component]
pub fn ActionItems(#[prop(into)] on_open: Callback<ActionItem>) -> impl IntoView {
    let app = use_app();
    let board = create_rw_signal(ActionBoard::new(app.provider.action_items()));
    let filter_open = create_rw_signal(false);
    let menu_for = create_rw_signal(None::<String>);

    let visible = move || {
        board.with(|b| {
            b.visible(Utc::now())
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let filter_menu = move || {
        filter_open.get().then(|| {
            let all_selected = board.with(|b| b.filters().is_empty());
            view! {
              <div class="menu">
                <button on:click=move |_| board.update(ActionBoard::clear_filters)>
                  {format!("{}All Sources", check(all_selected))}
                </button>
                <hr/>
                {AppType::FILTERABLE
                  .into_iter()
                  .map(|app| {
                      let selected = board.with(|b| b.filters().contains(&app));
                      view! {
                        <button on:click=move |_| board.update(|b| b.toggle_filter(app))>
                          <img src=app.logo_path() alt=app.label()/>
                          {format!("{}{}", check(selected), app.label())}
                        </button>
                      }
                  })
                  .collect_view()}
                <hr/>
                <div class="menu-caption">"Completed Items"</div>
                {CompletedWindow::CHOICES
                  .into_iter()
                  .map(|window| {
                      let selected = board.with(|b| b.completed_window() == window);
                      view! {
                        <button on:click=move |_| board.update(|b| b.set_completed_window(window))>
                          {format!("{}{}", check(selected), window.label())}
                        </button>
                      }
                  })
                  .collect_view()}
              </div>
            }
        })
    };

    view! {
      <section class="panel action-items">
        <header>
          <h2>"Key Action Items"</h2>
          <button class="outline" on:click=move |_| filter_open.update(|open| *open = !*open)>
            "Filter"
          </button>
          {filter_menu}
        </header>
        <ul>
          <For
            each=visible
            key=|item: &ActionItem| item.id.clone()
            children=move |item: ActionItem| {
                let id = store_value(item.id.clone());
                let app = item.source.app_type;
                let age = format_relative(&item.created_at.to_rfc3339(), Utc::now());
                let source_title = item.source.title.clone();
                let title = item.title.clone();

                let flagged = move || board.with(|b| id.with_value(|id| b.is_flagged(id)));
                let completed = move || board.with(|b| id.with_value(|id| b.is_completed(id)));
                let menu_shown = move || menu_for.with(|open| id.with_value(|id| open.as_ref() == Some(id)));

                let toggle_flag = move |ev: ev::MouseEvent| {
                    ev.stop_propagation();
                    id.with_value(|id| board.update(|b| b.toggle_flag(id)));
                };
                let toggle_menu = move |ev: ev::MouseEvent| {
                    ev.stop_propagation();
                    let next = if menu_shown() { None } else { Some(id.get_value()) };
                    menu_for.set(next);
                };
                let toggle_done = move |ev: ev::MouseEvent| {
                    ev.stop_propagation();
                    id.with_value(|id| board.update(|b| b.toggle_complete(id, Utc::now())));
                    menu_for.set(None);
                };
                let delete = move |ev: ev::MouseEvent| {
                    ev.stop_propagation();
                    id.with_value(|id| board.update(|b| b.delete(id)));
                    menu_for.set(None);
                };

                view! {
                  <li class="action" on:click=move |_| on_open.call(item.clone())>
                    <div class="row">
                      <p class="title">{title}</p>
                      <button class="flag" class:flagged=flagged on:click=toggle_flag>"⚑"</button>
                      <button class="more" on:click=toggle_menu>"⋮"</button>
                    </div>
                    <Show when=menu_shown>
                      <div class="menu">
                        <button on:click=toggle_done>
                          {move || if completed() { "✓ Unmark as Done" } else { "Mark as Done" }}
                        </button>
                        <button class="danger" on:click=delete>"Delete"</button>
                      </div>
                    </Show>
                    <div class="row meta">
                      <span>{age}</span>
                      <span class="chip">
                        <img src=app.logo_path() alt=app.label()/>
                        {source_title}
                      </span>
                    </div>
                  </li>
                }
            }
          />
        </ul>
      </section>
    }
}
