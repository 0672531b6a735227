use crate::components::page_shell::PageShell;
use crate::components::source_modal::SourceModal;
use crate::components::text::RichText;
use crate::state::use_app;
use chrono::{DateTime, Utc};
use dashboard_core::chat::{
    loading_label, ChatPhase, ChatSession, RandomSteps, Resolution, RevealSteps, StreamProgress,
};
use dashboard_core::model::{ChatMessage, ChatRecord, ChatRole, Source};
use dashboard_core::route::{search_path, SearchParams};
use dashboard_core::store::ChatStore;
use dashboard_core::DataProvider;
use leptos::leptos_dom::helpers::{IntervalHandle, TimeoutHandle};
use leptos::*;
use leptos_router::*;
use std::time::Duration;

const AUTO_SUBMIT_DELAY: Duration = Duration::from_millis(100);
const LINE_HEIGHT: usize = 20;
const MAX_INPUT_HEIGHT: usize = 300;

/// Chip label and the query it fills in.
const SUGGESTIONS: [(&str, &str); 3] = [
    ("Recent business emails", "Summarize recent business emails"),
    ("Financial docs", "Show me financial documents"),
    ("This week's meetings", "What meetings do I have this week?"),
];

/// Pixel height for the query box: one line per row, capped.
fn input_height(text: &str) -> usize {
    let lines = text.split('\n').count();
    (lines * LINE_HEIGHT + LINE_HEIGHT).min(MAX_INPUT_HEIGHT)
}

fn elapsed_since(started: DateTime<Utc>) -> Duration {
    (Utc::now() - started).to_std().unwrap_or_default()
}

/// Every timer the page may have pending. All of them die with the page.
#[derive(Clone, Copy, Debug, Default)]
struct Timers {
    auto_submit: Option<TimeoutHandle>,
    response: Option<TimeoutHandle>,
    labels: Option<IntervalHandle>,
    reveal: Option<IntervalHandle>,
    persist: Option<TimeoutHandle>,
}

impl Timers {
    fn stop_labels(&mut self) {
        if let Some(handle) = self.labels.take() {
            handle.clear();
        }
    }

    fn stop_reveal(&mut self) {
        if let Some(handle) = self.reveal.take() {
            handle.clear();
        }
    }

    fn clear(&mut self) {
        for handle in [self.auto_submit.take(), self.response.take(), self.persist.take()]
            .into_iter()
            .flatten()
        {
            handle.clear();
        }
        self.stop_labels();
        self.stop_reveal();
    }
}

#[component]
fn Message(message: ChatMessage, #[prop(into)] on_source: Callback<Source>) -> impl IntoView {
    match message.role {
        ChatRole::User => view! { <div class="message user">{message.content}</div> }.into_view(),
        ChatRole::Assistant => {
            let groups = message
                .grouped_sources()
                .into_iter()
                .map(|(app, sources)| {
                    let sources: Vec<Source> = sources.into_iter().cloned().collect();
                    (app, sources)
                })
                .collect::<Vec<_>>();
            view! {
              <div class="message assistant">
                <RichText text=message.content/>
                <div class="source-groups">
                  {groups
                    .into_iter()
                    .map(|(app, sources)| view! {
                      <div class="source-group">
                        <div class="group-head">
                          <img src=app.logo_path() alt=app.label()/>
                          <span>{app.label()}</span>
                          <span class="meta">{sources.len()}</span>
                        </div>
                        <ul>
                          {sources
                            .into_iter()
                            .map(|source| {
                                let title = source.title.clone();
                                view! { <li on:click=move |_| on_source.call(source.clone())>{title}</li> }
                            })
                            .collect_view()}
                        </ul>
                      </div>
                    })
                    .collect_view()}
                </div>
              </div>
            }
            .into_view()
        }
    }
}

#[component]
pub fn SearchPage() -> impl IntoView {
    let app = use_app();
    let config = app.config.clone();
    let store = app.store;
    let provider = store_value(app.provider.clone());
    let navigate = store_value(use_navigate());
    let query = use_query_map();

    let session = create_rw_signal(ChatSession::new(config.clone()));
    let steps = store_value(RandomSteps::new(&config));
    let timers = store_value(Timers::default());
    let input = create_rw_signal(String::new());
    let label = create_rw_signal(loading_label(Duration::ZERO, config.loading_label_interval));
    let selected_source = create_rw_signal(None::<Source>);

    let transcript = create_memo(move |_| session.with(|s| s.transcript().to_vec()));
    let streaming = create_memo(move |_| session.with(|s| s.streaming_text().map(str::to_string)));
    let phase = create_memo(move |_| session.with(ChatSession::phase));

    on_cleanup(move || {
        timers.try_update_value(Timers::clear);
    });

    let response_delay = config.response_delay;
    let reveal_interval = config.reveal_interval;
    let persist_delay = config.persist_delay;
    let label_interval = config.loading_label_interval;

    let schedule_persist = move |record: ChatRecord| {
        let save = move || match store.prepend(record) {
            Ok(()) => logging::log!("chat saved"),
            Err(err) => logging::warn!("failed to save chat: {err}"),
        };
        match set_timeout_with_handle(save, persist_delay) {
            Ok(handle) => timers.update_value(|t| t.persist = Some(handle)),
            Err(err) => logging::warn!("persist timer unavailable: {err:?}"),
        }
    };

    let start_reveal = move || {
        let tick = move || {
            let step = steps.try_update_value(|s| s.next_step()).unwrap_or(1);
            match session.try_update(|s| s.advance(step, Utc::now())) {
                Some(Ok(StreamProgress::Partial { .. })) | None => {}
                Some(Ok(StreamProgress::Completed(record))) => {
                    timers.update_value(Timers::stop_reveal);
                    schedule_persist(record);
                }
                Some(Err(err)) => {
                    timers.update_value(Timers::stop_reveal);
                    logging::warn!("reveal stopped: {err}");
                }
            }
        };
        match set_interval_with_handle(tick, reveal_interval) {
            Ok(handle) => timers.update_value(|t| t.reveal = Some(handle)),
            Err(err) => logging::warn!("reveal timer unavailable: {err:?}"),
        }
    };

    let on_response = move || {
        timers.update_value(Timers::stop_labels);
        let resolved = provider.with_value(|provider| {
            session.try_update(|s| s.resolve(provider.as_ref()))
        });
        match resolved {
            Some(Ok(Resolution::Streaming)) => start_reveal(),
            Some(Ok(Resolution::Fallback)) | None => {}
            Some(Err(err)) => logging::warn!("reply not resolved: {err}"),
        }
    };

    let submit = move |text: String| {
        let submitted = session.try_update(|s| s.submit(&text, Utc::now()));
        let submission = match submitted {
            Some(Ok(submission)) => submission,
            Some(Err(err)) => {
                logging::warn!("search not submitted: {err}");
                return;
            }
            None => return,
        };
        input.set(String::new());
        navigate.with_value(|navigate| {
            navigate(
                &search_path(&submission.chat_id),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            )
        });

        let started = Utc::now();
        label.set(loading_label(Duration::ZERO, label_interval));
        let rotate = move || label.set(loading_label(elapsed_since(started), label_interval));
        match set_interval_with_handle(rotate, label_interval) {
            Ok(handle) => timers.update_value(|t| t.labels = Some(handle)),
            Err(err) => logging::warn!("label timer unavailable: {err:?}"),
        }
        match set_timeout_with_handle(on_response, response_delay) {
            Ok(handle) => timers.update_value(|t| t.response = Some(handle)),
            Err(err) => logging::warn!("response timer unavailable: {err:?}"),
        }
    };

    // Reacts to `?chat_id=` (open a stored conversation) and `?q=` (submit a
    // query handed over from the dashboard).
    create_effect(move |_| {
        let params = query.with(|q| {
            SearchParams::from_pairs([
                ("q", q.get("q").map(String::as_str).unwrap_or_default()),
                ("chat_id", q.get("chat_id").map(String::as_str).unwrap_or_default()),
            ])
        });
        let (current_id, busy, empty) = session.with_untracked(|s| {
            (s.chat_id().map(str::to_string), s.is_busy(), s.transcript().is_empty())
        });

        if let Some(chat_id) = params.chat_id {
            if current_id.as_deref() == Some(chat_id.as_str()) {
                return;
            }
            let conversation = provider.with_value(|p| p.conversation(&chat_id));
            if let Some(conversation) = conversation {
                timers.update_value(Timers::clear);
                session.set(ChatSession::open(config.clone(), &conversation));
            }
        } else if let Some(text) = params.q {
            if empty && !busy {
                input.set(text.clone());
                let handle = set_timeout_with_handle(move || submit(text), AUTO_SUBMIT_DELAY);
                if let Ok(handle) = handle {
                    timers.update_value(|t| t.auto_submit = Some(handle));
                }
            }
        } else if current_id.is_some() {
            timers.update_value(Timers::clear);
            session.set(ChatSession::new(config.clone()));
        }
    });

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            submit(input.get_untracked());
        }
    };
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        submit(input.get_untracked());
    };
    let open_source = move |source: Source| selected_source.set(Some(source));

    view! {
      <PageShell>
        <div class="conversation">
          <Show when=move || transcript.with(Vec::is_empty)>
            <div class="welcome">
              <h2>"Welcome back"</h2>
              <p>"Search across all your connected documents, emails, and data sources"</p>
              <div class="suggestions" class:faded=move || input.with(|q| !q.trim().is_empty())>
                {SUGGESTIONS
                  .into_iter()
                  .map(|(label, text)| view! {
                    <button class="outline" on:click=move |_| input.set(text.to_string())>{label}</button>
                  })
                  .collect_view()}
              </div>
            </div>
          </Show>
          <div class="transcript">
            {move || {
                transcript.with(|messages| {
                    messages
                        .iter()
                        .cloned()
                        .map(|message| view! { <Message message=message on_source=open_source/> })
                        .collect_view()
                })
            }}
            <Show when=move || phase.get() == ChatPhase::Waiting>
              <div class="loading">{move || format!("{}...", label.get())}</div>
            </Show>
            {move || streaming.get().map(|text| view! {
              <div class="message assistant streaming"><RichText text=text/></div>
            })}
          </div>

          <form class="ask" on:submit=on_submit>
            <textarea
              placeholder="Ask anything..."
              style=move || format!("height: {}px", input.with(|text| input_height(text)))
              prop:value=move || input.get()
              on:input=move |ev| input.set(event_target_value(&ev))
              on:keydown=on_keydown
            ></textarea>
            <button
              type="submit"
              disabled=move || input.with(|q| q.trim().is_empty()) || session.with(ChatSession::is_busy)
            >
              "↑"
            </button>
          </form>
        </div>
        <SourceModal source=selected_source/>
      </PageShell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_grows_with_lines_up_to_cap() {
        assert_eq!(input_height(""), 40);
        assert_eq!(input_height("a\nb\nc"), 80);
        assert_eq!(input_height(&"\n".repeat(40)), MAX_INPUT_HEIGHT);
    }

    #[test]
    fn suggestions_fill_submittable_queries() {
        assert_eq!(SUGGESTIONS[0].1, "Summarize recent business emails");
        for (label, text) in SUGGESTIONS {
            assert!(!label.is_empty());
            assert!(!text.trim().is_empty());
            assert!(input_height(text) < MAX_INPUT_HEIGHT);
        }
    }
}
