use chrono::Utc;
use dashboard_core::chat::{loading_label, ChatSession, Resolution, RevealSteps, StreamProgress};
use dashboard_core::model::{ChatMessage, ChatRecord};
use dashboard_core::store::ChatStore;
use dashboard_core::{DataProvider, Result};
use std::io::Write;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

const MIN_TICK: Duration = Duration::from_millis(1);

/// Receives everything the user would see while a reply is produced.
pub trait ChatSink {
    fn waiting(&mut self, label: &str);
    fn partial(&mut self, text: &str);
    fn message(&mut self, message: &ChatMessage);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    Saved(ChatRecord),
    Fallback,
    Cancelled,
}

/// Prints the reply to stdout as it is revealed.
#[derive(Default)]
pub struct StdoutSink {
    printed: usize,
    last_label: Option<String>,
}

impl ChatSink for StdoutSink {
    fn waiting(&mut self, label: &str) {
        if self.last_label.as_deref() != Some(label) {
            eprintln!("{label}");
            self.last_label = Some(label.to_string());
        }
    }

    fn partial(&mut self, text: &str) {
        if let Some(delta) = text.get(self.printed..) {
            print!("{delta}");
            let _ = std::io::stdout().flush();
        }
        self.printed = text.len();
    }

    fn message(&mut self, message: &ChatMessage) {
        if let Some(rest) = message.content.get(self.printed..) {
            println!("{rest}");
        }
        self.printed = 0;
        for (app, sources) in message.grouped_sources() {
            println!("  {} ({})", app.label(), sources.len());
            for source in sources {
                println!("    - {}", source.title);
            }
        }
    }
}

/// Interval that tolerates a zero period from a hand-built config.
fn ticker(period: Duration) -> Interval {
    let mut interval = time::interval(period.max(MIN_TICK));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow() {
            return;
        }
        if cancel.changed().await.is_err() {
            // Nobody can cancel any more.
            std::future::pending::<()>().await;
        }
    }
}

/// Drives one query through wait, reveal and persist on tokio timers. All
/// timers belong to this future, so cancelling or dropping it stops them.
pub async fn run_chat(
    session: &mut ChatSession,
    query: &str,
    provider: &dyn DataProvider,
    store: &dyn ChatStore,
    steps: &mut dyn RevealSteps,
    sink: &mut dyn ChatSink,
    mut cancel: watch::Receiver<bool>,
) -> Result<ChatOutcome> {
    let config = session.config().clone();
    let submission = session.submit(query, Utc::now())?;
    tracing::info!(chat_id = %submission.chat_id, title = %submission.title, "query submitted");

    let started = Instant::now();
    let delay = time::sleep(config.response_delay);
    tokio::pin!(delay);
    let mut labels = ticker(config.loading_label_interval);

    loop {
        tokio::select! {
            _ = &mut delay => break,
            _ = labels.tick() => {
                sink.waiting(loading_label(started.elapsed(), config.loading_label_interval));
            }
            _ = cancelled(&mut cancel) => {
                session.cancel();
                return Ok(ChatOutcome::Cancelled);
            }
        }
    }

    if session.resolve(provider)? == Resolution::Fallback {
        if let Some(reply) = session.transcript().last() {
            sink.message(reply);
        }
        return Ok(ChatOutcome::Fallback);
    }

    let mut reveal = ticker(config.reveal_interval);
    let record = loop {
        tokio::select! {
            _ = reveal.tick() => {
                match session.advance(steps.next_step(), Utc::now())? {
                    StreamProgress::Partial { .. } => {
                        if let Some(text) = session.streaming_text() {
                            sink.partial(text);
                        }
                    }
                    StreamProgress::Completed(record) => break record,
                }
            }
            _ = cancelled(&mut cancel) => {
                session.cancel();
                return Ok(ChatOutcome::Cancelled);
            }
        }
    };
    if let Some(reply) = session.transcript().last() {
        sink.message(reply);
    }

    tokio::select! {
        _ = time::sleep(config.persist_delay) => {}
        _ = cancelled(&mut cancel) => {
            tracing::debug!(chat_id = %record.id, "left before the chat was saved");
            return Ok(ChatOutcome::Cancelled);
        }
    }
    store.prepend(record.clone())?;
    tracing::info!(chat_id = %record.id, "chat saved");
    Ok(ChatOutcome::Saved(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::chat::{ChatPhase, FixedSteps};
    use dashboard_core::config::SimulationConfig;
    use dashboard_core::store::MemoryChatStore;
    use dashboard_core::FixtureProvider;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingSink {
        labels: Vec<String>,
        partials: Vec<usize>,
        messages: Vec<String>,
    }

    impl ChatSink for RecordingSink {
        fn waiting(&mut self, label: &str) {
            self.labels.push(label.to_string());
        }

        fn partial(&mut self, text: &str) {
            self.partials.push(text.chars().count());
        }

        fn message(&mut self, message: &ChatMessage) {
            self.messages.push(message.content.clone());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reply_streams_then_persists_after_delay() {
        let provider = FixtureProvider::load().expect("load");
        let store = MemoryChatStore::new();
        let mut session = ChatSession::new(SimulationConfig::default());
        let mut sink = RecordingSink::default();
        let (_tx, rx) = watch::channel(false);
        let started = Instant::now();

        let outcome = run_chat(
            &mut session,
            "Summarize recent business emails",
            &provider,
            &store,
            &mut FixedSteps(40),
            &mut sink,
            rx,
        )
        .await
        .expect("run");

        let record = match outcome {
            ChatOutcome::Saved(record) => record,
            other => panic!("expected saved chat, got {other:?}"),
        };
        assert!(started.elapsed() >= Duration::from_millis(8000));
        assert_eq!(session.phase(), ChatPhase::Done);
        assert_eq!(sink.labels.first().map(String::as_str), Some("Searching"));
        assert!(sink.partials.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(sink.messages.len(), 1);
        assert_eq!(store.load().expect("load")[0].id, record.id);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelling_while_waiting_saves_nothing() {
        let provider = FixtureProvider::load().expect("load");
        let store = MemoryChatStore::new();
        let mut session = ChatSession::new(SimulationConfig::default());
        let mut sink = RecordingSink::default();
        let (tx, rx) = watch::channel(false);
        let mut steps = FixedSteps(5);

        let run = run_chat(
            &mut session,
            "pipeline status",
            &provider,
            &store,
            &mut steps,
            &mut sink,
            rx,
        );
        let cancel = async {
            time::sleep(Duration::from_millis(1000)).await;
            tx.send(true).expect("send");
        };
        let (outcome, ()) = tokio::join!(run, cancel);

        assert_eq!(outcome.expect("run"), ChatOutcome::Cancelled);
        assert_eq!(session.phase(), ChatPhase::Idle);
        assert!(sink.messages.is_empty());
        assert!(store.load().expect("load").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_periods_still_finish_the_reply() {
        let provider = FixtureProvider::load().expect("load");
        let store = MemoryChatStore::new();
        let config = SimulationConfig {
            reveal_interval: Duration::ZERO,
            loading_label_interval: Duration::ZERO,
            ..SimulationConfig::default()
        };
        let mut session = ChatSession::new(config);
        let (_tx, rx) = watch::channel(false);

        let outcome = run_chat(
            &mut session,
            "Summarize recent business emails",
            &provider,
            &store,
            &mut FixedSteps(40),
            &mut RecordingSink::default(),
            rx,
        )
        .await
        .expect("run");

        assert!(matches!(outcome, ChatOutcome::Saved(_)));
        assert_eq!(store.load().expect("load").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_query_is_rejected_up_front() {
        let provider = FixtureProvider::load().expect("load");
        let store = MemoryChatStore::new();
        let mut session = ChatSession::new(SimulationConfig::default());
        let (_tx, rx) = watch::channel(false);

        let err = run_chat(
            &mut session,
            "   ",
            &provider,
            &store,
            &mut FixedSteps(5),
            &mut RecordingSink::default(),
            rx,
        )
        .await
        .expect_err("blank");
        assert!(err.is_rejection());
    }
}
