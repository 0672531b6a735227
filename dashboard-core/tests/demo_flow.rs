use chrono::{TimeZone, Utc};
use dashboard_core::actions::{ActionBoard, CompletedWindow};
use dashboard_core::chat::{ChatPhase, ChatSession, FixedSteps, RevealSteps, StreamProgress};
use dashboard_core::config::SimulationConfig;
use dashboard_core::sidebar::recent_chats;
use dashboard_core::store::{ChatStore, MemoryChatStore};
use dashboard_core::{DataProvider, FixtureProvider};

#[test]
fn business_email_query_gets_netlogic_reply_and_is_listed() {
    let provider = FixtureProvider::load().expect("load");
    let store = MemoryChatStore::new();
    let now = Utc.with_ymd_and_hms(2025, 11, 20, 9, 0, 0).unwrap();

    let mut session = ChatSession::new(SimulationConfig::default());
    let submission = session
        .submit("Summarize recent business emails", now)
        .expect("submit");
    session.resolve(&provider).expect("resolve");

    let mut steps = FixedSteps(7);
    let record = loop {
        if let StreamProgress::Completed(record) =
            session.advance(steps.next_step(), now).expect("advance")
        {
            break record;
        }
    };
    store.prepend(record).expect("persist");

    let netlogic = provider.conversation("chat_004").expect("chat_004");
    assert_eq!(session.phase(), ChatPhase::Done);
    assert_eq!(
        session.transcript().last().map(|m| m.content.as_str()),
        Some(netlogic.messages[1].content.as_str())
    );

    let sidebar = recent_chats(store.load().expect("load"), now);
    assert_eq!(sidebar[0].id, submission.chat_id);
    assert_eq!(sidebar[0].title, "Summarize recent business emails");
    assert_eq!(sidebar.len(), 4);
}

#[test]
fn completing_fixture_action_moves_it_to_completed_view() {
    let provider = FixtureProvider::load().expect("load");
    let now = Utc.with_ymd_and_hms(2025, 11, 21, 0, 0, 0).unwrap();
    let mut board = ActionBoard::new(provider.action_items());
    let total = board.visible(now).len();

    board.complete("action_003", now);
    assert_eq!(board.visible(now).len(), total - 1);
    assert!(board.visible(now).iter().all(|a| a.id != "action_003"));

    board.set_completed_window(CompletedWindow::All);
    let completed = board.visible(now);
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, "action_003");
}
