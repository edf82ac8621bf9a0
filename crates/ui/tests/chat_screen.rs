use std::sync::Arc;
use std::time::Duration;

use banter_chat::DeliveryPipeline;
use banter_core::{Identity, SequentialIds, StaticSession, TranscriptStore, welcome_messages};
use banter_providers::{MockBackend, MockReply};
use banter_ui::App;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

const BOT: &str = "Ada but better";

fn create_app(replies: Vec<MockReply>, session: Arc<StaticSession>) -> App {
    let ids = Arc::new(SequentialIds::new("t"));
    let store = TranscriptStore::seeded(welcome_messages(BOT, ids.as_ref()));
    let pipeline =
        DeliveryPipeline::new(store, Arc::new(MockBackend::new(replies)), session.clone()).with_ids(ids);
    App::new(pipeline, session, BOT)
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn type_and_send(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)));
    }
    app.handle_event(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
}

async fn wait_for_len(app: &mut App, len: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while app.transcript().len() < len {
            tokio::task::yield_now().await;
            app.refresh();
        }
    })
    .await
    .expect("transcript did not grow in time");
}

#[test]
fn test_initial_screen() {
    let mut app = create_app(vec![], Arc::new(StaticSession::new(None)));
    let content = draw(&mut app);

    assert!(content.contains(BOT));
    assert!(content.contains("Not signed in"));
    assert!(content.contains("Welcome to Ada but better! Send a message to initiate a conversation."));
    assert!(content.contains("System"));
    assert!(content.contains("Chat with Ada but better..."));
}

#[test]
fn test_signed_in_header() {
    let session = Arc::new(StaticSession::new(Some(Identity::new("octocat", "octocat@example.com"))));
    let mut app = create_app(vec![], session);
    let content = draw(&mut app);
    assert!(content.contains("Logged in as octocat (octocat@example.com)"));
}

#[tokio::test]
async fn test_reply_is_rendered() {
    let mut app = create_app(
        vec![MockReply::Success { id: "m1".to_string(), response: "hi there".to_string() }],
        Arc::new(StaticSession::new(None)),
    );

    type_and_send(&mut app, "hello");
    let content = draw(&mut app);
    assert!(content.contains("You"));
    assert!(content.contains("hello"));
    assert!(content.contains("Chat with Ada but better..."));

    wait_for_len(&mut app, 4).await;
    let content = draw(&mut app);
    assert!(content.contains("hi there"));
}

#[tokio::test]
async fn test_failure_is_rendered_inline() {
    let mut app = create_app(
        vec![MockReply::Failure { id: "m2".to_string(), reason: "rate limited".to_string() }],
        Arc::new(StaticSession::new(None)),
    );

    type_and_send(&mut app, "trigger fail");
    wait_for_len(&mut app, 4).await;

    let content = draw(&mut app);
    assert!(content.contains("trigger fail"));
    assert!(content.contains("not delivered"));
    assert!(content.contains("Response ID: m2"));
    assert!(content.contains("Reason: rate limited"));
}

#[test]
fn test_typed_draft_replaces_placeholder() {
    let mut app = create_app(vec![], Arc::new(StaticSession::new(None)));
    for c in "draft".chars() {
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)));
    }
    let content = draw(&mut app);
    assert!(content.contains("draft"));
    assert!(!content.contains("Chat with Ada but better..."));
}
