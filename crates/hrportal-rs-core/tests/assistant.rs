use hrportal_rs_config::AssistantConfig;
use hrportal_rs_core::assistant::FALLBACK_REPLY;
use hrportal_rs_core::{AssistantSession, Sender, ShellState, TurnOutcome};
use hrportal_rs_protocol::{AssistantAction, AssistantContext, AssistantReply};
use hrportal_rs_test_utils::{FailingAssistant, FixedAssistant, GatedAssistant, RecordingHost};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn config() -> AssistantConfig {
    AssistantConfig {
        action_delay_ms: 1500,
        ..AssistantConfig::default()
    }
}

fn context(phase: u32) -> AssistantContext {
    AssistantContext::new(phase, 31, "Dana")
}

fn timeline_reply() -> AssistantReply {
    serde_json::from_value(json!({
        "response": "Here's your onboarding timeline.",
        "data": {"action": "show_timeline"},
        "suggestions": ["What's due this week?"]
    }))
    .expect("reply")
}

#[tokio::test(start_paused = true)]
async fn action_runs_after_the_delay_not_before() {
    let service = Arc::new(FixedAssistant::new(timeline_reply()));
    let host = RecordingHost::new();
    let session = AssistantSession::new(context(1), service.clone(), host.clone(), &config());

    let outcome = session.send("Show my timeline").await.expect("send");
    assert_eq!(
        outcome,
        TurnOutcome::Applied {
            action: Some(AssistantAction::ShowTimeline)
        }
    );
    assert_eq!(host.typing(), vec![true, false]);
    assert!(host.actions().is_empty());

    tokio::time::sleep(Duration::from_millis(1499)).await;
    assert!(host.actions().is_empty());
    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(host.actions(), vec![AssistantAction::ShowTimeline]);

    assert_eq!(session.suggestions(), vec!["What's due this week?".to_string()]);
    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].context.phase, 1);
}

#[tokio::test]
async fn service_failure_appends_one_fallback_and_returns_ok() {
    let host = RecordingHost::new();
    let session = AssistantSession::new(
        context(1),
        Arc::new(FailingAssistant),
        host.clone(),
        &config(),
    );

    session.send("Hello?").await.expect("no error escapes");
    let transcript = session.transcript();
    let senders: Vec<Sender> = transcript.iter().map(|m| m.sender).collect();
    assert_eq!(senders, vec![Sender::Assistant, Sender::User, Sender::Assistant]);
    assert_eq!(transcript[2].text, FALLBACK_REPLY);
    assert_eq!(session.state(), ShellState::Idle);
    assert_eq!(host.typing(), vec![true, false]);
}

#[tokio::test]
async fn failed_suggestion_load_keeps_defaults() {
    let session = AssistantSession::new(
        context(2),
        Arc::new(FailingAssistant),
        RecordingHost::new(),
        &config(),
    );
    let defaults = session.suggestions();
    assert!(!session.load_suggestions().await);
    assert_eq!(session.suggestions(), defaults);
    assert!(!defaults.is_empty());
}

#[tokio::test]
async fn loaded_suggestions_replace_defaults() {
    let service = FixedAssistant::new(AssistantReply::text("ok"))
        .with_suggestions(&["Where is the parking lot?", "How do I get a badge?"]);
    let session = AssistantSession::new(
        context(1),
        Arc::new(service),
        RecordingHost::new(),
        &config(),
    );
    assert!(session.load_suggestions().await);
    assert_eq!(session.suggestions().len(), 2);
}

#[tokio::test]
async fn user_message_is_visible_while_reply_is_pending_and_second_send_is_refused() {
    let service = Arc::new(GatedAssistant::new(AssistantReply::text("Done")));
    let session =
        AssistantSession::new(context(1), service.clone(), RecordingHost::new(), &config());

    let pending = tokio::spawn({
        let session = session.clone();
        async move { session.send("First question").await }
    });
    service.wait_started().await;

    assert_eq!(session.state(), ShellState::AwaitingResponse);
    assert_eq!(session.transcript().len(), 2);
    assert!(session.send("Second question").await.is_err());
    assert_eq!(session.transcript().len(), 2);

    service.release();
    pending.await.expect("join").expect("send");
    assert_eq!(session.transcript().len(), 3);
    assert!(session.can_send());
}

#[tokio::test(start_paused = true)]
async fn context_change_mid_flight_ignores_late_reply() {
    let service = Arc::new(GatedAssistant::new(timeline_reply()));
    let host = RecordingHost::new();
    let session = AssistantSession::new(context(1), service.clone(), host.clone(), &config());

    let pending = tokio::spawn({
        let session = session.clone();
        async move { session.send("What's next?").await }
    });
    service.wait_started().await;

    assert!(session.change_context(context(2)));
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 1);
    assert!(transcript[0].text.contains("Phase 2"));

    service.release();
    let outcome = pending.await.expect("join").expect("send");
    assert_eq!(outcome, TurnOutcome::Stale);
    assert_eq!(session.transcript().len(), 1);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(host.actions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn context_change_cancels_scheduled_action() {
    let host = RecordingHost::new();
    let session = AssistantSession::new(
        context(1),
        Arc::new(FixedAssistant::new(timeline_reply())),
        host.clone(),
        &config(),
    );
    session.send("timeline").await.expect("send");

    tokio::time::sleep(Duration::from_millis(500)).await;
    session.change_context(context(3));
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(host.actions().is_empty());
    assert_eq!(session.context().phase, 3);
}

#[tokio::test]
async fn cancelled_send_still_completes_the_turn() {
    let service = Arc::new(GatedAssistant::new(AssistantReply::text("Done")));
    let host = RecordingHost::new();
    let session = AssistantSession::new(context(1), service.clone(), host.clone(), &config());

    let pending = tokio::spawn({
        let session = session.clone();
        async move { session.send("First question").await }
    });
    service.wait_started().await;
    pending.abort();
    assert!(pending.await.expect_err("aborted").is_cancelled());

    service.release();
    for _ in 0..100 {
        if session.can_send() {
            break;
        }
        tokio::task::yield_now().await;
    }

    assert_eq!(session.state(), ShellState::Idle);
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2].text, "Done");
    assert_eq!(host.typing(), vec![true, false]);

    service.release();
    let outcome = session.send("Second question").await.expect("send");
    assert_eq!(outcome, TurnOutcome::Applied { action: None });
    assert_eq!(session.transcript().len(), 5);
}
