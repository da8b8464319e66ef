//! Integration tests for [`sequencer::Sequencer`] playback: pacing order,
//! branch selection, stale-selection guards, cancellation on close, and
//! restart-from-entry semantics. Delays are tens of milliseconds; assertions
//! poll with a generous timeout so slow machines don't flake.


use std::sync::Arc;
use std::time::Duration;

use recording_sink::{wait_until, RecordingSink, SinkEvent};
use script::{Choice, Script, Step};
use sequencer::Sequencer;
use simchat_core::{Action, Author};
use tokio::time::sleep;

fn linear_script() -> Script {
    Script::new(
        "linear",
        "three texts",
        vec![
            Step::text("one").typing(20).post_delay(10),
            Step::text("two").typing(20).post_delay(10),
            Step::text("three").typing(20),
        ],
    )
}

/// Greeting halts at two quick replies; "yes" hands off to checkout with no
/// further message, "no" plays one more reply.
fn branching_script() -> Script {
    Script::new(
        "branching",
        "yes or no",
        vec![Step::text("A").typing(20).post_delay(10).choices(vec![
            Choice::new("yes", vec![Step::action_step(Action::OpenCheckout)]),
            Choice::new("no", vec![Step::text("D").typing(20).post_delay(10)]),
        ])],
    )
}

/// **Test: every content step appends exactly one persona message, then the
/// session goes idle.**
///
/// **Setup:** Three text steps with short pacing.
/// **Action:** `start`, wait for playback to finish.
/// **Expected:** Exactly 3 messages in step order, all persona-authored; no
/// typing indicator or pending choices remain.
#[tokio::test]
async fn test_one_message_per_content_step() {
    let sink = Arc::new(RecordingSink::new());
    let seq = Sequencer::new(sink.clone());

    seq.start(linear_script()).await;
    assert!(wait_until(|| sink.message_count() == 3, 3000).await);

    // Idle dead end: nothing else arrives.
    sleep(Duration::from_millis(100)).await;
    assert_eq!(sink.message_count(), 3);

    let snap = seq.snapshot().await;
    assert_eq!(snap.messages.len(), 3);
    assert!(snap.messages.iter().all(|m| m.author == Author::Persona));
    let texts: Vec<_> = snap.messages.iter().map(|m| m.text().unwrap()).collect();
    assert_eq!(texts, ["one", "two", "three"]);
    assert!(!snap.is_typing);
    assert!(snap.pending_choices.is_empty());
}

/// **Test: the typing indicator brackets every message.**
///
/// **Setup:** Three text steps.
/// **Action:** Play to completion, inspect the exact event sequence.
/// **Expected:** For each message: Typing(true), Typing(false), Message, and
/// nothing else, so at most one indicator is ever active and it always
/// precedes its message.
#[tokio::test]
async fn test_typing_indicator_brackets_every_message() {
    let sink = Arc::new(RecordingSink::new());
    let seq = Sequencer::new(sink.clone());

    seq.start(linear_script()).await;
    assert!(wait_until(|| sink.message_count() == 3, 3000).await);
    sleep(Duration::from_millis(50)).await;

    let expected: Vec<SinkEvent> = ["one", "two", "three"]
        .into_iter()
        .flat_map(|text| {
            [
                SinkEvent::Typing(true),
                SinkEvent::Typing(false),
                SinkEvent::Message {
                    author: Author::Persona,
                    text: Some(text.to_string()),
                },
            ]
        })
        .collect();
    assert_eq!(sink.events(), expected);
}

/// **Test: a step with choices halts auto-advance.**
///
/// **Setup:** Branching script.
/// **Action:** `start`, wait for the choices event, then keep waiting.
/// **Expected:** One message, pending labels `["yes", "no"]`, and no further
/// playback until a selection is made.
#[tokio::test]
async fn test_choices_halt_playback() {
    let sink = Arc::new(RecordingSink::new());
    let seq = Sequencer::new(sink.clone());

    seq.start(branching_script()).await;
    assert!(
        wait_until(
            || sink
                .events()
                .iter()
                .any(|e| matches!(e, SinkEvent::Choices(_))),
            3000
        )
        .await
    );

    sleep(Duration::from_millis(100)).await;
    assert_eq!(sink.message_count(), 1);
    let snap = seq.snapshot().await;
    assert_eq!(snap.pending_choices, ["yes", "no"]);
    assert!(!snap.is_typing);
}

/// **Test: selecting the checkout branch echoes the label and fires the
/// action with no further message.**
///
/// **Setup:** Branching script played to its decision point.
/// **Action:** `select_choice("yes")`.
/// **Expected:** Log is `[A, visitor "yes"]`; an `OpenCheckout` action event
/// arrives; pending choices are cleared.
#[tokio::test]
async fn test_checkout_branch_fires_action() {
    let sink = Arc::new(RecordingSink::new());
    let seq = Sequencer::new(sink.clone());

    seq.start(branching_script()).await;
    assert!(wait_for_choices(&sink).await);

    seq.select_choice("yes").await;
    assert!(
        wait_until(
            || sink
                .events()
                .iter()
                .any(|e| matches!(e, SinkEvent::Action(Action::OpenCheckout))),
            3000
        )
        .await
    );

    let snap = seq.snapshot().await;
    let texts: Vec<_> = snap.messages.iter().map(|m| m.text().unwrap()).collect();
    assert_eq!(texts, ["A", "yes"]);
    assert_eq!(snap.messages[1].author, Author::Visitor);
    assert!(snap.pending_choices.is_empty());
    assert_eq!(sink.message_count(), 2);
}

/// **Test: selecting the other branch plays its reply.**
///
/// **Setup:** Branching script played to its decision point.
/// **Action:** `select_choice("no")`.
/// **Expected:** Log becomes `[A, visitor "no", D]`.
#[tokio::test]
async fn test_declined_branch_plays_reply() {
    let sink = Arc::new(RecordingSink::new());
    let seq = Sequencer::new(sink.clone());

    seq.start(branching_script()).await;
    assert!(wait_for_choices(&sink).await);

    seq.select_choice("no").await;
    assert!(wait_until(|| sink.message_count() == 3, 3000).await);

    let snap = seq.snapshot().await;
    let texts: Vec<_> = snap.messages.iter().map(|m| m.text().unwrap()).collect();
    assert_eq!(texts, ["A", "no", "D"]);
    assert_eq!(snap.messages[1].author, Author::Visitor);
    assert_eq!(snap.messages[2].author, Author::Persona);
}

/// **Test: an unlisted label leaves the session untouched.**
///
/// **Setup:** Branching script at its decision point.
/// **Action:** `select_choice("bogus")`, then a valid selection.
/// **Expected:** The stale selection changes nothing; the valid one still
/// works.
#[tokio::test]
async fn test_unlisted_choice_is_ignored() {
    let sink = Arc::new(RecordingSink::new());
    let seq = Sequencer::new(sink.clone());

    seq.start(branching_script()).await;
    assert!(wait_for_choices(&sink).await);

    let before = seq.snapshot().await;
    seq.select_choice("bogus").await;
    sleep(Duration::from_millis(80)).await;
    assert_eq!(seq.snapshot().await, before);

    seq.select_choice("no").await;
    assert!(wait_until(|| sink.message_count() == 3, 3000).await);
}

/// **Test: close cancels every scheduled timer.**
///
/// **Setup:** Script whose first typing window is long.
/// **Action:** `start`, wait for the typing indicator, `close`, then wait past
/// every scheduled delay.
/// **Expected:** No sink event of any kind (message, typing, choices) is
/// delivered after close, and the session state is empty.
#[tokio::test]
async fn test_close_cancels_pending_timers() {
    let sink = Arc::new(RecordingSink::new());
    let seq = Sequencer::new(sink.clone());

    let script = Script::new(
        "slow",
        "slow typing",
        vec![Step::text("never shown").typing(200).post_delay(50)],
    );
    seq.start(script).await;
    assert!(
        wait_until(
            || sink.events().contains(&SinkEvent::Typing(true)),
            3000
        )
        .await
    );

    seq.close().await;
    let frozen = sink.events();
    sleep(Duration::from_millis(400)).await;

    // The event log is frozen at close: no typing, message, or choices
    // event leaks out of the cancelled playback.
    assert_eq!(sink.events(), frozen);
    assert_eq!(sink.message_count(), 0);
    let snap = seq.snapshot().await;
    assert!(snap.messages.is_empty());
    assert!(snap.pending_choices.is_empty());
    assert!(!snap.is_typing);
}

/// **Test: a close racing the start of a typing window leaks no typing
/// event.**
///
/// **Setup:** Script with several zero-delay steps so playback is constantly
/// between emissions.
/// **Action:** `start` then `close` immediately, many rounds; after each
/// close, wait out any stragglers.
/// **Expected:** Whatever was delivered before each close stays; nothing
/// arrives after it. Playback interrupted before its first emission delivers
/// nothing at all.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_close_racing_playback_leaks_no_events() {
    for _ in 0..25 {
        let sink = Arc::new(RecordingSink::new());
        let seq = Sequencer::new(sink.clone());

        let script = Script::new(
            "burst",
            "no pacing",
            vec![Step::text("a"), Step::text("b"), Step::text("c")],
        );
        seq.start(script).await;
        seq.close().await;
        let frozen = sink.events();

        sleep(Duration::from_millis(30)).await;
        assert_eq!(sink.events(), frozen);
    }
}

/// **Test: re-opening restarts from the entry step with an empty log.**
///
/// **Setup:** Linear script played to completion, then closed.
/// **Action:** `start` the same script again.
/// **Expected:** The log begins again at the first step; nothing carries over.
#[tokio::test]
async fn test_reopen_restarts_from_entry() {
    let sink = Arc::new(RecordingSink::new());
    let seq = Sequencer::new(sink.clone());

    seq.start(linear_script()).await;
    assert!(wait_until(|| sink.message_count() == 3, 3000).await);
    seq.close().await;
    assert!(seq.snapshot().await.messages.is_empty());

    seq.start(linear_script()).await;
    assert!(wait_until(|| sink.message_count() == 6, 3000).await);

    let snap = seq.snapshot().await;
    assert_eq!(snap.messages.len(), 3);
    assert_eq!(snap.messages[0].text(), Some("one"));
}

/// **Test: start while a session is open is a no-op.**
///
/// **Setup:** Linear script.
/// **Action:** Call `start` twice back to back.
/// **Expected:** Exactly one playback: 3 messages, not 6.
#[tokio::test]
async fn test_start_while_open_is_noop() {
    let sink = Arc::new(RecordingSink::new());
    let seq = Sequencer::new(sink.clone());

    seq.start(linear_script()).await;
    seq.start(linear_script()).await;

    assert!(wait_until(|| sink.message_count() == 3, 3000).await);
    sleep(Duration::from_millis(200)).await;
    assert_eq!(sink.message_count(), 3);
}

/// Waits until the sink has seen the decision point.
async fn wait_for_choices(sink: &RecordingSink) -> bool {
    wait_until(
        || sink
            .events()
            .iter()
            .any(|e| matches!(e, SinkEvent::Choices(_))),
        3000,
    )
    .await
}
