//! The conversation sequencer: deterministic playback of a branching script
//! into the message log, with the visitor's quick-reply selections steering
//! which branch plays.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use script::{Script, Step};
use simchat_core::{ConversationSink, Message};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::session::{SessionSnapshot, SessionState};

/// Plays a validated script. One sequencer serves one conversation surface;
/// its session lives from `start` to `close`. The script must already have
/// passed [`script::Script::validate`]; playback assumes a well-formed tree.
pub struct Sequencer {
    sink: Arc<dyn ConversationSink>,
    state: Arc<RwLock<SessionState>>,
    running: AtomicBool,
    cancel: Mutex<CancellationToken>,
    /// Current playback task; at most one is alive per session. `close`
    /// awaits it after cancelling so no sink event outlives the close.
    playback: Mutex<Option<JoinHandle<()>>>,
}

impl Sequencer {
    pub fn new(sink: Arc<dyn ConversationSink>) -> Self {
        Self {
            sink,
            state: Arc::new(RwLock::new(SessionState::default())),
            running: AtomicBool::new(false),
            cancel: Mutex::new(CancellationToken::new()),
            playback: Mutex::new(None),
        }
    }

    /// Opens a session and begins playing `script` from its first step.
    /// Re-invocation while a session is already open is a no-op, so rapid
    /// surface toggling cannot start duplicate playback.
    #[instrument(skip(self, script), fields(script_id = %script.id))]
    pub async fn start(&self, script: Script) {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("session already open, ignoring start");
            return;
        }
        let token = CancellationToken::new();
        *self.cancel.lock().await = token.clone();
        {
            let mut state = self.state.write().await;
            *state = SessionState::default();
        }
        info!("session opened");
        let handle = spawn_playback(script.steps, self.state.clone(), self.sink.clone(), token);
        *self.playback.lock().await = Some(handle);
    }

    /// Echoes the selected label as a visitor message, clears the pending
    /// choices, and plays the chosen branch (which replaces the remainder of
    /// the outer sequence). A label that is not currently pending is a
    /// no-error no-op, so a stale surface cannot corrupt the session.
    #[instrument(skip(self))]
    pub async fn select_choice(&self, label: &str) {
        let token = self.cancel.lock().await.clone();
        if token.is_cancelled() {
            return;
        }
        let (branch, echo) = {
            let mut state = self.state.write().await;
            let Some(idx) = state.pending.iter().position(|c| c.label == label) else {
                debug!(label, "label not pending, ignoring selection");
                return;
            };
            let choice = state.pending.remove(idx);
            state.pending.clear();
            let echo = Message::visitor_text(&choice.label);
            state.messages.push(echo.clone());
            (choice.branch, echo)
        };
        info!(label, "choice selected");
        if token.is_cancelled() {
            return;
        }
        notify(self.sink.message_appended(&echo).await);
        let handle = spawn_playback(branch, self.state.clone(), self.sink.clone(), token);
        *self.playback.lock().await = Some(handle);
    }

    /// Closes the surface: one cancellation covers every pending typing and
    /// post-delay timer, then the playback task is awaited before session
    /// state is discarded, so by the time this returns no sink event can
    /// follow. Starting again afterwards replays the script from its entry
    /// step with an empty log.
    #[instrument(skip(self))]
    pub async fn close(&self) {
        self.cancel.lock().await.cancel();
        let handle = self.playback.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
        let mut state = self.state.write().await;
        *state = SessionState::default();
        self.running.store(false, Ordering::SeqCst);
        info!("session closed");
    }

    /// Current session state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.snapshot()
    }
}

fn spawn_playback(
    steps: Vec<Step>,
    state: Arc<RwLock<SessionState>>,
    sink: Arc<dyn ConversationSink>,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        play(steps, state, sink, token).await;
    })
}

/// Plays one linear run of steps. Exactly one playback task is alive per
/// session: it either runs to a terminal directive (and a later
/// `select_choice` spawns the branch), or runs out of steps and the session
/// goes idle.
async fn play(
    steps: Vec<Step>,
    state: Arc<RwLock<SessionState>>,
    sink: Arc<dyn ConversationSink>,
    token: CancellationToken,
) {
    for step in steps {
        if let Some(body) = step.body {
            {
                let mut st = state.write().await;
                if token.is_cancelled() {
                    return;
                }
                st.is_typing = true;
            }
            // Re-check after releasing the lock: a concurrent close may have
            // cancelled in the window before the emit.
            if token.is_cancelled() {
                return;
            }
            notify(sink.typing_changed(true).await);
            if !wait(&token, step.typing_ms).await {
                return;
            }
            let message = Message::persona(body);
            {
                let mut st = state.write().await;
                if token.is_cancelled() {
                    return;
                }
                st.is_typing = false;
                st.messages.push(message.clone());
            }
            if token.is_cancelled() {
                return;
            }
            notify(sink.typing_changed(false).await);
            notify(sink.message_appended(&message).await);
            if !wait(&token, step.post_delay_ms).await {
                return;
            }
        } else if !wait(&token, step.post_delay_ms).await {
            return;
        }

        if !step.choices.is_empty() {
            let labels: Vec<String> = step.choices.iter().map(|c| c.label.clone()).collect();
            {
                let mut st = state.write().await;
                if token.is_cancelled() {
                    return;
                }
                st.pending = step.choices;
            }
            if token.is_cancelled() {
                return;
            }
            notify(sink.choices_presented(&labels).await);
            return;
        }
        if let Some(action) = step.action {
            if token.is_cancelled() {
                return;
            }
            info!(?action, "script reached its terminal action");
            notify(sink.action_triggered(&action).await);
            return;
        }
    }
    debug!("script ran out of steps, session idle");
}

/// Cancellable pause. Returns false when the surface closed during the wait.
async fn wait(token: &CancellationToken, ms: u64) -> bool {
    if ms == 0 {
        return !token.is_cancelled();
    }
    tokio::select! {
        _ = token.cancelled() => false,
        _ = tokio::time::sleep(Duration::from_millis(ms)) => true,
    }
}

/// Presentation failures are logged, never propagated: a broken surface must
/// not derail playback.
fn notify(result: simchat_core::Result<()>) {
    if let Err(e) = result {
        error!(error = %e, "sink rejected event");
    }
}
