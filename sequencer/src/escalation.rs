//! One-shot dwell timer that surfaces the payment prompt.
//!
//! Runs independently of the sequencer's timers: the two may fire in either
//! order, and neither observes the other. The only coupling is the shared
//! sink.

use std::sync::Arc;
use std::time::Duration;

use simchat_core::ConversationSink;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

struct TriggerState {
    token: CancellationToken,
    armed: bool,
    /// Bumped on every arm so a stale timer task cannot clear a newer arm.
    generation: u64,
}

/// Surfaces a payment prompt a fixed duration after the conversation surface
/// opens. At most one prompt fires per arm; disarming cancels a prompt that
/// has not fired yet; after a fire (or a disarm) the trigger can be armed
/// fresh: re-opening re-arms, and a dismissed prompt can schedule a later
/// reminder.
pub struct EscalationTrigger {
    sink: Arc<dyn ConversationSink>,
    state: Arc<Mutex<TriggerState>>,
}

impl EscalationTrigger {
    pub fn new(sink: Arc<dyn ConversationSink>) -> Self {
        Self {
            sink,
            state: Arc::new(Mutex::new(TriggerState {
                token: CancellationToken::new(),
                armed: false,
                generation: 0,
            })),
        }
    }

    /// Schedules the prompt `delay` from now. Arming while already armed is a
    /// no-op.
    #[instrument(skip(self))]
    pub async fn arm(&self, delay: Duration) {
        let (token, generation) = {
            let mut state = self.state.lock().await;
            if state.armed {
                debug!("already armed, ignoring");
                return;
            }
            state.armed = true;
            state.generation += 1;
            state.token = CancellationToken::new();
            (state.token.clone(), state.generation)
        };
        info!(delay_ms = delay.as_millis() as u64, "escalation armed");

        let sink = self.sink.clone();
        let shared = self.state.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if !token.is_cancelled() {
                        info!("escalation fired");
                        if let Err(e) = sink.payment_prompt_requested().await {
                            error!(error = %e, "sink rejected payment prompt");
                        }
                    }
                }
            }
            let mut state = shared.lock().await;
            if state.generation == generation {
                state.armed = false;
            }
        });
    }

    /// Cancels a scheduled prompt that has not fired yet. Safe to call when
    /// nothing is armed.
    #[instrument(skip(self))]
    pub async fn disarm(&self) {
        let mut state = self.state.lock().await;
        state.token.cancel();
        state.armed = false;
        debug!("escalation disarmed");
    }

    /// Whether a prompt is currently scheduled.
    pub async fn is_armed(&self) -> bool {
        self.state.lock().await.armed
    }
}
