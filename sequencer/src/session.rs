//! Per-open session state. Created when the conversation surface opens,
//! discarded on close; no identity survives a close/reopen.

use script::Choice;
use simchat_core::Message;

/// Read-only view of the session, cheap to clone for rendering or assertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    /// Labels of the quick replies currently awaiting a selection.
    pub pending_choices: Vec<String>,
    pub is_typing: bool,
}

/// Mutable session state owned by the sequencer. `pending` keeps the full
/// choices (labels plus branches) so a selection can resume playback.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub messages: Vec<Message>,
    pub pending: Vec<Choice>,
    pub is_typing: bool,
}

impl SessionState {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.messages.clone(),
            pending_choices: self.pending.iter().map(|c| c.label.clone()).collect(),
            is_typing: self.is_typing,
        }
    }
}
