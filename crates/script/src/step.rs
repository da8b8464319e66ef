//! Script step tree and load-time validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use simchat_core::{Action, MessageKind};
use thiserror::Error;

/// Validation failures for a script. All of these are authoring errors: a
/// script is static, locally-defined data, so a malformed one is rejected
/// when it is defined or loaded, never while it plays. `path` locates the
/// offending step, e.g. `steps[1].choices["Yes, show me"].steps[0]`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("script has no steps")]
    Empty,

    #[error("{path}: step carries both choices and an action")]
    ConflictingTerminals { path: String },

    #[error("{path}: step has no content and no terminal directive")]
    InertStep { path: String },

    #[error("{path}: choice label is empty")]
    EmptyChoiceLabel { path: String },

    #[error("{path}: duplicate choice label '{label}'")]
    DuplicateChoiceLabel { path: String, label: String },

    #[error("{path}: choice '{label}' leads to an empty branch")]
    EmptyBranch { path: String, label: String },

    #[error("{path}: step follows a terminal directive and can never play")]
    UnreachableStep { path: String },

    #[error("invalid script JSON: {0}")]
    Parse(String),
}

/// A quick-reply offered at a decision point. Selecting it echoes `label` as
/// a visitor message and plays `branch`, which fully replaces the remainder
/// of the outer sequence (no merge-back).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub branch: Vec<Step>,
}

impl Choice {
    pub fn new(label: impl Into<String>, branch: Vec<Step>) -> Self {
        Self {
            label: label.into(),
            branch,
        }
    }
}

/// One unit of scripted output: an optional message body, its pacing, and at
/// most one terminal directive (choices or action). With neither directive
/// the sequencer auto-advances to the next sibling. A bodyless step is a bare
/// decision point or action hand-off and appends nothing to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<MessageKind>,
    /// Simulated typing time before the message appears, in milliseconds.
    #[serde(default)]
    pub typing_ms: u64,
    /// Pause after the message appears before the next step begins, in
    /// milliseconds.
    #[serde(default)]
    pub post_delay_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl Step {
    /// A plain text step.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_body(MessageKind::Text { text: text.into() })
    }

    /// An image step with an optional caption.
    pub fn image(url: impl Into<String>, caption: Option<String>) -> Self {
        Self::with_body(MessageKind::Image {
            url: url.into(),
            caption,
        })
    }

    /// A text step carrying a checkout button.
    pub fn call_to_action(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_body(MessageKind::CallToAction {
            text: text.into(),
            label: label.into(),
        })
    }

    /// A bodyless step that immediately fires a terminal action.
    pub fn action_step(action: Action) -> Self {
        Self {
            body: None,
            typing_ms: 0,
            post_delay_ms: 0,
            choices: Vec::new(),
            action: Some(action),
        }
    }

    fn with_body(body: MessageKind) -> Self {
        Self {
            body: Some(body),
            typing_ms: 0,
            post_delay_ms: 0,
            choices: Vec::new(),
            action: None,
        }
    }

    /// Sets the simulated typing time in milliseconds.
    pub fn typing(mut self, ms: u64) -> Self {
        self.typing_ms = ms;
        self
    }

    /// Sets the pause after the message appears, in milliseconds.
    pub fn post_delay(mut self, ms: u64) -> Self {
        self.post_delay_ms = ms;
        self
    }

    /// Attaches quick-reply choices; the step halts playback until one is
    /// selected.
    pub fn choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    /// Attaches a terminal action.
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    fn is_terminal(&self) -> bool {
        !self.choices.is_empty() || self.action.is_some()
    }
}

/// A complete branching script: entry steps plus identity for the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub id: String,
    pub title: String,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn new(id: impl Into<String>, title: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            steps,
        }
    }

    /// Loads and validates a script from JSON.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let script: Script =
            serde_json::from_str(json).map_err(|e| ScriptError::Parse(e.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    /// Walks the whole tree once and rejects malformed shapes: an empty
    /// script, a step with both terminals, a step with nothing to do, empty
    /// or duplicate choice labels, empty branches, and steps shadowed by an
    /// earlier terminal sibling. A trailing step with no terminal is a legal
    /// dead end: playback goes idle there.
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.steps.is_empty() {
            return Err(ScriptError::Empty);
        }
        validate_steps(&self.steps, "")
    }
}

fn validate_steps(steps: &[Step], prefix: &str) -> Result<(), ScriptError> {
    let mut terminal_seen = false;
    for (i, step) in steps.iter().enumerate() {
        let path = format!("{prefix}steps[{i}]");
        if terminal_seen {
            return Err(ScriptError::UnreachableStep { path });
        }
        if !step.choices.is_empty() && step.action.is_some() {
            return Err(ScriptError::ConflictingTerminals { path });
        }
        if step.body.is_none() && !step.is_terminal() {
            return Err(ScriptError::InertStep { path });
        }
        let mut labels = HashSet::new();
        for choice in &step.choices {
            if choice.label.trim().is_empty() {
                return Err(ScriptError::EmptyChoiceLabel { path });
            }
            if !labels.insert(choice.label.as_str()) {
                return Err(ScriptError::DuplicateChoiceLabel {
                    path,
                    label: choice.label.clone(),
                });
            }
            if choice.branch.is_empty() {
                return Err(ScriptError::EmptyBranch {
                    path,
                    label: choice.label.clone(),
                });
            }
            let branch_prefix = format!("{path}.choices[\"{}\"].", choice.label);
            validate_steps(&choice.branch, &branch_prefix)?;
        }
        terminal_seen = step.is_terminal();
    }
    Ok(())
}
