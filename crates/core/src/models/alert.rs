use serde::{Deserialize, Serialize};

/// Visual severity of a user-facing alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Danger,
    Success,
}

/// An alert before amount substitution.
///
/// Payment amounts stay as raw msat payloads so they can be rendered
/// with whatever unit and rate are active when the alert is actually
/// shown, not the ones active when the payment happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertKind {
    Error(String),
    Received(u64),
    Sent(u64),
    SettingsSaved,
}

impl AlertKind {
    pub fn severity(&self) -> Severity {
        match self {
            AlertKind::Error(_) => Severity::Danger,
            _ => Severity::Success,
        }
    }
}

/// A rendered, user-visible alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}
