//! Submission progress

use serde::{Deserialize, Serialize};

/// Phase of a two-record submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmitStep {
    #[default]
    Idle,
    BasicInfo,
    Details,
    Complete,
    Error,
}

impl SubmitStep {
    /// A create call is running (or about to run) for this step
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::BasicInfo | Self::Details)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}

/// Progress snapshot published while submitting
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmitProgress {
    pub step: SubmitStep,
    pub message: String,
}

impl SubmitProgress {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn basic_info() -> Self {
        Self {
            step: SubmitStep::BasicInfo,
            message: "Submitting basicInfo...".to_string(),
        }
    }

    pub fn details() -> Self {
        Self {
            step: SubmitStep::Details,
            message: "Submitting details...".to_string(),
        }
    }

    pub fn complete() -> Self {
        Self {
            step: SubmitStep::Complete,
            message: "All data processed successfully!".to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            step: SubmitStep::Error,
            message: message.into(),
        }
    }

    /// Progress bar fill
    pub fn percent(&self) -> u8 {
        match self.step {
            SubmitStep::Idle | SubmitStep::Error => 0,
            SubmitStep::BasicInfo => 25,
            SubmitStep::Details => 75,
            SubmitStep::Complete => 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(SubmitProgress::idle().percent(), 0);
        assert_eq!(SubmitProgress::basic_info().percent(), 25);
        assert_eq!(SubmitProgress::details().percent(), 75);
        assert_eq!(SubmitProgress::complete().percent(), 100);
        assert_eq!(SubmitProgress::error("boom").percent(), 0);
    }

    #[test]
    fn test_step_serializes_like_the_ui_expects() {
        let json = serde_json::to_string(&SubmitProgress::basic_info()).unwrap();
        assert_eq!(json, r#"{"step":"basicInfo","message":"Submitting basicInfo..."}"#);
    }
}
