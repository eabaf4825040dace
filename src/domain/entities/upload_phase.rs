//! # UploadPhase
//!
//! アップロードの状態遷移

use std::fmt;

/// アップロードの状態
///
/// `Idle → Splitting → SessionInit → UploadingParts → Completing → Succeeded`
/// の順にのみ進む。終端以外のどの状態からも `Failed` に遷移できる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Splitting,
    SessionInit,
    UploadingParts,
    Completing,
    Succeeded,
    Failed,
}

impl UploadPhase {
    /// 終端状態かどうか
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadPhase::Succeeded | UploadPhase::Failed)
    }

    /// `next` への遷移が許されるか
    pub fn can_transition_to(self, next: UploadPhase) -> bool {
        use UploadPhase::*;

        match (self, next) {
            (current, Failed) => !current.is_terminal() && current != Idle,
            (Idle, Splitting)
            | (Splitting, SessionInit)
            | (SessionInit, UploadingParts)
            | (UploadingParts, Completing)
            | (Completing, Succeeded) => true,
            _ => false,
        }
    }
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadPhase::Idle => "idle",
            UploadPhase::Splitting => "splitting",
            UploadPhase::SessionInit => "session-init",
            UploadPhase::UploadingParts => "uploading-parts",
            UploadPhase::Completing => "completing",
            UploadPhase::Succeeded => "succeeded",
            UploadPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert!(UploadPhase::Idle.can_transition_to(UploadPhase::Splitting));
        assert!(UploadPhase::Splitting.can_transition_to(UploadPhase::SessionInit));
        assert!(UploadPhase::SessionInit.can_transition_to(UploadPhase::UploadingParts));
        assert!(UploadPhase::UploadingParts.can_transition_to(UploadPhase::Completing));
        assert!(UploadPhase::Completing.can_transition_to(UploadPhase::Succeeded));
    }

    #[test]
    fn test_no_backward_or_skipping_transitions() {
        assert!(!UploadPhase::UploadingParts.can_transition_to(UploadPhase::SessionInit));
        assert!(!UploadPhase::Splitting.can_transition_to(UploadPhase::Completing));
        assert!(!UploadPhase::Idle.can_transition_to(UploadPhase::Succeeded));
    }

    #[test]
    fn test_failed_from_active_phases_only() {
        assert!(UploadPhase::Splitting.can_transition_to(UploadPhase::Failed));
        assert!(UploadPhase::Completing.can_transition_to(UploadPhase::Failed));
        assert!(!UploadPhase::Idle.can_transition_to(UploadPhase::Failed));
        assert!(!UploadPhase::Succeeded.can_transition_to(UploadPhase::Failed));
        assert!(!UploadPhase::Failed.can_transition_to(UploadPhase::Failed));
    }

    #[test]
    fn test_display() {
        assert_eq!(UploadPhase::UploadingParts.to_string(), "uploading-parts");
    }
}
