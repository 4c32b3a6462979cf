//! The approve-then-create transaction sequence for the create page.
//!
//! The only real state machine in the client. The create page drives it with
//! `step`; errors at any stage reset to `Idle` and the page keeps the message
//! in its own signal.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CreateFlow {
    #[default]
    Idle,
    AwaitingApprovalSignature,
    AwaitingApprovalReceipt,
    AwaitingCreateSignature,
    AwaitingCreateReceipt,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowEvent {
    Submit,
    ApprovalSubmitted,
    ApprovalConfirmed { decimals_known: bool },
    CreateSubmitted,
    CreateConfirmed,
    Error,
}

/// Advance the flow. Approval confirmation only advances once the token's
/// decimals are known, since the creation amount is re-derived from them.
/// Events that make no sense for the current state are ignored.
pub fn step(state: CreateFlow, event: FlowEvent) -> CreateFlow {
    use CreateFlow::*;
    use FlowEvent::*;
    match (state, event) {
        (_, Error) => Idle,
        (Idle | Done, Submit) => AwaitingApprovalSignature,
        (AwaitingApprovalSignature, ApprovalSubmitted) => AwaitingApprovalReceipt,
        (AwaitingApprovalReceipt, ApprovalConfirmed { decimals_known: true }) => {
            AwaitingCreateSignature
        }
        (AwaitingCreateSignature, CreateSubmitted) => AwaitingCreateReceipt,
        (AwaitingCreateReceipt, CreateConfirmed) => Done,
        (state, _) => state,
    }
}

impl CreateFlow {
    pub fn is_busy(&self) -> bool {
        !matches!(self, Self::Idle | Self::Done)
    }

    pub fn status_line(&self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::AwaitingApprovalSignature => Some("Signing approval transaction..."),
            Self::AwaitingApprovalReceipt => Some("Processing approval transaction..."),
            Self::AwaitingCreateSignature => Some("Signing creation transaction..."),
            Self::AwaitingCreateReceipt => Some("Processing creation transaction..."),
            Self::Done => Some("Raindrop created"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CreateFlow::*;
    use super::FlowEvent::*;
    use super::*;

    #[test]
    fn happy_path_orders_approve_before_create() {
        let mut state = CreateFlow::default();
        let events = [
            Submit,
            ApprovalSubmitted,
            ApprovalConfirmed {
                decimals_known: true,
            },
            CreateSubmitted,
            CreateConfirmed,
        ];
        let expected = [
            AwaitingApprovalSignature,
            AwaitingApprovalReceipt,
            AwaitingCreateSignature,
            AwaitingCreateReceipt,
            Done,
        ];
        for (event, want) in events.into_iter().zip(expected) {
            state = step(state, event);
            assert_eq!(state, want);
        }
    }

    #[test]
    fn create_cannot_start_without_decimals() {
        let state = step(
            AwaitingApprovalReceipt,
            ApprovalConfirmed {
                decimals_known: false,
            },
        );
        assert_eq!(state, AwaitingApprovalReceipt);
    }

    #[test]
    fn any_error_resets_to_idle() {
        for state in [
            AwaitingApprovalSignature,
            AwaitingApprovalReceipt,
            AwaitingCreateSignature,
            AwaitingCreateReceipt,
        ] {
            assert_eq!(step(state, Error), Idle);
        }
    }

    #[test]
    fn stray_events_are_ignored() {
        assert_eq!(step(Idle, CreateConfirmed), Idle);
        assert_eq!(step(AwaitingApprovalSignature, Submit), AwaitingApprovalSignature);
        assert_eq!(
            step(
                AwaitingCreateReceipt,
                ApprovalConfirmed {
                    decimals_known: true
                }
            ),
            AwaitingCreateReceipt
        );
    }

    #[test]
    fn done_allows_a_fresh_submission() {
        assert_eq!(step(Done, Submit), AwaitingApprovalSignature);
    }

    #[test]
    fn busy_covers_all_in_flight_states() {
        assert!(!Idle.is_busy());
        assert!(!Done.is_busy());
        assert!(AwaitingApprovalSignature.is_busy());
        assert!(AwaitingApprovalReceipt.is_busy());
        assert!(AwaitingCreateSignature.is_busy());
        assert!(AwaitingCreateReceipt.is_busy());
    }
}
