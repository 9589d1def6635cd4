//! The workflow phase machine.
//!
//! A round moves through exactly six phases in one linear order. The
//! engine only ever advances by one phase at a time; there is no
//! branching, skipping, or going backward. A finished round is not
//! reset — a new round is a new engine instance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The current stage of a ballot round.
///
/// Variant order is the legal transition order, so the derived `Ord`
/// agrees with chronological order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorkflowPhase {
    /// The administrator admits (and may revoke) voters.
    RegisteringVoters,
    /// Admitted voters submit proposals.
    ProposalsRegistrationStarted,
    /// Submission window closed; voting not yet open.
    ProposalsRegistrationEnded,
    /// Admitted voters cast their single vote.
    VotingSessionStarted,
    /// Voting window closed; awaiting the tally.
    VotingSessionEnded,
    /// Terminal phase: the winning proposal is fixed.
    VotesTallied,
}

impl WorkflowPhase {
    /// All phases in transition order.
    pub const ALL: [WorkflowPhase; 6] = [
        Self::RegisteringVoters,
        Self::ProposalsRegistrationStarted,
        Self::ProposalsRegistrationEnded,
        Self::VotingSessionStarted,
        Self::VotingSessionEnded,
        Self::VotesTallied,
    ];

    /// The unique next phase, or `None` at the terminal phase.
    pub fn successor(&self) -> Option<WorkflowPhase> {
        match self {
            Self::RegisteringVoters => Some(Self::ProposalsRegistrationStarted),
            Self::ProposalsRegistrationStarted => Some(Self::ProposalsRegistrationEnded),
            Self::ProposalsRegistrationEnded => Some(Self::VotingSessionStarted),
            Self::VotingSessionStarted => Some(Self::VotingSessionEnded),
            Self::VotingSessionEnded => Some(Self::VotesTallied),
            Self::VotesTallied => None,
        }
    }

    /// Whether this is the terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::VotesTallied)
    }

    /// Stable machine-readable name of this phase.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegisteringVoters => "registering_voters",
            Self::ProposalsRegistrationStarted => "proposals_registration_started",
            Self::ProposalsRegistrationEnded => "proposals_registration_ended",
            Self::VotingSessionStarted => "voting_session_started",
            Self::VotingSessionEnded => "voting_session_ended",
            Self::VotesTallied => "votes_tallied",
        }
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successor_chain_covers_all_phases_in_order() {
        let mut phase = WorkflowPhase::RegisteringVoters;
        let mut visited = vec![phase];
        while let Some(next) = phase.successor() {
            visited.push(next);
            phase = next;
        }
        assert_eq!(visited, WorkflowPhase::ALL);
    }

    #[test]
    fn test_only_terminal_phase_has_no_successor() {
        for phase in WorkflowPhase::ALL {
            assert_eq!(phase.successor().is_none(), phase.is_terminal());
        }
        assert!(WorkflowPhase::VotesTallied.is_terminal());
    }

    #[test]
    fn test_successor_is_strictly_later() {
        for phase in WorkflowPhase::ALL {
            if let Some(next) = phase.successor() {
                assert!(next > phase);
            }
        }
    }
}
