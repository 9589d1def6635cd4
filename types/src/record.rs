//! Voter and proposal records kept by the engine for one round.

use serde::{Deserialize, Serialize};

/// A proposal's position in the append-only ledger. Assigned at
/// insertion, never reused or reordered within a round.
pub type ProposalId = u64;

/// Per-participant status for the round.
///
/// The all-false default record stands in for identities that were never
/// admitted; absence is not an error at the storage layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Currently admitted. Revocable only while voters are registering.
    pub is_registered: bool,
    /// Set exactly once, irreversibly, by a successful vote.
    pub has_voted: bool,
    /// The proposal this voter chose. `Some` iff `has_voted`.
    pub voted_proposal: Option<ProposalId>,
}

impl Voter {
    /// A freshly admitted voter that has not voted.
    pub fn admitted() -> Self {
        Self {
            is_registered: true,
            has_voted: false,
            voted_proposal: None,
        }
    }
}

/// An accepted proposal and its running vote count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Free-form, non-empty description text.
    pub description: String,
    /// Incremented only by successful votes referencing this proposal.
    pub vote_count: u64,
}

impl Proposal {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            vote_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_voter_is_zero_record() {
        let voter = Voter::default();
        assert!(!voter.is_registered);
        assert!(!voter.has_voted);
        assert_eq!(voter.voted_proposal, None);
    }

    #[test]
    fn test_admitted_voter_has_not_voted() {
        let voter = Voter::admitted();
        assert!(voter.is_registered);
        assert!(!voter.has_voted);
        assert_eq!(voter.voted_proposal, None);
    }

    #[test]
    fn test_new_proposal_starts_at_zero_votes() {
        let proposal = Proposal::new("upgrade the kitchen");
        assert_eq!(proposal.description, "upgrade the kitchen");
        assert_eq!(proposal.vote_count, 0);
    }
}
