//! Ballot workflow errors.
//!
//! Every failure is a well-typed rejection of one operation. A rejected
//! operation performs no partial state mutation and emits no event; the
//! engine stays ready for the next valid call.

use ballot_types::{ParticipantId, ProposalId, WorkflowPhase};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BallotError {
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    #[error("operation requires phase {required}, current phase is {current}")]
    InvalidPhase {
        current: WorkflowPhase,
        required: WorkflowPhase,
    },

    #[error("cannot advance from {from} to {to}")]
    InvalidTransition {
        from: WorkflowPhase,
        to: WorkflowPhase,
    },

    #[error("participant {0} is already registered")]
    AlreadyRegistered(ParticipantId),

    #[error("participant {0} is not registered")]
    NotRegistered(ParticipantId),

    #[error("proposal description must not be empty")]
    EmptyDescription,

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("participant {0} has already voted")]
    AlreadyVoted(ParticipantId),

    #[error("tally result is not available before votes are tallied")]
    TallyNotAvailable,

    #[error("cannot tally a round with no proposals")]
    NoProposals,

    #[error("event log does not replay against engine state: {0}")]
    InvalidEventLog(String),

    #[error("snapshot serialization failed: {0}")]
    Snapshot(String),
}
