//! Fundamental types for the ballot workflow engine.
//!
//! This crate defines the types shared across the workspace: participant
//! identities, the workflow phase machine, and the voter/proposal records
//! the engine keeps per round.

pub mod identity;
pub mod phase;
pub mod record;

pub use identity::ParticipantId;
pub use phase::WorkflowPhase;
pub use record::{Proposal, ProposalId, Voter};
