//! Bincode snapshots of full engine state.
//!
//! The engine owns no storage; callers that want durability serialize a
//! snapshot and keep the bytes wherever they like. Loading a snapshot
//! yields an engine with no subscribed listeners.

use crate::engine::BallotEngine;
use crate::error::BallotError;
use crate::event::{BallotEvent, EventBus};
use crate::ledger::ProposalLedger;
use crate::registry::Registry;
use ballot_types::{ParticipantId, ProposalId, WorkflowPhase};
use serde::{Deserialize, Serialize};

/// A serializable capture of one round's complete state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BallotSnapshot {
    pub admin: ParticipantId,
    pub phase: WorkflowPhase,
    pub registry: Registry,
    pub ledger: ProposalLedger,
    pub winning_proposal: Option<ProposalId>,
    pub log: Vec<BallotEvent>,
}

impl BallotEngine {
    /// Capture the current state. Also handy in tests for before/after
    /// equality checks around rejected operations.
    pub fn snapshot(&self) -> BallotSnapshot {
        BallotSnapshot {
            admin: self.admin.clone(),
            phase: self.phase,
            registry: self.registry.clone(),
            ledger: self.ledger.clone(),
            winning_proposal: self.winning_proposal,
            log: self.log.clone(),
        }
    }

    /// Rebuild an engine from a snapshot.
    pub fn from_snapshot(snapshot: BallotSnapshot) -> Self {
        Self {
            admin: snapshot.admin,
            phase: snapshot.phase,
            registry: snapshot.registry,
            ledger: snapshot.ledger,
            winning_proposal: snapshot.winning_proposal,
            log: snapshot.log,
            bus: EventBus::new(),
        }
    }

    /// Serialize the engine state to bytes.
    pub fn save_state(&self) -> Result<Vec<u8>, BallotError> {
        bincode::serialize(&self.snapshot()).map_err(|e| BallotError::Snapshot(e.to_string()))
    }

    /// Restore an engine from serialized bytes.
    pub fn load_state(data: &[u8]) -> Result<Self, BallotError> {
        let snapshot: BallotSnapshot =
            bincode::deserialize(data).map_err(|e| BallotError::Snapshot(e.to_string()))?;
        Ok(Self::from_snapshot(snapshot))
    }
}
