//! Voter registry — admission, revocation, per-round voter status.
//!
//! The registry is pure bookkeeping: authorization and phase gating live
//! in the engine, which calls in here only after both checks pass.
//! Records are never deleted; revocation toggles `is_registered` off so
//! the identity can be re-admitted while registration is still open.

use crate::error::BallotError;
use ballot_types::{ParticipantId, ProposalId, Voter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    voters: HashMap<ParticipantId, Voter>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            voters: HashMap::new(),
        }
    }

    /// A registry with one identity already admitted (the genesis
    /// administrator).
    pub fn with_admitted(identity: &ParticipantId) -> Self {
        let mut voters = HashMap::new();
        voters.insert(identity.clone(), Voter::admitted());
        Self { voters }
    }

    /// Admit an identity. Fails if it is currently admitted; a revoked
    /// identity may be admitted again.
    pub fn admit(&mut self, identity: &ParticipantId) -> Result<(), BallotError> {
        let voter = self.voters.entry(identity.clone()).or_default();
        if voter.is_registered {
            return Err(BallotError::AlreadyRegistered(identity.clone()));
        }
        voter.is_registered = true;
        Ok(())
    }

    /// Revoke an admitted identity. The record stays; only the
    /// admission flag is cleared.
    pub fn revoke(&mut self, identity: &ParticipantId) -> Result<(), BallotError> {
        match self.voters.get_mut(identity) {
            Some(voter) if voter.is_registered => {
                voter.is_registered = false;
                Ok(())
            }
            _ => Err(BallotError::NotRegistered(identity.clone())),
        }
    }

    /// Whether an identity is currently admitted.
    pub fn is_registered(&self, identity: &ParticipantId) -> bool {
        self.voters
            .get(identity)
            .map(|v| v.is_registered)
            .unwrap_or(false)
    }

    /// The voter record for an identity. Never-admitted identities get
    /// the all-false zero record.
    pub fn get(&self, identity: &ParticipantId) -> Voter {
        self.voters.get(identity).cloned().unwrap_or_default()
    }

    /// Irreversibly mark an admitted voter as having voted for
    /// `proposal`. Fails on a second vote.
    pub fn mark_voted(
        &mut self,
        identity: &ParticipantId,
        proposal: ProposalId,
    ) -> Result<(), BallotError> {
        let voter = self
            .voters
            .get_mut(identity)
            .filter(|v| v.is_registered)
            .ok_or_else(|| BallotError::NotRegistered(identity.clone()))?;
        if voter.has_voted {
            return Err(BallotError::AlreadyVoted(identity.clone()));
        }
        voter.has_voted = true;
        voter.voted_proposal = Some(proposal);
        Ok(())
    }

    /// Number of currently admitted voters.
    pub fn registered_count(&self) -> usize {
        self.voters.values().filter(|v| v.is_registered).count()
    }

    /// Number of voters that have cast their vote.
    pub fn voted_count(&self) -> usize {
        self.voters.values().filter(|v| v.has_voted).count()
    }
}
