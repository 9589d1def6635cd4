//! Append-only, index-addressed proposal ledger.
//!
//! A proposal's id is its insertion position — stable, gap-free, never
//! reused within a round. Lookup and vote increment are O(1); the tally
//! scan is O(n), acceptable since the proposal count is bounded by the
//! admitted-voter cardinality.

use crate::error::BallotError;
use ballot_types::{Proposal, ProposalId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalLedger {
    proposals: Vec<Proposal>,
}

impl ProposalLedger {
    pub fn new() -> Self {
        Self {
            proposals: Vec::new(),
        }
    }

    /// Append a proposal and return its id. Descriptions are compared by
    /// content: the empty string is rejected regardless of provenance.
    pub fn submit(&mut self, description: &str) -> Result<ProposalId, BallotError> {
        if description.is_empty() {
            return Err(BallotError::EmptyDescription);
        }
        let id = self.proposals.len() as ProposalId;
        self.proposals.push(Proposal::new(description));
        Ok(id)
    }

    /// Look up a proposal by id.
    pub fn get(&self, id: ProposalId) -> Result<&Proposal, BallotError> {
        self.proposals
            .get(id as usize)
            .ok_or(BallotError::ProposalNotFound(id))
    }

    /// All proposals in insertion order.
    pub fn list(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Record one vote for a proposal.
    pub fn record_vote(&mut self, id: ProposalId) -> Result<(), BallotError> {
        let proposal = self
            .proposals
            .get_mut(id as usize)
            .ok_or(BallotError::ProposalNotFound(id))?;
        proposal.vote_count += 1;
        Ok(())
    }

    /// The lowest-indexed proposal with the strictly greatest vote count.
    ///
    /// A later proposal with an equal count never displaces an earlier
    /// leader. Fails on an empty ledger.
    pub fn leading(&self) -> Result<ProposalId, BallotError> {
        if self.proposals.is_empty() {
            return Err(BallotError::NoProposals);
        }
        let mut winner = 0;
        for (id, proposal) in self.proposals.iter().enumerate().skip(1) {
            if proposal.vote_count > self.proposals[winner].vote_count {
                winner = id;
            }
        }
        Ok(winner as ProposalId)
    }

    /// Sum of all vote counts.
    pub fn total_votes(&self) -> u64 {
        self.proposals.iter().map(|p| p.vote_count).sum()
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}
