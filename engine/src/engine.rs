//! Core workflow engine — authorization, phase gating, voting, tally.
//!
//! Every operation runs the same pipeline: authorize the caller, check
//! the phase, mutate registry/ledger state, then record the audit event.
//! The checks all come before the first mutation, so a rejected call
//! leaves the engine untouched.

use crate::error::BallotError;
use crate::event::{BallotEvent, EventBus};
use crate::ledger::ProposalLedger;
use crate::registry::Registry;
use ballot_types::{ParticipantId, Proposal, ProposalId, Voter, WorkflowPhase};
use std::collections::HashSet;

/// One ballot round: registry, proposal ledger, and phase machine behind
/// a single serialized entry point per operation.
#[derive(Debug)]
pub struct BallotEngine {
    pub(crate) admin: ParticipantId,
    pub(crate) phase: WorkflowPhase,
    pub(crate) registry: Registry,
    pub(crate) ledger: ProposalLedger,
    pub(crate) winning_proposal: Option<ProposalId>,
    pub(crate) log: Vec<BallotEvent>,
    pub(crate) bus: EventBus,
}

impl BallotEngine {
    /// Start a fresh round. The administrator identity is fixed here and
    /// pre-admitted as the first voter; genesis self-registration is part
    /// of construction, not an operation, so it emits no event.
    pub fn new(admin: ParticipantId) -> Self {
        let registry = Registry::with_admitted(&admin);
        Self {
            admin,
            phase: WorkflowPhase::RegisteringVoters,
            registry,
            ledger: ProposalLedger::new(),
            winning_proposal: None,
            log: Vec::new(),
            bus: EventBus::new(),
        }
    }

    /// The administrator identity fixed at construction.
    pub fn admin(&self) -> &ParticipantId {
        &self.admin
    }

    /// Current phase. Readable by anyone.
    pub fn current_phase(&self) -> WorkflowPhase {
        self.phase
    }

    /// The audit log so far, in emission order.
    pub fn events(&self) -> &[BallotEvent] {
        &self.log
    }

    /// Subscribe a listener to future audit events.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&BallotEvent) + Send + Sync>) {
        self.bus.subscribe(listener);
    }

    /// Number of currently admitted voters.
    pub fn registered_count(&self) -> usize {
        self.registry.registered_count()
    }

    // ── Authorization & phase guards ─────────────────────────────────

    fn require_admin(&self, caller: &ParticipantId) -> Result<(), BallotError> {
        if caller != &self.admin {
            return Err(BallotError::Unauthorized);
        }
        Ok(())
    }

    fn require_voter(&self, caller: &ParticipantId) -> Result<(), BallotError> {
        if !self.registry.is_registered(caller) {
            return Err(BallotError::Unauthorized);
        }
        Ok(())
    }

    fn require_phase(&self, required: WorkflowPhase) -> Result<(), BallotError> {
        if self.phase != required {
            return Err(BallotError::InvalidPhase {
                current: self.phase,
                required,
            });
        }
        Ok(())
    }

    /// Append to the log and fan out to listeners. Called only after the
    /// corresponding mutation has committed.
    fn record(&mut self, event: BallotEvent) {
        self.bus.emit(&event);
        self.log.push(event);
    }

    // ── Registry operations ──────────────────────────────────────────

    /// Admit an identity to the round. Administrator-only, legal only
    /// while voters are registering.
    pub fn admit(
        &mut self,
        caller: &ParticipantId,
        identity: &ParticipantId,
    ) -> Result<(), BallotError> {
        self.require_admin(caller)?;
        self.require_phase(WorkflowPhase::RegisteringVoters)?;
        self.registry.admit(identity)?;
        tracing::debug!(voter = %identity, "voter admitted");
        self.record(BallotEvent::VoterRegistered {
            voter: identity.clone(),
        });
        Ok(())
    }

    /// Bulk admission helper. Each identity goes through the same
    /// duplicate check as [`BallotEngine::admit`]; the whole batch is
    /// validated up front so a rejected call admits nobody.
    pub fn admit_all(
        &mut self,
        caller: &ParticipantId,
        identities: &[ParticipantId],
    ) -> Result<(), BallotError> {
        self.require_admin(caller)?;
        self.require_phase(WorkflowPhase::RegisteringVoters)?;
        let mut seen = HashSet::new();
        for identity in identities {
            if self.registry.is_registered(identity) || !seen.insert(identity) {
                return Err(BallotError::AlreadyRegistered(identity.clone()));
            }
        }
        for identity in identities {
            self.registry.admit(identity)?;
            tracing::debug!(voter = %identity, "voter admitted");
            self.record(BallotEvent::VoterRegistered {
                voter: identity.clone(),
            });
        }
        Ok(())
    }

    /// Withdraw an identity's admission. Administrator-only, legal only
    /// while voters are registering.
    pub fn revoke(
        &mut self,
        caller: &ParticipantId,
        identity: &ParticipantId,
    ) -> Result<(), BallotError> {
        self.require_admin(caller)?;
        self.require_phase(WorkflowPhase::RegisteringVoters)?;
        self.registry.revoke(identity)?;
        tracing::debug!(voter = %identity, "voter admission revoked");
        self.record(BallotEvent::VoterRevoked {
            voter: identity.clone(),
        });
        Ok(())
    }

    /// A voter record, readable by admitted participants only.
    /// Never-admitted identities yield the all-false zero record.
    pub fn voter(
        &self,
        caller: &ParticipantId,
        identity: &ParticipantId,
    ) -> Result<Voter, BallotError> {
        self.require_voter(caller)?;
        Ok(self.registry.get(identity))
    }

    // ── Phase transitions ────────────────────────────────────────────

    /// Advance the phase machine to `next`. Administrator-only; succeeds
    /// only if `next` is the unique successor of the current phase.
    /// Advancing into the terminal phase runs the tally.
    pub fn advance(
        &mut self,
        caller: &ParticipantId,
        next: WorkflowPhase,
    ) -> Result<(), BallotError> {
        self.require_admin(caller)?;
        if self.phase.successor() != Some(next) {
            return Err(BallotError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        if next == WorkflowPhase::VotesTallied {
            self.winning_proposal = Some(self.ledger.leading()?);
        }
        self.commit_transition(next);
        Ok(())
    }

    fn commit_transition(&mut self, next: WorkflowPhase) {
        let previous = self.phase;
        self.phase = next;
        tracing::info!(%previous, %next, "phase advanced");
        self.record(BallotEvent::PhaseChanged { previous, next });
    }

    /// Open proposal submission.
    pub fn start_proposals(&mut self, caller: &ParticipantId) -> Result<(), BallotError> {
        self.advance(caller, WorkflowPhase::ProposalsRegistrationStarted)
    }

    /// Close proposal submission.
    pub fn stop_proposals(&mut self, caller: &ParticipantId) -> Result<(), BallotError> {
        self.advance(caller, WorkflowPhase::ProposalsRegistrationEnded)
    }

    /// Open the voting session.
    pub fn start_voting(&mut self, caller: &ParticipantId) -> Result<(), BallotError> {
        self.advance(caller, WorkflowPhase::VotingSessionStarted)
    }

    /// Close the voting session.
    pub fn stop_voting(&mut self, caller: &ParticipantId) -> Result<(), BallotError> {
        self.advance(caller, WorkflowPhase::VotingSessionEnded)
    }

    // ── Proposals & voting ───────────────────────────────────────────

    /// Submit a proposal. Participant-only, legal only while submission
    /// is open. Returns the assigned proposal id.
    pub fn submit(
        &mut self,
        caller: &ParticipantId,
        description: &str,
    ) -> Result<ProposalId, BallotError> {
        self.require_voter(caller)?;
        self.require_phase(WorkflowPhase::ProposalsRegistrationStarted)?;
        let id = self.ledger.submit(description)?;
        tracing::debug!(proposer = %caller, id, "proposal registered");
        self.record(BallotEvent::ProposalRegistered {
            id,
            description: description.to_string(),
        });
        Ok(id)
    }

    /// Look up a proposal. Participant-only.
    pub fn proposal(
        &self,
        caller: &ParticipantId,
        id: ProposalId,
    ) -> Result<&Proposal, BallotError> {
        self.require_voter(caller)?;
        self.ledger.get(id)
    }

    /// All proposals in submission order. Participant-only.
    pub fn proposals(&self, caller: &ParticipantId) -> Result<&[Proposal], BallotError> {
        self.require_voter(caller)?;
        Ok(self.ledger.list())
    }

    /// Cast the caller's single vote. Participant-only, legal only while
    /// the voting session is open. One-time and irreversible.
    pub fn vote(
        &mut self,
        caller: &ParticipantId,
        proposal: ProposalId,
    ) -> Result<(), BallotError> {
        self.require_voter(caller)?;
        self.require_phase(WorkflowPhase::VotingSessionStarted)?;
        // Validate the target before touching the voter record, so a bad
        // id leaves no partial mutation behind.
        self.ledger.get(proposal)?;
        self.registry.mark_voted(caller, proposal)?;
        self.ledger.record_vote(proposal)?;
        tracing::debug!(voter = %caller, proposal, "vote cast");
        self.record(BallotEvent::Voted {
            voter: caller.clone(),
            proposal,
        });
        Ok(())
    }

    // ── Tally ────────────────────────────────────────────────────────

    /// Compute the round's winner and fix it. Administrator-only, legal
    /// only once the voting session has ended. Fails with `NoProposals`
    /// on an empty ledger, leaving the phase unchanged so the situation
    /// is observable rather than silently terminal.
    pub fn tally(&mut self, caller: &ParticipantId) -> Result<ProposalId, BallotError> {
        self.require_admin(caller)?;
        self.require_phase(WorkflowPhase::VotingSessionEnded)?;
        let winner = self.ledger.leading()?;
        self.winning_proposal = Some(winner);
        tracing::info!(winner, "votes tallied");
        self.commit_transition(WorkflowPhase::VotesTallied);
        Ok(winner)
    }

    /// The winning proposal id. Readable by anyone once tallied.
    pub fn winning_proposal_id(&self) -> Result<ProposalId, BallotError> {
        if self.phase != WorkflowPhase::VotesTallied {
            return Err(BallotError::TallyNotAvailable);
        }
        self.winning_proposal.ok_or(BallotError::TallyNotAvailable)
    }

    /// The winning proposal record. Readable by anyone once tallied.
    pub fn winner(&self) -> Result<&Proposal, BallotError> {
        let id = self.winning_proposal_id()?;
        self.ledger.get(id)
    }

    // ── Replay ───────────────────────────────────────────────────────

    /// Reconstruct a round from its genesis administrator and audit log.
    ///
    /// Applying the events in emission order reproduces registry,
    /// ledger, phase, and winner exactly; a log that does not fit the
    /// evolving state is rejected.
    pub fn replay(
        admin: ParticipantId,
        events: &[BallotEvent],
    ) -> Result<Self, BallotError> {
        let mut engine = Self::new(admin);
        for event in events {
            engine.apply(event)?;
        }
        Ok(engine)
    }

    fn apply(&mut self, event: &BallotEvent) -> Result<(), BallotError> {
        match event {
            BallotEvent::VoterRegistered { voter } => {
                self.registry.admit(voter)?;
            }
            BallotEvent::VoterRevoked { voter } => {
                self.registry.revoke(voter)?;
            }
            BallotEvent::ProposalRegistered { id, description } => {
                let assigned = self.ledger.submit(description)?;
                if assigned != *id {
                    return Err(BallotError::InvalidEventLog(format!(
                        "proposal replayed at {assigned}, log says {id}"
                    )));
                }
            }
            BallotEvent::Voted { voter, proposal } => {
                self.ledger.get(*proposal)?;
                self.registry.mark_voted(voter, *proposal)?;
                self.ledger.record_vote(*proposal)?;
            }
            BallotEvent::PhaseChanged { previous, next } => {
                if *previous != self.phase || self.phase.successor() != Some(*next) {
                    return Err(BallotError::InvalidEventLog(format!(
                        "transition {previous} -> {next} does not follow {}",
                        self.phase
                    )));
                }
                if *next == WorkflowPhase::VotesTallied {
                    self.winning_proposal = Some(self.ledger.leading()?);
                }
                self.phase = *next;
            }
        }
        self.log.push(event.clone());
        Ok(())
    }
}
