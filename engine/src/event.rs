//! Audit events emitted on successful state mutations.
//!
//! Events are appended to the engine's log and fanned out to subscribers
//! only after the corresponding mutation commits, and never on a rejected
//! operation, so log and state cannot diverge. Replaying the log in
//! emission order reconstructs the full round history.

use ballot_types::{ParticipantId, ProposalId, WorkflowPhase};
use serde::{Deserialize, Serialize};

/// One entry of the append-only audit log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallotEvent {
    /// An identity was admitted to the round.
    VoterRegistered { voter: ParticipantId },
    /// An identity's admission was withdrawn.
    VoterRevoked { voter: ParticipantId },
    /// The phase machine advanced one step.
    PhaseChanged {
        previous: WorkflowPhase,
        next: WorkflowPhase,
    },
    /// A proposal was accepted at `id`. The description is carried so
    /// that replaying the log reproduces ledger state exactly.
    ProposalRegistered {
        id: ProposalId,
        description: String,
    },
    /// A voter cast their single vote.
    Voted {
        voter: ParticipantId,
        proposal: ProposalId,
    },
}

/// Synchronous fan-out bus for ballot events.
///
/// Listeners are invoked inline on the emitting call; keep handlers fast
/// to avoid stalling the operation that triggered them.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&BallotEvent) + Send + Sync>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&BallotEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &BallotEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        let event = BallotEvent::VoterRegistered {
            voter: ParticipantId::new("alice"),
        };
        bus.emit(&event);

        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::new();
        let event = BallotEvent::PhaseChanged {
            previous: WorkflowPhase::RegisteringVoters,
            next: WorkflowPhase::ProposalsRegistrationStarted,
        };
        bus.emit(&event); // should not panic
    }

    #[test]
    fn listener_receives_correct_event_variant() {
        let saw_voted = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let sv = Arc::clone(&saw_voted);
        bus.subscribe(Box::new(move |event| {
            if let BallotEvent::Voted { proposal, .. } = event {
                sv.fetch_add(*proposal as usize, Ordering::SeqCst);
            }
        }));

        bus.emit(&BallotEvent::Voted {
            voter: ParticipantId::new("bob"),
            proposal: 7,
        });
        bus.emit(&BallotEvent::VoterRevoked {
            voter: ParticipantId::new("bob"),
        });

        assert_eq!(saw_voted.load(Ordering::SeqCst), 7);
    }
}
