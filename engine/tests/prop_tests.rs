//! Property tests for the workflow invariants.

use proptest::prelude::*;

use ballot_engine::{BallotEngine, BallotError};
use ballot_types::{ParticipantId, ProposalId, WorkflowPhase};

fn pid(name: &str) -> ParticipantId {
    ParticipantId::new(name)
}

fn admin() -> ParticipantId {
    pid("admin")
}

fn voter(n: usize) -> ParticipantId {
    pid(&format!("voter{n}"))
}

/// Engine at the open voting session with `voters` admitted voters
/// (besides the administrator) and `proposals` proposals on the ledger.
fn engine_at_voting(voters: usize, proposals: usize) -> BallotEngine {
    let mut e = BallotEngine::new(admin());
    let ids: Vec<ParticipantId> = (0..voters).map(voter).collect();
    e.admit_all(&admin(), &ids).unwrap();
    e.start_proposals(&admin()).unwrap();
    for i in 0..proposals {
        e.submit(&admin(), &format!("proposal {i}")).unwrap();
    }
    e.stop_proposals(&admin()).unwrap();
    e.start_voting(&admin()).unwrap();
    e
}

proptest! {
    /// Every rejected vote leaves the engine state bit-for-bit unchanged.
    #[test]
    fn rejected_votes_change_nothing(
        voters in 1usize..6,
        proposals in 1usize..5,
        bogus_offset in 0u64..50,
    ) {
        let mut e = engine_at_voting(voters, proposals);
        e.vote(&voter(0), 0).unwrap();

        let before = e.snapshot();

        // Double vote.
        prop_assert!(matches!(
            e.vote(&voter(0), 0).unwrap_err(),
            BallotError::AlreadyVoted(_)
        ));
        // Out-of-range proposal id.
        let bogus = proposals as ProposalId + bogus_offset;
        prop_assert!(matches!(
            e.vote(&admin(), bogus).unwrap_err(),
            BallotError::ProposalNotFound(_)
        ));
        // Non-admitted caller.
        prop_assert!(matches!(
            e.vote(&pid("stranger"), 0).unwrap_err(),
            BallotError::Unauthorized
        ));
        // Admin-only op by a voter.
        prop_assert!(matches!(
            e.stop_voting(&voter(0)).unwrap_err(),
            BallotError::Unauthorized
        ));
        // Wrong-phase ops.
        let admit_wrong_phase = matches!(
            e.admit(&admin(), &pid("late")).unwrap_err(),
            BallotError::InvalidPhase { .. }
        );
        prop_assert!(admit_wrong_phase);
        let tally_wrong_phase = matches!(
            e.tally(&admin()).unwrap_err(),
            BallotError::InvalidPhase { .. }
        );
        prop_assert!(tally_wrong_phase);

        prop_assert_eq!(e.snapshot(), before);
    }

    /// The total of all proposal vote counts always equals the number of
    /// voters marked as having voted.
    #[test]
    fn vote_counts_conserve_voters(
        proposals in 1usize..5,
        // One optional choice per potential voter; None abstains.
        choices in prop::collection::vec(prop::option::of(0u64..4), 1..8),
    ) {
        let mut e = engine_at_voting(choices.len(), proposals);
        let mut expected_voted = 0u64;
        for (n, choice) in choices.iter().enumerate() {
            if let Some(target) = choice {
                let target = target % proposals as u64;
                e.vote(&voter(n), target).unwrap();
                expected_voted += 1;
            }
        }

        let total: u64 = e
            .proposals(&admin())
            .unwrap()
            .iter()
            .map(|p| p.vote_count)
            .sum();
        prop_assert_eq!(total, expected_voted);

        let voted = (0..choices.len())
            .filter(|n| e.voter(&admin(), &voter(*n)).unwrap().has_voted)
            .count() as u64;
        prop_assert_eq!(voted, expected_voted);
    }

    /// The tally always selects the lowest-indexed proposal holding the
    /// maximum vote count.
    #[test]
    fn tally_picks_first_maximum(
        proposals in 1usize..5,
        choices in prop::collection::vec(0u64..4, 0..10),
    ) {
        let mut e = engine_at_voting(choices.len(), proposals);
        let mut counts = vec![0u64; proposals];
        for (n, choice) in choices.iter().enumerate() {
            let target = choice % proposals as u64;
            e.vote(&voter(n), target).unwrap();
            counts[target as usize] += 1;
        }
        e.stop_voting(&admin()).unwrap();

        let winner = e.tally(&admin()).unwrap();

        let max = counts.iter().copied().max().unwrap();
        let expected = counts.iter().position(|&c| c == max).unwrap() as ProposalId;
        prop_assert_eq!(winner, expected);
        prop_assert_eq!(e.winning_proposal_id().unwrap(), expected);
    }

    /// Advancing never skips a phase or goes backward: only the unique
    /// successor is ever accepted, regardless of the requested targets.
    #[test]
    fn phase_sequence_is_strictly_monotonic(
        targets in prop::collection::vec(0usize..6, 0..12),
    ) {
        let mut e = BallotEngine::new(admin());
        // A proposal so the terminal transition can succeed.
        e.start_proposals(&admin()).unwrap();
        e.submit(&admin(), "baseline").unwrap();
        e.stop_proposals(&admin()).unwrap();

        for target in targets {
            let current = e.current_phase();
            let requested = WorkflowPhase::ALL[target];
            match e.advance(&admin(), requested) {
                Ok(()) => {
                    prop_assert_eq!(current.successor(), Some(requested));
                    prop_assert_eq!(e.current_phase(), requested);
                }
                Err(BallotError::InvalidTransition { .. }) => {
                    prop_assert_eq!(e.current_phase(), current);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }
}
