//! Permissioned, phase-gated ballot workflow engine.
//!
//! One administrator admits voters, voters submit proposals during a
//! bounded window and then cast exactly one vote each, and the
//! administrator drives the phase machine forward and triggers the tally
//! that fixes a single winning proposal.
//!
//! The engine is a plain owned value: all mutating operations take
//! `&mut self`, which is the round's single serialization point. Callers
//! embedding it in a concurrent service wrap it in their own lock or
//! actor; the crate neither spawns nor blocks. A new round is a new
//! [`BallotEngine`] instance.
//!
//! Every successful mutation appends an audit event to the engine's log
//! and fans it out to subscribed listeners; rejected operations mutate
//! nothing and emit nothing. Replaying the log from genesis reproduces
//! the final state exactly (see [`BallotEngine::replay`]).

pub mod engine;
pub mod error;
pub mod event;
pub mod ledger;
pub mod registry;
pub mod snapshot;

pub use engine::BallotEngine;
pub use error::BallotError;
pub use event::{BallotEvent, EventBus};
pub use ledger::ProposalLedger;
pub use registry::Registry;
pub use snapshot::BallotSnapshot;
