// crates/kudos-consensus/src/lib.rs
//
// kudos-consensus: the majority-vote-then-append protocol for the Kudos Protocol.
//
// A candidate block is committed only after at least half of the known peers
// approve it. The coordinator runs evaluate -> build -> gate -> commit as one
// critical section per node so concurrent claims cannot jointly over-claim.
// This is a heuristic agreement step, not Byzantine-fault-tolerant consensus.

pub mod coordinator;
pub mod gate;

pub use coordinator::{ClaimCoordinator, ClaimRequest};
pub use gate::ConsensusGate;
