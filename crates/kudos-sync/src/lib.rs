// crates/kudos-sync/src/lib.rs
//
// kudos-sync: chain reconciliation for the Kudos Protocol.
//
// Nodes that diverge (concurrent commits, missed broadcasts, restarts) are
// brought back together by pulling every peer's chain and adopting the
// longest one. Chains are compared by length only; their contents are not
// validated, so this is a convergence heuristic rather than a safety proof.

pub mod reconcile;

pub use reconcile::{longest_chain, ChainReconciler};
