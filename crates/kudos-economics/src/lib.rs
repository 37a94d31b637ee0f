// crates/kudos-economics/src/lib.rs
//
// kudos-economics: KDS token economics for the Kudos Protocol.
//
// Likes on a post are converted into coins at a fixed rate, capped per post
// by the likes not yet consumed by earlier claims and globally by a fixed
// total circulation.

pub mod claim;
pub mod token;

// Re-export key types for ergonomic access from downstream crates.
pub use claim::{max_claimable, ClaimEvaluator};
pub use token::{Kds, LIKES_PER_COIN, TOTAL_CIRCULATION};
