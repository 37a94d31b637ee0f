// crates/kudos-rpc/src/handlers/mod.rs
//
// Handler modules for all HTTP endpoints.
// Each module defines request/response types and handler functions
// for a specific API group.

pub mod chain;
pub mod claim;
pub mod peer;
pub mod validation;
