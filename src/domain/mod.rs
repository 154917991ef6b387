//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types (validated, business-logic-ready)
//! - `wire.rs` — Raw serde structs matching backend requests/responses
//! - `convert.rs` — `From`/`TryFrom` conversions with validation
//! - `state.rs` — State containers
//! - `client.rs` — Sub-client with HTTP methods

pub mod trade;
