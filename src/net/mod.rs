//! Networking modules for the activities REST service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls and URL building, and `types` defines the wire
//! schema both sides agree on.

pub mod api;
pub mod types;
