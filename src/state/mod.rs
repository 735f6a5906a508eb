//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `board` holds the rendered projection of the service's activities and
//! `status` the transient feedback banner, so components depend on small
//! focused models.

pub mod board;
pub mod status;
