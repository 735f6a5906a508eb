//! Page-level components.

pub mod board;
