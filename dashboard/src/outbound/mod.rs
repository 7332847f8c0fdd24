//! Outbound adapters implementing domain ports.

pub mod session_slot;
