//! Authorization gate: every list and item access resolves the resource by
//! id and owner in one lookup, so foreign resources look exactly like
//! missing ones.

pub mod errors;
pub mod gate;
pub mod models;
pub mod ports;
