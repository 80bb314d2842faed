//! Public types for the Rine API.

mod profile;

pub use profile::{KadStats, ProfileRecord, RawProfile};
