//! Gateway implementation

mod builder;
mod profile;

pub use builder::{Rine, RineBuilder};
pub use profile::{DEFAULT_REGION, ProfileGateway, effective_region};
