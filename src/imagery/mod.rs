//! The boundary with the provider of street-level imagery.
//!
//! No provider ships with this crate. Implement [`ImageryProvider`] over the
//! transport of choice, then [`harvest`] the samples of a road through it.

mod definition;
mod harvest;
#[cfg(test)]
mod test;

#[doc(inline)]
pub use definition::{FetchOutcome, ImageRequest, ImageryError, ImageryProvider};
#[doc(inline)]
pub use harvest::{HarvestReport, harvest};
