//! Presentation of compiled catalogs
//!
//! The engine renders what the host would act on:
//! 1. Dependencies - autorequire edges resolved against the working set
//! 2. Diffing - observed vs declared state, per property

pub mod differ;

pub use differ::{display_dependencies, display_diff};
