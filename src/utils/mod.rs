//! Utils Module - Shared Helpers
//!
//! Constants and the scan-result cache, shared across the service.

pub mod cache;
pub mod constants;

pub use cache::*;
pub use constants::*;
