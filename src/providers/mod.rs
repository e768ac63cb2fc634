//! Providers Module - External Data Sources
//!
//! Upstream collaborators that feed the scoring engine: block explorer,
//! DexScreener and the snapshot builder that merges them. All network I/O
//! lives here; failures degrade to absent facets at this boundary.

pub mod dexscreener;
pub mod explorer;
pub mod reputation;
pub mod snapshot;

pub use dexscreener::*;
pub use explorer::*;
pub use reputation::*;
pub use snapshot::*;
