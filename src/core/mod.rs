//! Core Module - Scoring Engine
//!
//! The decision logic: component scorers, pattern detector, aggregation
//! and the free-text heuristic pipeline. Everything here is synchronous
//! and pure; fact gathering lives in providers/.

pub mod engine;
pub mod heuristic;
pub mod patterns;
pub mod scorers;

pub use engine::*;
pub use heuristic::*;
pub use patterns::*;
pub use scorers::*;
