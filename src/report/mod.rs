//! Report generation for finished analyses.

pub mod generator;

pub use generator::*;
