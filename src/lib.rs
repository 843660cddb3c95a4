//! FabQuote: instant quoting for digital fabrication
//!
//! A command-line toolkit that prices FDM/SLA 3D printing, CNC machining,
//! and laser cutting jobs from bounding-box dimensions, with a bounded
//! demo session flow.

pub mod catalog;
pub mod cli;
pub mod core;
pub mod pricing;
pub mod session;
