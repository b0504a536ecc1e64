//! CSV import of meter readings and export of cost results.

pub mod export;
pub mod meters;
