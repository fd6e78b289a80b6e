// src/extractors/mod.rs
pub mod batch;
pub mod fields;
#[cfg(test)]
pub mod fixtures;
pub mod matcher;
pub mod report;
pub mod sheet;

pub use batch::extract_all;
