//! Command handlers module

pub mod help;
pub mod start;
pub mod stats;
