//! Route handlers

pub mod options;
pub mod predictions;
