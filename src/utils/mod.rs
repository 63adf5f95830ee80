//! Utility modules

pub mod validators;
