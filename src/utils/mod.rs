//! Utility functions and helpers.

pub mod fs;
