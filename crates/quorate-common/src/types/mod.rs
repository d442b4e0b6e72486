//! Core data types for Quorate

pub mod identity;
pub mod signature;
