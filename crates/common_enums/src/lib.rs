#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Enums shared across the payment gateway crates.

pub mod enums;

pub use enums::*;
