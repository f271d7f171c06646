#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Utilities shared across the payment gateway crates: error plumbing,
//! typed deserialization helpers, the outbound request model and currency
//! unit types.

pub mod consts;
pub mod errors;
pub mod ext_traits;
pub mod request;
pub mod types;
