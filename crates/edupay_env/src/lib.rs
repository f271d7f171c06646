#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Environment of the payment gateway layer: logger and basic
//! environment awareness.

pub mod env;
pub mod logger;

#[doc(inline)]
pub use logger::*;
pub use tracing;

#[doc(inline)]
pub use self::env::*;
