#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! The payment gateway contract and its supporting types.
//!
//! Every billing provider adapter implements [`api::PaymentGateway`];
//! callers depend on this crate only and stay independent of which
//! provider handles a given enrollment.

pub mod api;
/// Gateway configuration, read from the process environment.
pub mod configs;
/// Constants used across the gateway layer.
pub mod consts;
pub mod errors;
pub mod types;
