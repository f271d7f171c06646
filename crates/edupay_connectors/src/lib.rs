#![forbid(unsafe_code)]

//! Billing provider adapters.
//!
//! Each provider lives under [`connectors`] as an adapter plus a
//! `transformers` module holding its wire types and status tables. The
//! [`simulation`] decorator layers the credential-absence and
//! degradation policy on top of every adapter, and
//! [`create_payment_gateway`] is the registry callers go through.

pub mod connectors;
mod constants;
pub mod simulation;
pub mod utils;

pub use connectors::{create_payment_gateway, Asaas, Lytex};
