#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Wrapper types and traits for keeping credentials and PII out of logs.
//!
//! A [`Secret`] refuses to reveal its inner value through `Debug`; the
//! masking applied is controlled by a [`Strategy`] type parameter. Access
//! to the inner value is explicit, via [`PeekInterface::peek`] or
//! [`ExposeInterface::expose`].

mod abs;
mod maskable;
mod secret;
mod strategy;

pub use abs::{ExposeInterface, PeekInterface};
pub use maskable::{Mask, Maskable};
pub use secret::Secret;
pub use strategy::{Strategy, WithType, WithoutType};
