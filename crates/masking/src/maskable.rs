//! Values that may or may not need masking, e.g. HTTP header values.

use crate::{ExposeInterface, PeekInterface, Secret};

/// A value that is either masked (secret) or plainly visible.
///
/// Outbound request headers are collected as `Maskable<String>` so that
/// authorization headers stay hidden in logs while content-type and the
/// like remain readable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Maskable<T: Eq + PartialEq + Clone> {
    /// A secret value, masked in `Debug` output.
    Masked(Secret<T>),
    /// A plainly visible value.
    Normal(T),
}

impl<T: Eq + PartialEq + Clone> Maskable<T> {
    /// Borrow the inner value regardless of masking.
    pub fn peek_inner(&self) -> &T {
        match self {
            Self::Masked(secret) => secret.peek(),
            Self::Normal(value) => value,
        }
    }

    /// Consume and return the inner value regardless of masking.
    pub fn into_inner(self) -> T {
        match self {
            Self::Masked(secret) => secret.expose(),
            Self::Normal(value) => value,
        }
    }
}

impl<T: Eq + PartialEq + Clone> From<T> for Maskable<T> {
    fn from(value: T) -> Self {
        Self::Normal(value)
    }
}

impl<T: Eq + PartialEq + Clone> From<Secret<T>> for Maskable<T> {
    fn from(value: Secret<T>) -> Self {
        Self::Masked(value)
    }
}

/// Conversion helpers into [`Maskable`].
pub trait Mask {
    /// The wrapped type.
    type Output: Eq + PartialEq + Clone;

    /// Convert into a masked [`Maskable`].
    fn into_masked(self) -> Maskable<Self::Output>;
}

impl Mask for String {
    type Output = Self;

    fn into_masked(self) -> Maskable<Self> {
        Maskable::Masked(Secret::new(self))
    }
}

impl Mask for Secret<String> {
    type Output = String;

    fn into_masked(self) -> Maskable<String> {
        Maskable::Masked(self)
    }
}
