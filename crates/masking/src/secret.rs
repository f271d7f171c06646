//! The [`Secret`] wrapper type.

use std::{fmt, marker::PhantomData};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    abs::{ExposeInterface, PeekInterface},
    strategy::{Strategy, WithType},
};

/// A value that is masked when formatted with `Debug`.
///
/// The second type parameter selects the masking [`Strategy`]; the default
/// [`WithType`] prints only the type name of the protected value. Secrets
/// serialize transparently so they can be sent to providers over the wire,
/// but never reveal themselves in log output.
pub struct Secret<S, I = WithType>
where
    I: Strategy<S>,
{
    inner_secret: S,
    masking_strategy: PhantomData<I>,
}

impl<S, I> Secret<S, I>
where
    I: Strategy<S>,
{
    /// Wrap a secret value.
    pub fn new(secret: S) -> Self {
        Self {
            inner_secret: secret,
            masking_strategy: PhantomData,
        }
    }

    /// Map the inner value, keeping it wrapped.
    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> Secret<T> {
        Secret::new(f(self.inner_secret))
    }
}

impl<S, I> PeekInterface<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn peek(&self) -> &S {
        &self.inner_secret
    }
}

impl<S, I> ExposeInterface<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn expose(self) -> S {
        self.inner_secret
    }
}

impl<S, I> From<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn from(secret: S) -> Self {
        Self::new(secret)
    }
}

impl<S: Clone, I> Clone for Secret<S, I>
where
    I: Strategy<S>,
{
    fn clone(&self) -> Self {
        Self::new(self.inner_secret.clone())
    }
}

impl<S: PartialEq, I> PartialEq for Secret<S, I>
where
    I: Strategy<S>,
{
    fn eq(&self, other: &Self) -> bool {
        self.peek() == other.peek()
    }
}

impl<S: Eq, I> Eq for Secret<S, I> where I: Strategy<S> {}

impl<S, I> fmt::Debug for Secret<S, I>
where
    I: Strategy<S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        I::fmt(&self.inner_secret, f)
    }
}

impl<S: Default, I> Default for Secret<S, I>
where
    I: Strategy<S>,
{
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Serialize, I> Serialize for Secret<S, I>
where
    I: Strategy<S>,
{
    fn serialize<T: Serializer>(&self, serializer: T) -> Result<T::Ok, T::Error> {
        self.peek().serialize(serializer)
    }
}

impl<'de, S: Deserialize<'de>, I> Deserialize<'de> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        S::deserialize(deserializer).map(Self::new)
    }
}
