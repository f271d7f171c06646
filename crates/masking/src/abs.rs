//! Abstract interfaces for accessing secret values.

/// Interface to borrow the inner value of a secret without consuming it.
pub trait PeekInterface<S> {
    /// Borrow the secret value.
    fn peek(&self) -> &S;
}

/// Interface to consume a secret and take ownership of the inner value.
pub trait ExposeInterface<S> {
    /// Consume the wrapper and return the secret value.
    fn expose(self) -> S;
}
