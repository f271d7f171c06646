//! Errors and error specific types for universal use.

/// Type alias for `Result<T, error_stack::Report<E>>`, allowing error
/// context to be attached and transformed with [`error_stack::ResultExt`].
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Parsing errors raised while interpreting provider bytes.
#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    /// Failed to deserialize a typed structure from raw bytes.
    #[error("Failed to parse {0} from the provider response")]
    StructParseFailure(&'static str),
    /// Failed to serialize a value for the wire.
    #[error("Failed to serialize {0}")]
    EncodeError(&'static str),
}

/// Errors raised while converting between major and minor currency units.
#[derive(Debug, thiserror::Error)]
pub enum AmountConversionError {
    /// The floating point amount has no decimal representation.
    #[error("Amount {0} is not representable as a decimal value")]
    NotRepresentable(f64),
    /// The converted amount does not fit the target integer type.
    #[error("Amount {0} overflows the minor unit range")]
    Overflow(f64),
}

/// Validation errors for data arriving from collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent.
    #[error("Missing required field: {field_name}")]
    MissingRequiredField {
        /// Name of the absent field.
        field_name: &'static str,
    },
    /// A field held a value outside its domain.
    #[error("Incorrect value provided for field: {field_name}")]
    IncorrectValueProvided {
        /// Name of the offending field.
        field_name: &'static str,
    },
}
