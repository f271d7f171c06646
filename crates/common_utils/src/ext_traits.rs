//! Extension traits for typed serialization and deserialization.

use error_stack::{IntoReport, ResultExt};
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{CustomResult, ParsingError};

/// Deserialize typed structures out of raw provider bytes.
pub trait ByteSliceExt {
    /// Parse `self` as JSON into `T`, tagging failures with the target
    /// type name so logs identify which provider structure broke.
    fn parse_struct<T: DeserializeOwned>(
        &self,
        type_name: &'static str,
    ) -> CustomResult<T, ParsingError>;
}

impl ByteSliceExt for [u8] {
    fn parse_struct<T: DeserializeOwned>(
        &self,
        type_name: &'static str,
    ) -> CustomResult<T, ParsingError> {
        serde_json::from_slice(self)
            .into_report()
            .change_context(ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| {
                format!(
                    "Unable to parse {type_name} from bytes: {}",
                    String::from_utf8_lossy(self)
                )
            })
    }
}

impl ByteSliceExt for bytes::Bytes {
    fn parse_struct<T: DeserializeOwned>(
        &self,
        type_name: &'static str,
    ) -> CustomResult<T, ParsingError> {
        self.as_ref().parse_struct(type_name)
    }
}

/// Encode typed structures for the wire.
pub trait Encode {
    /// Serialize `self` into a `serde_json::Value`.
    fn encode_to_value(&self, type_name: &'static str)
        -> CustomResult<serde_json::Value, ParsingError>;
}

impl<T: Serialize> Encode for T {
    fn encode_to_value(
        &self,
        type_name: &'static str,
    ) -> CustomResult<serde_json::Value, ParsingError> {
        serde_json::to_value(self)
            .into_report()
            .change_context(ParsingError::EncodeError(type_name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Probe {
        id: String,
    }

    #[test]
    fn parse_struct_round_trips() {
        let parsed: Probe = br#"{"id":"pay_1"}"#.parse_struct("Probe").unwrap();
        assert_eq!(parsed.id, "pay_1");
    }

    #[test]
    fn parse_struct_reports_the_type_name() {
        let result: CustomResult<Probe, ParsingError> = b"not json".parse_struct("Probe");
        let report = match result {
            Ok(_) => panic!("expected a parse failure"),
            Err(report) => report,
        };
        assert!(format!("{report:?}").contains("Probe"));
    }
}
