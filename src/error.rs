/*!
The error enumeration exported across the match/validate boundary.

These are the symbolic results a mutation layer built on top of this crate would surface to its
own callers. The match engine and validator don't return this type directly — they return their
own richer [`crate::Matchres`] / [`crate::validate::ValidateResult`] — but every one of those
maps onto exactly one of these variants, which is what keeps this crate usable as a library
boundary rather than an internal implementation detail.
*/

use std::fmt;

use crate::validate::ValidateResult;

/// A result code a caller-facing mutation layer would report for a sub-document operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdocError {
    /// The operation completed as requested.
    Success,
    /// The path does not exist in the document.
    PathNotFound,
    /// The path traverses a container of the wrong kind, or crosses a scalar.
    PathMismatch,
    /// The document is not valid JSON.
    DocNotJson,
    /// The candidate value can't be inserted at the requested location.
    ValueCantInsert,
    /// The candidate value is not valid JSON.
    ValueNotJson,
    /// A uniqueness check found the candidate value already present.
    DocExists,
    /// A numeric delta would overflow the target's representable range.
    DeltaTooBig,
    /// A matched number is too large to parse as the arithmetic type requested.
    NumberTooBig,
    /// Validation found a truncated value.
    ValidatePartial,
    /// Validation found trailing content after a single expected value.
    ValidateMultiElement,
    /// Validation required a primitive but found a container.
    ValidateNotPrimitive,
}

impl fmt::Display for SubdocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SubdocError::Success => "success",
            SubdocError::PathNotFound => "path does not exist in the document",
            SubdocError::PathMismatch => "path traverses the wrong kind of container",
            SubdocError::DocNotJson => "document is not valid JSON",
            SubdocError::ValueCantInsert => "value cannot be inserted at this location",
            SubdocError::ValueNotJson => "value is not valid JSON",
            SubdocError::DocExists => "value already exists",
            SubdocError::DeltaTooBig => "numeric delta is too large",
            SubdocError::NumberTooBig => "matched number is too large",
            SubdocError::ValidatePartial => "value is truncated",
            SubdocError::ValidateMultiElement => "value has trailing content",
            SubdocError::ValidateNotPrimitive => "value must be primitive",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for SubdocError {}

/// Maps a validator outcome onto the symbolic code a mutation layer would surface for it.
impl From<ValidateResult> for SubdocError {
    fn from(result: ValidateResult) -> Self {
        match result {
            ValidateResult::Ok => SubdocError::Success,
            ValidateResult::Partial => SubdocError::ValidatePartial,
            ValidateResult::MultipleElements => SubdocError::ValidateMultiElement,
            ValidateResult::NotPrimitive => SubdocError::ValidateNotPrimitive,
            ValidateResult::Malformed(_) => SubdocError::ValueNotJson,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{validate, Framing, ValidateFlags};

    #[test]
    fn primitive_only_failure_maps_to_validate_not_primitive() {
        let flags = ValidateFlags { primitive_only: true, ..Default::default() };
        let result = validate(b"{}", Framing::ArrayElement, flags);

        assert_eq!(SubdocError::from(result), SubdocError::ValidateNotPrimitive);
    }
}
