//! Transform errors.
//!
//! Only schema composition can fail. Once a schema is built, a value the
//! result stage cannot mask is left as-is rather than failing the request.

use displaydoc::Display;
use thiserror::Error;

/// Fatal errors raised while the masking transform rewrites a schema.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// cannot mask '{type_name}.{field_name}': only scalar fields can be masked
    NonScalarField {
        /// The composite type the mask entry targets.
        type_name: String,

        /// The targeted field, whose declared type is not a bare scalar.
        field_name: String,
    },

    /// masked schema failed validation: {errors}
    InvalidSchema {
        /// The rendered validation diagnostics.
        errors: String,
    },
}
