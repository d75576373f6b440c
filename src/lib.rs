//! Masks configured scalar fields of a composed GraphQL schema.
//!
//! A gateway that stitches subschemas together sometimes has to expose a
//! field to clients without exposing its real value: account numbers, email
//! addresses, scores that only partners may see in full. This crate provides
//! a [`Transform`] that does so in three phases, sharing one configuration
//! table:
//!
//! * at schema build, every configured field has its declared type rewritten
//!   to the plain `String` scalar ([`Transform::transform_schema`]),
//! * at request build, the response key the client chose for each configured
//!   field (its alias, or the field name) is recorded into the request's
//!   [`DelegationContext`] ([`Transform::transform_request`]),
//! * at result build, each object in the raw result is matched against the
//!   configuration through its `__typename` and the recorded response key,
//!   and the value is replaced by the output of a pluggable [`Masker`]
//!   ([`Transform::transform_result`]).
//!
//! The masking algorithm itself is supplied by the host; any
//! `Fn(&str, &str) -> String` closure will do.

#![warn(unreachable_pub)]

mod configuration;
mod context;
pub mod error;
pub mod json_ext;
mod mask;
mod masking;
mod request;
mod response;
mod transform;

pub use configuration::MaskConfig;
pub use context::DelegationContext;
pub use error::ConfigurationError;
pub use mask::MaskTransform;
pub use masking::Masker;
pub use request::ExecutionRequest;
pub use response::Error;
pub use response::Location;
pub use response::Response;
pub use transform::Transform;
pub use transform::apply_request_transforms;
pub use transform::apply_result_transforms;
pub use transform::apply_schema_transforms;
