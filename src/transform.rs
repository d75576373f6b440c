//! The transform seam between the gateway and this crate.

use apollo_compiler::Schema;
use apollo_compiler::validation::Valid;

use crate::context::DelegationContext;
use crate::error::ConfigurationError;
use crate::request::ExecutionRequest;
use crate::response::Response;

/// A transform applied around delegation to one subschema.
///
/// Each call point defaults to the identity, so implementations only override
/// the stages they participate in. The schema stage runs once, while the
/// gateway composes its schema; the request and result stages run once per
/// delegated request, around execution, and share that request's
/// [`DelegationContext`].
pub trait Transform {
    /// Rewrite the subschema while the gateway composes its schema.
    ///
    /// This is the only stage allowed to fail; an error aborts composition.
    fn transform_schema(&self, schema: Valid<Schema>) -> Result<Valid<Schema>, ConfigurationError> {
        Ok(schema)
    }

    /// Observe or rewrite the lowered request before it is delegated.
    fn transform_request(
        &self,
        request: ExecutionRequest,
        _context: &mut DelegationContext,
    ) -> ExecutionRequest {
        request
    }

    /// Rewrite the raw result on its way back to the client.
    fn transform_result(&self, result: Response, _context: &DelegationContext) -> Response {
        result
    }
}

/// Fold every transform over a freshly composed schema, in declaration order.
pub fn apply_schema_transforms(
    schema: Valid<Schema>,
    transforms: &[Box<dyn Transform>],
) -> Result<Valid<Schema>, ConfigurationError> {
    transforms.iter().try_fold(schema, |schema, transform| {
        transform.transform_schema(schema)
    })
}

/// Fold every transform over an outgoing request, in declaration order.
pub fn apply_request_transforms(
    request: ExecutionRequest,
    context: &mut DelegationContext,
    transforms: &[Box<dyn Transform>],
) -> ExecutionRequest {
    transforms.iter().fold(request, |request, transform| {
        transform.transform_request(request, context)
    })
}

/// Fold every transform over a raw result, in reverse declaration order: the
/// transform closest to the executor sees the result first.
pub fn apply_result_transforms(
    result: Response,
    context: &DelegationContext,
    transforms: &[Box<dyn Transform>],
) -> Response {
    transforms.iter().rev().fold(result, |result, transform| {
        transform.transform_result(result, context)
    })
}
