//! The lowered execution request handed to the request call point.

use apollo_compiler::ExecutableDocument;
use serde_json_bytes::ByteString;
use serde_json_bytes::Map;
use serde_json_bytes::Value;

use crate::json_ext::Object;

/// An execution request lowered for delegation to a subschema.
///
/// Transforms see the request after the gateway has parsed the client
/// operation into an [`ExecutableDocument`] and before it is delegated to the
/// execution engine.
#[derive(Clone, Debug)]
pub struct ExecutionRequest {
    /// The executable document about to be delegated.
    pub document: ExecutableDocument,

    /// The operation to execute, when the document holds more than one.
    pub operation_name: Option<String>,

    /// The variable values sent with the operation.
    pub variables: Object,
}

#[buildstructor::buildstructor]
impl ExecutionRequest {
    /// Constructor
    #[builder(visibility = "pub")]
    fn new(
        document: ExecutableDocument,
        operation_name: Option<String>,
        variables: Map<ByteString, Value>,
    ) -> Self {
        Self {
            document,
            operation_name,
            variables,
        }
    }
}
