//! The field-masking transform.

use std::sync::Arc;

use apollo_compiler::Name;
use apollo_compiler::Schema;
use apollo_compiler::ast::Type;
use apollo_compiler::executable::Selection;
use apollo_compiler::executable::SelectionSet;
use apollo_compiler::name;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::validation::Valid;
use serde_json_bytes::Value;

use crate::configuration::MaskConfig;
use crate::configuration::MaskRules;
use crate::context::DelegationContext;
use crate::error::ConfigurationError;
use crate::json_ext::Object;
use crate::json_ext::TYPENAME;
use crate::json_ext::scalar_source;
use crate::masking::Masker;
use crate::request::ExecutionRequest;
use crate::response::Response;
use crate::transform::Transform;

/// Masks configured scalar fields on their way out of the gateway.
///
/// The schema stage rewrites each configured field to the `String` scalar, so
/// clients see an opaque string where the subschema declares a real value.
/// The request stage records, per request, the response key the client chose
/// for each configured field. The result stage replaces the value found under
/// that key with the output of the masking collaborator.
pub struct MaskTransform {
    rules: MaskRules,
    masker: Arc<dyn Masker>,
}

#[buildstructor::buildstructor]
impl MaskTransform {
    /// Constructor
    #[builder(visibility = "pub")]
    fn new(configs: Vec<MaskConfig>, masker: Arc<dyn Masker>) -> Self {
        Self {
            rules: MaskRules::new(configs),
            masker,
        }
    }

    /// Every `(type, field)` pair the configuration selects in `schema`,
    /// after checking that each one is maskable.
    ///
    /// Entries naming unknown types, non-composite types or undeclared fields
    /// never fire.
    fn masked_fields(&self, schema: &Schema) -> Result<Vec<(Name, Name)>, ConfigurationError> {
        let mut targets = Vec::new();
        for (type_name, ty) in &schema.types {
            let fields = match ty {
                ExtendedType::Object(object) => &object.fields,
                ExtendedType::Interface(interface) => &interface.fields,
                _ => continue,
            };
            for (field_name, field) in fields {
                if self.rules.field_rule(type_name, field_name).is_none() {
                    continue;
                }
                if !is_scalar(schema, &field.ty) {
                    return Err(ConfigurationError::NonScalarField {
                        type_name: type_name.to_string(),
                        field_name: field_name.to_string(),
                    });
                }
                targets.push((type_name.clone(), field_name.clone()));
            }
        }
        Ok(targets)
    }

    /// Record the response key of every configured field selected anywhere in
    /// `selection_set`, whose type condition names the parent type.
    fn record_aliases(&self, selection_set: &SelectionSet, context: &mut DelegationContext) {
        for selection in &selection_set.selections {
            match selection {
                Selection::Field(field) => {
                    if self
                        .rules
                        .field_rule(&selection_set.ty, &field.name)
                        .is_some()
                    {
                        context.record_alias(
                            selection_set.ty.as_str(),
                            field.name.as_str(),
                            field.response_key().as_str(),
                        );
                    }
                    self.record_aliases(&field.selection_set, context);
                }
                Selection::InlineFragment(inline) => {
                    self.record_aliases(&inline.selection_set, context);
                }
                // fragment definitions are walked once from the document
                Selection::FragmentSpread(_) => {}
            }
        }
    }

    /// Mask every object in the tree, innermost first, so nested masked
    /// objects are each handled independently.
    fn mask_value(&self, value: &mut Value, context: &DelegationContext) {
        match value {
            Value::Array(items) => {
                for item in items {
                    self.mask_value(item, context);
                }
            }
            Value::Object(object) => {
                for child in object.values_mut() {
                    self.mask_value(child, context);
                }
                self.mask_object(object, context);
            }
            _ => {}
        }
    }

    fn mask_object(&self, object: &mut Object, context: &DelegationContext) {
        let Some(type_name) = object
            .get(TYPENAME)
            .and_then(Value::as_str)
            .map(str::to_owned)
        else {
            return;
        };
        for rule in self.rules.type_rules(&type_name) {
            let response_key = context
                .response_key(&type_name, &rule.field_name)
                .unwrap_or(&rule.field_name);
            let Some(value) = object.get_mut(response_key) else {
                tracing::trace!(
                    type_name = %type_name,
                    field_name = %rule.field_name,
                    "masked field absent from result, skipping"
                );
                continue;
            };
            match scalar_source(value) {
                Some(source) => {
                    *value = Value::String(self.masker.mask(&source, &rule.mask).into());
                }
                None => tracing::trace!(
                    type_name = %type_name,
                    field_name = %rule.field_name,
                    "masked field has no maskable value, skipping"
                ),
            }
        }
    }
}

impl Transform for MaskTransform {
    fn transform_schema(&self, schema: Valid<Schema>) -> Result<Valid<Schema>, ConfigurationError> {
        let mut schema = schema.into_inner();
        // resolve before mutating: the scalar check reads the type table
        for (type_name, field_name) in self.masked_fields(&schema)? {
            let Some(ty) = schema.types.get_mut(&type_name) else {
                continue;
            };
            let fields = match ty {
                ExtendedType::Object(object) => &mut object.make_mut().fields,
                ExtendedType::Interface(interface) => &mut interface.make_mut().fields,
                _ => continue,
            };
            if let Some(field) = fields.get_mut(&field_name) {
                field.make_mut().ty = Type::Named(name!("String"));
            }
        }
        schema
            .validate()
            .map_err(|invalid| ConfigurationError::InvalidSchema {
                errors: invalid.errors.to_string(),
            })
    }

    fn transform_request(
        &self,
        request: ExecutionRequest,
        context: &mut DelegationContext,
    ) -> ExecutionRequest {
        if let Some(operation) = &request.document.operations.anonymous {
            self.record_aliases(&operation.selection_set, context);
        }
        for operation in request.document.operations.named.values() {
            self.record_aliases(&operation.selection_set, context);
        }
        for fragment in request.document.fragments.values() {
            self.record_aliases(&fragment.selection_set, context);
        }
        request
    }

    fn transform_result(&self, mut result: Response, context: &DelegationContext) -> Response {
        if let Some(data) = result.data.as_mut() {
            self.mask_value(data, context);
        }
        result
    }
}

/// Whether `ty` is a bare scalar.
///
/// List and non-null wrappers disqualify a field from masking even when the
/// wrapped type is scalar.
fn is_scalar(schema: &Schema, ty: &Type) -> bool {
    match ty {
        Type::Named(name) => matches!(schema.types.get(name), Some(ExtendedType::Scalar(_))),
        _ => false,
    }
}
