//! Mask configuration records and the index built over them.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

/// Declares that one field of one composite type must be masked.
///
/// Entries are consumed once, at construction, in declaration order. Several
/// entries may target the same type with different fields. Entries for the
/// same `(type_name, field_name)` pair are not deduplicated: single-entry
/// lookups return the first declaration, and at result time every entry for a
/// type applies in order.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MaskConfig {
    /// The composite type declaring the field.
    pub type_name: String,

    /// The field whose value is masked.
    pub field_name: String,

    /// Opaque specification handed to the masking collaborator.
    pub mask: String,
}

/// Declaration-ordered mask entries, indexed by type name.
///
/// Observable behavior is that of a linear scan over the declared list:
/// first-match for single-entry lookups, declaration order for per-type
/// iteration.
#[derive(Debug, Default)]
pub(crate) struct MaskRules {
    by_type: HashMap<String, Vec<MaskConfig>>,
}

impl MaskRules {
    pub(crate) fn new(configs: Vec<MaskConfig>) -> Self {
        let mut by_type: HashMap<String, Vec<MaskConfig>> = HashMap::new();
        for config in configs {
            let entries = by_type.entry(config.type_name.clone()).or_default();
            if entries.iter().any(|e| e.field_name == config.field_name) {
                tracing::warn!(
                    type_name = %config.type_name,
                    field_name = %config.field_name,
                    "duplicate mask entry: the first declaration wins for lookups, \
                     and every entry applies to results"
                );
            }
            entries.push(config);
        }
        Self { by_type }
    }

    /// The first declared entry for `(type_name, field_name)`, if any.
    pub(crate) fn field_rule(&self, type_name: &str, field_name: &str) -> Option<&MaskConfig> {
        self.by_type
            .get(type_name)?
            .iter()
            .find(|config| config.field_name == field_name)
    }

    /// All entries declared for `type_name`, in declaration order.
    pub(crate) fn type_rules(&self, type_name: &str) -> &[MaskConfig] {
        self.by_type
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(type_name: &str, field_name: &str, mask: &str) -> MaskConfig {
        MaskConfig {
            type_name: type_name.to_string(),
            field_name: field_name.to_string(),
            mask: mask.to_string(),
        }
    }

    #[test]
    fn field_lookup_returns_the_first_declaration() {
        let rules = MaskRules::new(vec![
            entry("Player", "score", "first"),
            entry("Player", "email", "other"),
            entry("Player", "score", "second"),
        ]);

        assert_eq!(rules.field_rule("Player", "score").unwrap().mask, "first");
        assert_eq!(rules.field_rule("Player", "email").unwrap().mask, "other");
        assert_eq!(rules.field_rule("Player", "name"), None);
        assert_eq!(rules.field_rule("Team", "score"), None);
    }

    #[test]
    fn type_iteration_keeps_declaration_order_and_duplicates() {
        let rules = MaskRules::new(vec![
            entry("Player", "score", "first"),
            entry("Team", "name", "team"),
            entry("Player", "email", "other"),
            entry("Player", "score", "second"),
        ]);

        let masks: Vec<&str> = rules
            .type_rules("Player")
            .iter()
            .map(|config| config.mask.as_str())
            .collect();
        assert_eq!(masks, vec!["first", "other", "second"]);
        assert_eq!(rules.type_rules("Referee"), &[]);
    }

    #[test]
    fn entries_deserialize_from_host_configuration() {
        let config: MaskConfig = serde_json::from_value(serde_json::json!({
            "type_name": "Player",
            "field_name": "score",
            "mask": "#.**",
        }))
        .unwrap();
        assert_eq!(config, entry("Player", "score", "#.**"));

        serde_json::from_value::<MaskConfig>(serde_json::json!({
            "type_name": "Player",
            "field_name": "score",
            "mask": "#.**",
            "role": "admin",
        }))
        .unwrap_err();
    }
}
