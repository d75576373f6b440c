//! Per-request delegation state.

use std::collections::HashMap;

/// State threaded through one request's trip across the transform pipeline.
///
/// The host creates one context per delegated request and passes it to the
/// request and result call points. The alias registry lives here rather than
/// on the transform so that a response key recorded while lowering one
/// request can never bleed into the masking of another; a transform instance
/// stays immutable after construction and may serve concurrent requests.
#[derive(Clone, Debug, Default)]
pub struct DelegationContext {
    /// `type name -> field name -> response key`, first recording wins.
    aliases: HashMap<String, HashMap<String, String>>,
}

impl DelegationContext {
    /// Create an empty context for a new request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the response key under which the client selected
    /// `type_name.field_name`.
    ///
    /// The first recording for a pair wins for the rest of the request.
    pub(crate) fn record_alias(&mut self, type_name: &str, field_name: &str, response_key: &str) {
        self.aliases
            .entry(type_name.to_owned())
            .or_default()
            .entry(field_name.to_owned())
            .or_insert_with(|| response_key.to_owned());
    }

    /// The response key recorded for `type_name.field_name`, if the request
    /// stage saw the field.
    pub(crate) fn response_key(&self, type_name: &str, field_name: &str) -> Option<&str> {
        self.aliases
            .get(type_name)?
            .get(field_name)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_first_recording_wins() {
        let mut context = DelegationContext::new();
        context.record_alias("Player", "score", "s");
        context.record_alias("Player", "score", "points");
        context.record_alias("Player", "email", "email");

        assert_eq!(context.response_key("Player", "score"), Some("s"));
        assert_eq!(context.response_key("Player", "email"), Some("email"));
        assert_eq!(context.response_key("Player", "name"), None);
        assert_eq!(context.response_key("Team", "score"), None);
    }
}
