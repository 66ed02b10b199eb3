//! Director
//!
//! Picks the next field to ask about and turns it into a prompt directive.
//! Never fails: a missing or malformed profile value degrades to a more
//! generic question.

use std::collections::HashMap;
use std::sync::Arc;

use biographer_core::schema::{self, FieldSpec};
use biographer_core::{CoreResult, Profile};
use biographer_knowledge::KnowledgeBase;
use rand::RngCore;
use tracing::debug;

use super::directives::{
    builtin_builders, completion_directive, default_directive, introduction_directive,
    DirectiveBuilder, DirectiveContext, PromptDirective,
};

/// Names that mean the user has not introduced themselves yet.
/// Compared trimmed and case-insensitively.
pub const NEW_USER_NAMES: &[&str] = &["traveler", "user", "guest", "...", "", "null"];

pub struct Director {
    knowledge: Arc<KnowledgeBase>,
    builders: HashMap<&'static str, DirectiveBuilder>,
}

impl Director {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            knowledge,
            builders: builtin_builders(),
        }
    }

    /// Replace or add the builder for one field. The field must be in the schema.
    pub fn with_builder(mut self, field: &str, builder: DirectiveBuilder) -> CoreResult<Self> {
        let spec = schema::require_field(field)?;
        self.builders.insert(spec.name, builder);
        Ok(self)
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// True when the name field is absent or still a placeholder
    pub fn needs_introduction(profile: &Profile) -> bool {
        match profile.display(schema::FULL_NAME) {
            None => true,
            Some(name) => NEW_USER_NAMES
                .iter()
                .any(|p| p.eq_ignore_ascii_case(name.trim())),
        }
    }

    /// The next incomplete field. Partner preferences jumps the queue.
    pub fn next_field(profile: &Profile) -> Option<&'static FieldSpec> {
        let missing = schema::missing_fields(profile);
        missing
            .iter()
            .find(|f| f.name == schema::PARTNER_PREFERENCES)
            .or_else(|| missing.first())
            .copied()
    }

    /// Directive for the next assistant message
    pub fn direct(&self, profile: &Profile) -> PromptDirective {
        let mut rng = rand::thread_rng();
        self.direct_with_rng(profile, &mut rng)
    }

    /// Same as [`Director::direct`] with a caller-supplied source of randomness
    pub fn direct_with_rng(&self, profile: &Profile, rng: &mut dyn RngCore) -> PromptDirective {
        if Self::needs_introduction(profile) {
            debug!("New user, directing introduction");
            return introduction_directive();
        }

        let Some(spec) = Self::next_field(profile) else {
            debug!("No missing fields, directing completion");
            return completion_directive();
        };

        let builder = self
            .builders
            .get(spec.name)
            .copied()
            .unwrap_or(default_directive);
        let ctx = DirectiveContext {
            profile,
            knowledge: &self.knowledge,
        };
        let directive = builder(spec, &ctx, rng);
        debug!(field = %spec.name, hints = directive.hints.len(), "Directive selected");
        directive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::biographer::directives::DirectiveTarget;
    use biographer_core::schema::FieldKind;
    use rand::rngs::StdRng;
    use biographer_core::CoreError;
    use rand::SeedableRng;

    fn director() -> Director {
        Director::new(Arc::new(KnowledgeBase::builtin()))
    }

    fn direct(profile: &Profile) -> PromptDirective {
        let mut rng = StdRng::seed_from_u64(1);
        director().direct_with_rng(profile, &mut rng)
    }

    fn full_profile() -> Profile {
        let mut profile = Profile::new();
        for field in schema::ordered_fields() {
            match field.kind {
                FieldKind::StringArray => profile.set(field.name, vec!["ISKCON".to_string()]),
                _ => profile.set(field.name, "a complete answer"),
            }
        }
        profile
    }

    #[test]
    fn test_new_user_gets_introduction() {
        assert_eq!(direct(&Profile::new()).target, DirectiveTarget::Introduce);

        for name in ["Traveler", " USER ", "guest", "...", "", "null", "NULL"] {
            let mut profile = full_profile();
            profile.set(schema::FULL_NAME, name);
            assert_eq!(direct(&profile).target, DirectiveTarget::Introduce, "{name:?}");
        }
    }

    #[test]
    fn test_canonical_order_once_preferences_known() {
        let profile = Profile::from_pairs([
            ("full_name", "Asha Rao"),
            ("partner_preferences", "kind and family oriented"),
        ]);
        assert_eq!(
            direct(&profile).target,
            DirectiveTarget::Field(schema::GENDER)
        );
    }

    #[test]
    fn test_partner_preferences_takes_priority() {
        let mut profile = full_profile();
        profile.remove(schema::LOCATION);
        profile.remove(schema::PARTNER_PREFERENCES);
        assert_eq!(
            Director::next_field(&profile).map(|f| f.name),
            Some(schema::PARTNER_PREFERENCES)
        );
        assert_eq!(
            direct(&profile).target,
            DirectiveTarget::Field(schema::PARTNER_PREFERENCES)
        );
    }

    #[test]
    fn test_short_partner_preferences_still_prioritized() {
        let mut profile = Profile::from_pairs([("full_name", "Asha Rao")]);
        profile.set(schema::PARTNER_PREFERENCES, "kind");
        assert_eq!(
            direct(&profile).target,
            DirectiveTarget::Field(schema::PARTNER_PREFERENCES)
        );
    }

    #[test]
    fn test_complete_profile() {
        let d = direct(&full_profile());
        assert_eq!(d.target, DirectiveTarget::Complete);
        assert!(d.guidance.contains("Thank"));
    }

    #[test]
    fn test_pravara_after_gothra() {
        let profile = Profile::from_pairs([
            ("full_name", "Asha Rao"),
            ("gender", "Female"),
            ("dob", "1993-04-12"),
            ("time_of_birth", "06:30"),
            ("place_of_birth", "Mysore"),
            ("gothra", "Bharadwaja"),
            ("partner_preferences", "kind and family oriented"),
        ]);
        let d = direct(&profile);
        assert_eq!(d.target, DirectiveTarget::Field(schema::PRAVARA));
        assert!(d
            .hints
            .contains(&"Angirasa - Barhaspatya - Bharadwaja (3 Rishis)".to_string()));
    }

    #[test]
    fn test_custom_builder_overrides_table() {
        fn custom(
            spec: &'static FieldSpec,
            _ctx: &DirectiveContext<'_>,
            _rng: &mut dyn RngCore,
        ) -> PromptDirective {
            PromptDirective {
                target: DirectiveTarget::Field(spec.name),
                topic: "custom".to_string(),
                guidance: String::new(),
                hints: Vec::new(),
                fallback_question: "custom?".to_string(),
            }
        }

        let director = director().with_builder(schema::GENDER, custom).unwrap();
        let profile = Profile::from_pairs([
            ("full_name", "Asha Rao"),
            ("partner_preferences", "kind and family oriented"),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(director.direct_with_rng(&profile, &mut rng).topic, "custom");

        let misspelt = self::director().with_builder("gothram", custom);
        assert!(matches!(misspelt, Err(CoreError::UnknownField(_))));
    }
}
