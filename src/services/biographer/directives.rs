//! Prompt Directives
//!
//! A directive tells the response-generation oracle what to ask next. The
//! builders live in a table keyed by field name; fields without a bespoke
//! entry get the default builder.

use std::collections::HashMap;

use biographer_core::schema::{self, FieldKind, FieldSpec};
use biographer_core::Profile;
use biographer_knowledge::KnowledgeBase;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::Serialize;
use tracing::{debug, warn};

/// Number of Gothra names offered as anchors
const GOTHRA_HINT_COUNT: usize = 5;

/// Upper bound on sampled catalog hints
const MAX_SAMPLED_HINTS: usize = 4;

/// Used when the spiritual-lineage catalog cannot be read
const FALLBACK_LINEAGES: &[&str] = &["Art of Living", "ISKCON"];

/// What the directive is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "field")]
pub enum DirectiveTarget {
    /// Greet a new user and ask for their full name
    Introduce,
    /// Ask about one schema field
    Field(&'static str),
    /// Nothing is missing
    Complete,
}

impl DirectiveTarget {
    /// Field the directive asks about, if any
    pub fn field_name(&self) -> Option<&'static str> {
        match self {
            DirectiveTarget::Introduce => Some(schema::FULL_NAME),
            DirectiveTarget::Field(name) => Some(name),
            DirectiveTarget::Complete => None,
        }
    }
}

/// Structured guidance for one assistant message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptDirective {
    pub target: DirectiveTarget,
    /// Human-readable topic label
    pub topic: String,
    /// Tone and must-ask content
    pub guidance: String,
    /// Knowledge-base examples the question may offer
    pub hints: Vec<String>,
    /// Sent verbatim when response generation fails
    pub fallback_question: String,
}

/// Everything a builder may consult
pub struct DirectiveContext<'a> {
    pub profile: &'a Profile,
    pub knowledge: &'a KnowledgeBase,
}

pub type DirectiveBuilder =
    fn(&'static FieldSpec, &DirectiveContext<'_>, &mut dyn RngCore) -> PromptDirective;

/// The bespoke directive table
pub fn builtin_builders() -> HashMap<&'static str, DirectiveBuilder> {
    let mut builders: HashMap<&'static str, DirectiveBuilder> = HashMap::new();
    builders.insert(schema::DOB, dob_directive);
    builders.insert(schema::TIME_OF_BIRTH, time_of_birth_directive);
    builders.insert(schema::GOTHRA, gothra_directive);
    builders.insert(schema::PRAVARA, pravara_directive);
    builders.insert(schema::NAKSHATRA, nakshatra_directive);
    builders.insert(schema::SUB_COMMUNITY, sub_community_directive);
    builders.insert(schema::SPIRITUAL_ORG, spiritual_org_directive);
    builders.insert(schema::PHOTO_URL, photo_directive);
    builders.insert(schema::VIDEO_URL, video_directive);
    builders.insert(schema::PARTNER_PREFERENCES, partner_preferences_directive);
    builders
}

/// Ask for the humanized field name conversationally. Enumerated fields
/// offer their canonical options.
pub fn default_directive(
    spec: &'static FieldSpec,
    _ctx: &DirectiveContext<'_>,
    _rng: &mut dyn RngCore,
) -> PromptDirective {
    let name = schema::humanize(spec.name);
    let hints = match spec.kind {
        FieldKind::Enumerated(options) => options.iter().map(|(o, _)| o.to_string()).collect(),
        _ => Vec::new(),
    };
    PromptDirective {
        target: DirectiveTarget::Field(spec.name),
        topic: spec.label.to_string(),
        guidance: format!("Ask for their {} conversationally.", name),
        hints,
        fallback_question: format!("Could you tell me your {}?", name),
    }
}

pub fn introduction_directive() -> PromptDirective {
    PromptDirective {
        target: DirectiveTarget::Introduce,
        topic: "Introduction".to_string(),
        guidance: "This is a new user. Introduce yourself briefly, explain that you will help \
                   build their profile one question at a time, and ask for their full name."
            .to_string(),
        hints: Vec::new(),
        fallback_question: "Hello and welcome! I'll help you build your profile one question at \
                            a time. To begin, what is your full name?"
            .to_string(),
    }
}

pub fn completion_directive() -> PromptDirective {
    PromptDirective {
        target: DirectiveTarget::Complete,
        topic: "Profile complete".to_string(),
        guidance: "Every field is filled. Thank the user warmly and tell them their profile is \
                   complete. Do not ask another question."
            .to_string(),
        hints: Vec::new(),
        fallback_question: "Thank you for sharing all of this. Your profile is now complete!"
            .to_string(),
    }
}

fn field_directive(
    spec: &'static FieldSpec,
    guidance: impl Into<String>,
    hints: Vec<String>,
    fallback_question: impl Into<String>,
) -> PromptDirective {
    PromptDirective {
        target: DirectiveTarget::Field(spec.name),
        topic: spec.label.to_string(),
        guidance: guidance.into(),
        hints,
        fallback_question: fallback_question.into(),
    }
}

fn dob_directive(
    spec: &'static FieldSpec,
    _ctx: &DirectiveContext<'_>,
    _rng: &mut dyn RngCore,
) -> PromptDirective {
    field_directive(
        spec,
        "Ask for their full date of birth (day, month and year). It is needed for the horoscope, \
         so a year alone is not enough.",
        Vec::new(),
        "What is your full date of birth (day, month and year)?",
    )
}

fn time_of_birth_directive(
    spec: &'static FieldSpec,
    _ctx: &DirectiveContext<'_>,
    _rng: &mut dyn RngCore,
) -> PromptDirective {
    field_directive(
        spec,
        "Ask for their time of birth as precisely as they know it. Mention that an approximate \
         time is fine.",
        Vec::new(),
        "Do you know your time of birth? An approximate time is fine.",
    )
}

fn gothra_directive(
    spec: &'static FieldSpec,
    ctx: &DirectiveContext<'_>,
    _rng: &mut dyn RngCore,
) -> PromptDirective {
    let hints: Vec<String> = ctx
        .knowledge
        .well_known_gothras(GOTHRA_HINT_COUNT)
        .into_iter()
        .map(str::to_string)
        .collect();
    let fallback = if hints.is_empty() {
        "What is your Gothra?".to_string()
    } else {
        format!("What is your Gothra (for example {})?", hints.join(", "))
    };
    field_directive(
        spec,
        "Ask for their Gothra (paternal lineage). Offer a few well-known names as examples so \
         the question is easy to answer.",
        hints,
        fallback,
    )
}

fn pravara_directive(
    spec: &'static FieldSpec,
    ctx: &DirectiveContext<'_>,
    _rng: &mut dyn RngCore,
) -> PromptDirective {
    let generic = || {
        field_directive(
            spec,
            "Ask which Pravara (sequence of sage ancestors) their family recites. Reassure them \
             it is fine to check with family if unsure.",
            Vec::new(),
            "Which Pravara does your family follow?",
        )
    };

    let Some(gothra) = ctx.profile.display(schema::GOTHRA) else {
        return generic();
    };

    match ctx.knowledge.lookup_gothra(&gothra) {
        Ok(found) => {
            let options = found.entry.pravara_options.clone();
            debug!(gothra = %gothra, matched = %found.entry.gothra, kind = ?found.kind, "Pravara hints resolved");
            let (guidance, fallback) = if options.len() == 1 {
                (
                    format!(
                        "Their Gothra is {}. Ask them to confirm, yes or no, that their Pravara \
                         is the option below.",
                        found.entry.gothra
                    ),
                    format!("Is your Pravara {}?", options[0]),
                )
            } else {
                (
                    format!(
                        "Their Gothra is {}. Ask which of the Pravara options below their family \
                         follows.",
                        found.entry.gothra
                    ),
                    format!("Which Pravara does your family follow: {}?", join_choices(&options)),
                )
            };
            field_directive(spec, guidance, options, fallback)
        }
        Err(e) => {
            warn!(gothra = %gothra, error = %e, "Pravara lookup failed, using generic question");
            generic()
        }
    }
}

fn nakshatra_directive(
    spec: &'static FieldSpec,
    _ctx: &DirectiveContext<'_>,
    _rng: &mut dyn RngCore,
) -> PromptDirective {
    field_directive(
        spec,
        "Ask for their birth star (Nakshatra). If they do not know it, tell them it can be \
         worked out later from their birth details.",
        Vec::new(),
        "Do you know your birth star (Nakshatra)?",
    )
}

fn sub_community_directive(
    spec: &'static FieldSpec,
    ctx: &DirectiveContext<'_>,
    rng: &mut dyn RngCore,
) -> PromptDirective {
    let regional = ctx
        .profile
        .display(schema::LOCATION)
        .map(|loc| ctx.knowledge.classify_region(&loc))
        .map(|region| ctx.knowledge.sub_communities_in(region))
        .unwrap_or_default();

    let pool: Vec<&str> = if regional.is_empty() {
        ctx.knowledge
            .sub_communities()
            .iter()
            .map(|s| s.name.as_str())
            .collect()
    } else {
        regional.iter().map(|s| s.name.as_str()).collect()
    };
    let hints = sample(&pool, rng);

    field_directive(
        spec,
        "Ask which sub-community they belong to. Keep it light and offer the examples only as \
         prompts.",
        hints,
        "Which sub-community do you belong to?",
    )
}

fn spiritual_org_directive(
    spec: &'static FieldSpec,
    ctx: &DirectiveContext<'_>,
    rng: &mut dyn RngCore,
) -> PromptDirective {
    let hints = match ctx.knowledge.spiritual_lineages() {
        Ok(lineages) => {
            let pool: Vec<&str> = lineages.iter().map(String::as_str).collect();
            sample(&pool, rng)
        }
        Err(e) => {
            warn!(error = %e, "Spiritual lineage catalog unavailable, using fallback examples");
            FALLBACK_LINEAGES.iter().map(|s| s.to_string()).collect()
        }
    };
    let fallback = format!(
        "Do you follow any spiritual organizations or lineages, such as {}? Feel free to name \
         more than one.",
        join_choices(&hints)
    );
    field_directive(
        spec,
        "Ask whether they follow any spiritual organizations or lineages. Make clear they can \
         name several, or none.",
        hints,
        fallback,
    )
}

fn photo_directive(
    spec: &'static FieldSpec,
    _ctx: &DirectiveContext<'_>,
    _rng: &mut dyn RngCore,
) -> PromptDirective {
    field_directive(
        spec,
        "Invite them to share a profile photo link. It is optional, so make saying 'skip' easy.",
        Vec::new(),
        "Would you like to add a profile photo? You can share a link, or say skip.",
    )
}

fn video_directive(
    spec: &'static FieldSpec,
    _ctx: &DirectiveContext<'_>,
    _rng: &mut dyn RngCore,
) -> PromptDirective {
    field_directive(
        spec,
        "Invite them to share a short video introduction link. It is optional.",
        Vec::new(),
        "Would you like to add a short video introduction? You can share a link, or say skip.",
    )
}

fn partner_preferences_directive(
    spec: &'static FieldSpec,
    ctx: &DirectiveContext<'_>,
    _rng: &mut dyn RngCore,
) -> PromptDirective {
    let guidance = match ctx.profile.display(schema::PARTNER_PREFERENCES) {
        Some(so_far) => format!(
            "They have started describing their ideal partner: \"{}\". Ask them to add a little \
             more (values, lifestyle, location or family expectations).",
            so_far
        ),
        None => "Ask what they are looking for in a partner: values, lifestyle, location or \
                 family expectations."
            .to_string(),
    };
    field_directive(
        spec,
        guidance,
        Vec::new(),
        "What are you looking for in a life partner?",
    )
}

/// Up to `MAX_SAMPLED_HINTS` distinct entries, in random order
fn sample(pool: &[&str], rng: &mut dyn RngCore) -> Vec<String> {
    pool.choose_multiple(rng, MAX_SAMPLED_HINTS)
        .map(|s| s.to_string())
        .collect()
}

/// `["a", "b", "c"]` -> `"a, b or c"`
fn join_choices(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}
