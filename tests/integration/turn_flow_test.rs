//! Turn Flow Integration Tests
//!
//! Tests for the dialogue turn pipeline:
//! - Extraction -> sanitization -> direction -> response generation
//! - Oracle failures degrading to fallback questions
//! - Store-backed turns, including replayed (double-submitted) turns

use std::sync::Arc;

use chrono::NaiveDate;

use biographer::models::settings::BiographerConfig;
use biographer::{
    BiographerService, ChatMessage, InMemoryProfileStore, ProfileStore, TurnOrchestrator,
    TurnRequest,
};
use biographer_core::Profile;
use biographer_knowledge::KnowledgeBase;
use biographer_llm::{LlmError, ScriptedProvider, ScriptedReply};

// ============================================================================
// Helpers
// ============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn orchestrator(provider: Arc<ScriptedProvider>) -> TurnOrchestrator {
    TurnOrchestrator::new(
        &BiographerConfig::default(),
        provider,
        Arc::new(KnowledgeBase::builtin()),
    )
}

/// Every asked field filled except partner preferences
fn nearly_complete_profile() -> Profile {
    let mut profile = Profile::from_pairs([
        ("full_name", "Asha Rao"),
        ("gender", "Female"),
        ("dob", "1993-04-12"),
        ("time_of_birth", "06:30"),
        ("place_of_birth", "Mysore"),
        ("gothra", "Kashyapa"),
        ("pravara", "Kashyapa - Avatsara - Naidhruva (3 Rishis)"),
        ("nakshatra", "Rohini"),
        ("rashi", "Vrishabha"),
        ("sub_community", "Havyaka"),
        ("diet", "Vegetarian"),
        ("height", "165 cm"),
        ("education", "MBA"),
        ("profession", "Product manager"),
        ("location", "Bengaluru"),
        ("visa_status", "Citizen"),
        ("marital_status", "Never Married"),
        ("about_me", "I love music and long walks."),
        ("photo_url", "https://example.com/asha.jpg"),
        ("video_url", "https://example.com/asha.mp4"),
    ]);
    profile.set("spiritual_org", vec!["Art of Living".to_string()]);
    profile
}

// ============================================================================
// Pipeline
// ============================================================================

#[tokio::test]
async fn test_gothra_answer_leads_to_pravara_question() {
    let provider = Arc::new(ScriptedProvider::with_texts([
        r#"{"gothra": "Bharadwaja"}"#,
        "Wonderful. Is your Pravara Angirasa - Barhaspatya - Bharadwaja?",
    ]));
    let request = TurnRequest {
        message_history: vec![
            ChatMessage::assistant("What is your Gothra?"),
            ChatMessage::user("I am Bharadwaja"),
        ],
        current_profile: Profile::from_pairs([
            ("full_name", "Asha Rao"),
            ("gender", "Female"),
            ("dob", "1993-04-12"),
            ("time_of_birth", "06:30"),
            ("place_of_birth", "Mysore"),
            ("partner_preferences", "Someone kind and curious"),
        ]),
    };

    let response = orchestrator(provider.clone())
        .run_turn(&request, today())
        .await
        .unwrap();

    assert_eq!(response.updated_profile.text("gothra"), Some("Bharadwaja"));
    assert_eq!(response.next_field.as_deref(), Some("pravara"));
    assert!(!response.is_complete);
    assert!(response.rejected.is_empty());

    let calls = provider.calls();
    assert_eq!(calls.len(), 2);
    let extraction_input = &calls[0].messages[0].content;
    assert!(extraction_input.contains("What is your Gothra?"));
    assert!(extraction_input.contains("I am Bharadwaja"));

    let response_system = calls[1].system.as_deref().unwrap();
    assert!(response_system.contains("Angirasa - Barhaspatya - Bharadwaja (3 Rishis)"));
}

#[tokio::test]
async fn test_oracle_outage_still_produces_a_question() {
    // Empty script: extraction and response generation both fail
    let provider = Arc::new(ScriptedProvider::empty());
    let request = TurnRequest {
        message_history: vec![
            ChatMessage::assistant("What is your Gothra?"),
            ChatMessage::user("I am Bharadwaja"),
        ],
        current_profile: Profile::from_pairs([
            ("full_name", "Asha Rao"),
            ("partner_preferences", "Someone kind and curious"),
        ]),
    };

    let response = orchestrator(provider).run_turn(&request, today()).await.unwrap();

    assert_eq!(response.updated_profile, request.current_profile);
    assert_eq!(response.next_field.as_deref(), Some("gender"));
    assert_eq!(response.assistant_reply, "Could you tell me your gender?");
}

#[tokio::test]
async fn test_slow_extraction_times_out() {
    let mut config = BiographerConfig::default();
    config.extraction_timeout_secs = 1;

    let provider = Arc::new(ScriptedProvider::new(vec![
        ScriptedReply::Delayed {
            after: std::time::Duration::from_secs(3),
            text: r#"{"gothra": "Bharadwaja"}"#.to_string(),
        },
        ScriptedReply::Text("What is your Gothra?".to_string()),
    ]));
    let orchestrator = TurnOrchestrator::new(
        &config,
        provider,
        Arc::new(KnowledgeBase::builtin()),
    );
    let request = TurnRequest {
        message_history: vec![ChatMessage::user("I am Bharadwaja")],
        current_profile: Profile::from_pairs([("full_name", "Asha Rao")]),
    };

    let response = orchestrator.run_turn(&request, today()).await.unwrap();
    assert!(!response.updated_profile.contains("gothra"));
    assert_eq!(response.assistant_reply, "What is your Gothra?");
}

#[tokio::test]
async fn test_new_user_is_greeted_even_with_other_fields() {
    let provider = Arc::new(ScriptedProvider::with_texts([
        r#"{"diet": "vegan"}"#,
    ]));
    let mut profile = nearly_complete_profile();
    profile.set("full_name", "Traveler");
    let request = TurnRequest {
        message_history: vec![ChatMessage::user("I'm vegan these days")],
        current_profile: profile,
    };

    let response = orchestrator(provider).run_turn(&request, today()).await.unwrap();

    assert_eq!(response.next_field.as_deref(), Some("full_name"));
    assert!(!response.is_complete);
    assert!(response.assistant_reply.contains("full name"));
    assert_eq!(response.updated_profile.text("diet"), Some("Vegan"));
}

#[tokio::test]
async fn test_final_answer_completes_profile() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        ScriptedReply::Text(r#"{"partner_preferences": "Someone kind who loves travel"}"#.to_string()),
        ScriptedReply::Error(LlmError::RateLimited {
            message: "slow down".to_string(),
            retry_after: Some(5),
        }),
    ]));
    let request = TurnRequest {
        message_history: vec![
            ChatMessage::assistant("What are you looking for in a life partner?"),
            ChatMessage::user("Someone kind who loves travel"),
        ],
        current_profile: nearly_complete_profile(),
    };

    let response = orchestrator(provider).run_turn(&request, today()).await.unwrap();

    assert!(response.is_complete);
    assert_eq!(response.next_field, None);
    assert_eq!(response.progress, 100.0);
    assert!(response.assistant_reply.contains("complete"));
}

#[tokio::test]
async fn test_response_json_shape() {
    let provider = Arc::new(ScriptedProvider::with_texts(["Hello! What's your full name?"]));
    let response = orchestrator(provider)
        .run_turn(&TurnRequest::default(), today())
        .await
        .unwrap();

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["assistant_reply"], "Hello! What's your full name?");
    assert_eq!(json["is_complete"], false);
    assert_eq!(json["next_field"], "full_name");
    assert!(json["updated_profile"].as_object().unwrap().is_empty());
}

// ============================================================================
// Store-backed service
// ============================================================================

#[tokio::test]
async fn test_replayed_turn_does_not_duplicate_preferences() {
    let store = Arc::new(InMemoryProfileStore::new());
    store.insert("asha", Profile::from_pairs([("full_name", "Asha Rao")])).await;

    let provider = Arc::new(ScriptedProvider::with_texts([
        r#"{"partner_preferences": "Someone kind"}"#,
        "Anything else you'd like in a partner?",
        r#"{"partner_preferences": "Someone kind"}"#,
        "Anything else you'd like in a partner?",
    ]));
    let service = BiographerService::new(orchestrator(provider), store.clone());

    let history = vec![
        ChatMessage::assistant("What are you looking for in a partner?"),
        ChatMessage::user("Someone kind"),
    ];
    service.handle_turn("asha", history.clone(), today()).await.unwrap();
    let replay = service.handle_turn("asha", history, today()).await.unwrap();

    let stored = store.get("asha").await.unwrap();
    assert_eq!(stored.text("partner_preferences"), Some("Someone kind"));
    assert_eq!(replay.rejected.len(), 1);
}

#[tokio::test]
async fn test_multi_turn_conversation_accumulates() {
    let store = Arc::new(InMemoryProfileStore::new());
    store.insert("asha", Profile::new()).await;

    let provider = Arc::new(ScriptedProvider::with_texts([
        // turn 1: greeting only
        "Hi, I'm Biographer! What's your full name?",
        // turn 2
        r#"{"full_name": "Asha Rao"}"#,
        "Lovely to meet you, Asha. What are you looking for in a partner?",
        // turn 3
        r#"{"partner_preferences": "Kind, curious, loves travel"}"#,
        "Got it. Are you male or female?",
        // turn 4
        r#"{"gender": "f", "dob": "1993"}"#,
        "Thanks! What's your full date of birth?",
    ]));
    let service = BiographerService::new(orchestrator(provider), store.clone());

    let mut history = Vec::new();
    let first = service.handle_turn("asha", history.clone(), today()).await.unwrap();
    assert_eq!(first.next_field.as_deref(), Some("full_name"));
    history.push(ChatMessage::assistant(first.assistant_reply));

    history.push(ChatMessage::user("I'm Asha Rao"));
    let second = service.handle_turn("asha", history.clone(), today()).await.unwrap();
    assert_eq!(second.next_field.as_deref(), Some("partner_preferences"));
    history.push(ChatMessage::assistant(second.assistant_reply));

    history.push(ChatMessage::user("Kind, curious, loves travel"));
    let third = service.handle_turn("asha", history.clone(), today()).await.unwrap();
    assert_eq!(third.next_field.as_deref(), Some("gender"));
    history.push(ChatMessage::assistant(third.assistant_reply));

    history.push(ChatMessage::user("Female, born in 1993"));
    let fourth = service.handle_turn("asha", history, today()).await.unwrap();
    assert_eq!(fourth.next_field.as_deref(), Some("dob"));

    let stored = store.get("asha").await.unwrap();
    assert_eq!(stored.text("full_name"), Some("Asha Rao"));
    assert_eq!(stored.text("gender"), Some("Female"));
    assert_eq!(stored.integer("age"), Some(32));
    assert!(!stored.contains("dob"));
    assert!(fourth.progress > third.progress);
}
