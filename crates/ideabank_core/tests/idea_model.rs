use ideabank_core::{validate_content, Idea, IdeaValidationError, MAX_CONTENT_CHARS};

#[test]
fn new_sets_both_timestamps_to_creation_time() {
    let idea = Idea::new(7, "hello", 1_700_000_000_000);

    assert_eq!(idea.id, 7);
    assert_eq!(idea.content, "hello");
    assert_eq!(idea.created_at, 1_700_000_000_000);
    assert_eq!(idea.updated_at, 1_700_000_000_000);
    assert!(idea.validate().is_ok());
}

#[test]
fn validate_content_rejects_empty_and_whitespace() {
    assert_eq!(
        validate_content("").unwrap_err(),
        IdeaValidationError::EmptyContent
    );
    assert_eq!(
        validate_content("   \t\n").unwrap_err(),
        IdeaValidationError::EmptyContent
    );
}

#[test]
fn validate_content_enforces_character_cap() {
    let at_cap = "x".repeat(MAX_CONTENT_CHARS);
    assert!(validate_content(&at_cap).is_ok());

    let over_cap = "x".repeat(MAX_CONTENT_CHARS + 1);
    assert_eq!(
        validate_content(&over_cap).unwrap_err(),
        IdeaValidationError::ContentTooLong {
            length: MAX_CONTENT_CHARS + 1
        }
    );
}

#[test]
fn content_cap_counts_characters_not_bytes() {
    // Multibyte characters must not trip the cap early.
    let content = "\u{e9}".repeat(MAX_CONTENT_CHARS);
    assert!(validate_content(&content).is_ok());
}

#[test]
fn validate_rejects_updated_before_created() {
    let mut idea = Idea::new(1, "valid", 2_000);
    idea.updated_at = 1_000;

    assert_eq!(
        idea.validate().unwrap_err(),
        IdeaValidationError::TimestampOrder {
            created_at: 2_000,
            updated_at: 1_000,
        }
    );
}

#[test]
fn idea_serialization_uses_expected_wire_fields() {
    let idea = Idea::new(42, "ship it", 1_700_000_000_000);

    let json = serde_json::to_value(&idea).unwrap();
    assert_eq!(json["id"], 42);
    assert_eq!(json["content"], "ship it");
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);
    assert_eq!(json["updated_at"], 1_700_000_000_000_i64);

    let decoded: Idea = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, idea);
}
