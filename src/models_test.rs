use super::*;
use serde_json::json;

fn valid_user_json() -> serde_json::Value {
    json!({
        "id": "cm123abc",
        "email": "mario@nintendo.com",
        "displayName": "Super Mario",
        "skin": { "id": 1, "name": "Mario Classic Red", "character": "MARIO" }
    })
}

// =============================================================================
// CHARACTER
// =============================================================================

#[test]
fn character_uses_screaming_snake_tags() {
    assert_eq!(serde_json::to_value(Character::Mario).unwrap(), json!("MARIO"));
    assert_eq!(serde_json::to_value(Character::DonkeyKong).unwrap(), json!("DONKEY_KONG"));
}

#[test]
fn character_rejects_unknown_tag() {
    let result = serde_json::from_value::<Character>(json!("WALUIGI_PROBABLY"));
    assert!(result.is_err());
}

#[test]
fn character_rejects_lowercase_tag() {
    assert!(serde_json::from_value::<Character>(json!("mario")).is_err());
}

// =============================================================================
// SKIN
// =============================================================================

#[test]
fn skin_accepts_valid_shape() {
    let skin: Skin =
        serde_json::from_value(json!({ "id": 7, "name": "Bowser Spiked", "character": "BOWSER" })).unwrap();
    assert_eq!(skin.id, 7);
    assert_eq!(skin.name, "Bowser Spiked");
    assert_eq!(skin.character, Character::Bowser);
}

#[test]
fn skin_rejects_non_integer_id() {
    let result =
        serde_json::from_value::<Skin>(json!({ "id": 1.5, "name": "Half", "character": "MARIO" }));
    assert!(result.is_err());
}

#[test]
fn skin_rejects_string_id() {
    let result = serde_json::from_value::<Skin>(
        json!({ "id": "not-a-number", "name": "Nope", "character": "MARIO" }),
    );
    assert!(result.is_err());
}

#[test]
fn skin_rejects_empty_name() {
    let result =
        serde_json::from_value::<Skin>(json!({ "id": 1, "name": "", "character": "MARIO" }));
    assert!(result.is_err());
}

#[test]
fn skin_rejects_unknown_character() {
    let result = serde_json::from_value::<Skin>(
        json!({ "id": 1, "name": "Impostor", "character": "INVALID_CHARACTER" }),
    );
    assert!(result.is_err());
}

// =============================================================================
// EMAIL
// =============================================================================

#[test]
fn email_parse_accepts_and_normalizes() {
    let email = Email::parse("  USER@Example.com ").unwrap();
    assert_eq!(email.as_str(), "user@example.com");
}

#[test]
fn email_parse_rejects_invalid_values() {
    assert!(Email::parse("").is_none());
    assert!(Email::parse("user").is_none());
    assert!(Email::parse("@example.com").is_none());
    assert!(Email::parse("user@").is_none());
    assert!(Email::parse("a@b@c").is_none());
}

#[test]
fn email_deserialization_rejects_invalid() {
    assert!(serde_json::from_value::<Email>(json!("not-an-email")).is_err());
}

#[test]
fn email_serializes_back_to_plain_string() {
    let email: Email = serde_json::from_value(json!("luigi@nintendo.com")).unwrap();
    assert_eq!(serde_json::to_value(&email).unwrap(), json!("luigi@nintendo.com"));
}

// =============================================================================
// USER
// =============================================================================

#[test]
fn user_accepts_valid_shape_with_skin() {
    let user: User = serde_json::from_value(valid_user_json()).unwrap();
    assert_eq!(user.id, "cm123abc");
    assert_eq!(user.email.as_str(), "mario@nintendo.com");
    assert_eq!(user.display_name.as_deref(), Some("Super Mario"));
    assert!(user.has_skin());
    assert_eq!(user.skin.unwrap().character, Character::Mario);
}

#[test]
fn user_accepts_null_display_name_and_skin() {
    let user: User = serde_json::from_value(json!({
        "id": "cm456def",
        "email": "luigi@nintendo.com",
        "displayName": null,
        "skin": null
    }))
    .unwrap();
    assert!(user.display_name.is_none());
    assert!(!user.has_skin());
}

#[test]
fn user_rejects_non_email_address() {
    let mut payload = valid_user_json();
    payload["email"] = json!("not-an-email");
    assert!(serde_json::from_value::<User>(payload).is_err());
}

#[test]
fn user_rejects_non_string_id() {
    let mut payload = valid_user_json();
    payload["id"] = json!(123);
    assert!(serde_json::from_value::<User>(payload).is_err());
}

#[test]
fn user_rejects_invalid_nested_skin() {
    let mut payload = valid_user_json();
    payload["skin"] = json!({ "id": "x", "name": "", "character": "INVALID_CHARACTER" });
    assert!(serde_json::from_value::<User>(payload).is_err());
}

#[test]
fn user_round_trip_preserves_null_skin() {
    let source = json!({
        "id": "cm456def",
        "email": "luigi@nintendo.com",
        "displayName": "Luigi Bros",
        "skin": null
    });
    let user: User = serde_json::from_value(source.clone()).unwrap();
    let restored = serde_json::to_value(&user).unwrap();
    assert_eq!(restored, source);
}

#[test]
fn user_round_trip_preserves_all_fields() {
    let source = valid_user_json();
    let user: User = serde_json::from_value(source.clone()).unwrap();
    assert_eq!(serde_json::to_value(&user).unwrap(), source);
}
