//! Wire documents for the roster service and the character detail API.

use serde::Deserialize;

use super::error::ParseError;
use super::EntityId;

/// `{ "name"?: string|null, "cards"?: [int]|null }`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cards: Option<Vec<EntityId>>,
}

/// A resolved character, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDetail {
    pub id: EntityId,
    pub display_name: String,
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
struct CharacterEnvelope {
    #[serde(default)]
    data: Option<CharacterData>,
}

#[derive(Debug, Deserialize)]
struct CharacterData {
    mal_id: EntityId,
    name: String,
    images: CharacterImages,
}

#[derive(Debug, Deserialize)]
struct CharacterImages {
    jpg: JpgImage,
}

#[derive(Debug, Deserialize)]
struct JpgImage {
    image_url: String,
}

/// Parse a roster body. A top-level `null` is [`ParseError::Null`].
pub fn parse_roster(body: &[u8]) -> Result<RosterDocument, ParseError> {
    let doc: Option<RosterDocument> = serde_json::from_slice(body)?;
    doc.ok_or(ParseError::Null)
}

/// Parse a character envelope. A null envelope or null `data` is [`ParseError::Null`].
pub fn parse_character(body: &[u8]) -> Result<EntityDetail, ParseError> {
    let envelope: Option<CharacterEnvelope> = serde_json::from_slice(body)?;
    let data = envelope.and_then(|e| e.data).ok_or(ParseError::Null)?;
    Ok(EntityDetail {
        id: data.mal_id,
        display_name: data.name,
        image_url: data.images.jpg.image_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_with_name_and_cards() {
        let doc = parse_roster(br#"{"id":1,"name":"Misty","cards":[5,7,5]}"#).unwrap();
        assert_eq!(doc.name.as_deref(), Some("Misty"));
        assert_eq!(doc.cards, Some(vec![5, 7, 5]));
    }

    #[test]
    fn roster_missing_and_null_fields() {
        let doc = parse_roster(b"{}").unwrap();
        assert!(doc.name.is_none());
        assert!(doc.cards.is_none());

        let doc = parse_roster(br#"{"name":null,"cards":null}"#).unwrap();
        assert!(doc.name.is_none());
        assert!(doc.cards.is_none());
    }

    #[test]
    fn roster_null_or_garbage_is_error() {
        assert!(matches!(parse_roster(b"null"), Err(ParseError::Null)));
        assert!(matches!(parse_roster(b"<html>"), Err(ParseError::Json(_))));
        assert!(matches!(
            parse_roster(br#"{"cards":["x"]}"#),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn character_envelope() {
        let body = br#"{"data":{"mal_id":5,"name":"Spike Spiegel","about":"...",
            "images":{"jpg":{"image_url":"https://cdn/5.jpg"},"webp":{}}}}"#;
        let detail = parse_character(body).unwrap();
        assert_eq!(
            detail,
            EntityDetail {
                id: 5,
                display_name: "Spike Spiegel".to_string(),
                image_url: "https://cdn/5.jpg".to_string(),
            }
        );
    }

    #[test]
    fn character_null_payload_is_not_found() {
        assert!(matches!(parse_character(br#"{"data":null}"#), Err(ParseError::Null)));
        assert!(matches!(parse_character(b"{}"), Err(ParseError::Null)));
        assert!(matches!(parse_character(b"null"), Err(ParseError::Null)));
    }

    #[test]
    fn character_missing_image_is_parse_error() {
        let body = br#"{"data":{"mal_id":5,"name":"Faye","images":{}}}"#;
        assert!(matches!(parse_character(body), Err(ParseError::Json(_))));
    }
}
