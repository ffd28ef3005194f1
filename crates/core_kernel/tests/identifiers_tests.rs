//! Identifier serialization and parsing tests

use core_kernel::{BatchId, ClaimId, ModelVersionId, PredictionId};
use uuid::Uuid;

#[test]
fn test_ids_serialize_as_plain_uuids() {
    let uuid = Uuid::new_v4();
    let id = ClaimId::from_uuid(uuid);

    let serialized = serde_json::to_string(&id).unwrap();
    assert_eq!(serialized, format!("\"{uuid}\""));

    let back: ClaimId = serde_json::from_str(&serialized).unwrap();
    assert_eq!(back, id);
}

#[test]
fn test_display_prefixes_are_distinct() {
    assert_eq!(ClaimId::prefix(), "CLM");
    assert_eq!(PredictionId::prefix(), "PRD");
    assert_eq!(ModelVersionId::prefix(), "MDL");
    assert_eq!(BatchId::prefix(), "BAT");
}

#[test]
fn test_parse_accepts_prefixed_and_bare_forms() {
    let id = ModelVersionId::new();
    let prefixed: ModelVersionId = id.to_string().parse().unwrap();
    let bare: ModelVersionId = id.as_uuid().to_string().parse().unwrap();
    assert_eq!(prefixed, id);
    assert_eq!(bare, id);
}
