use super::*;

#[test]
fn construction_stamps_sequence_and_source() {
    let rev = Revision::new(
        "rev1",
        "ed1",
        3,
        RevisionSource::Edit,
        "fb1",
        serde_json::json!({"body": "..."}),
        "tightened intro",
        DateTime::UNIX_EPOCH,
    );
    assert_eq!(rev.sequence, 3);
    assert_eq!(rev.source, RevisionSource::Edit);
}
