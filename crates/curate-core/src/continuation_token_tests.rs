use super::*;

#[test]
fn id_for_matches_spec_format() {
    assert_eq!(ContinuationToken::id_for("links"), "change-feed-token-links");
}

#[test]
fn new_derives_id_from_container() {
    let token = ContinuationToken::new("feedback", "abc123", DateTime::UNIX_EPOCH);
    assert_eq!(token.id, "change-feed-token-feedback");
}
