use super::*;

#[test]
fn defaults_unresolved_and_learning_enabled() {
    let feedback = Feedback::builder("f1", "ed1");
    assert!(!feedback.resolved);
    assert!(feedback.learn_from_feedback);
}

#[test]
fn partition_key_is_edition_id() {
    use crate::document::Document;
    let feedback = Feedback::builder("f1", "ed1");
    assert_eq!(feedback.partition_key(), "ed1");
}
