use super::*;

#[test]
fn tool_result_message_carries_the_call_id() {
    let msg = ChatMessage::tool_result("call-1", "{}");
    assert_eq!(msg.tool_call_id.as_deref(), Some("call-1"));
    assert_eq!(msg.role, ChatRole::Tool);
}

#[test]
fn system_and_user_messages_carry_no_call_id() {
    assert!(ChatMessage::system("be helpful").tool_call_id.is_none());
    assert!(ChatMessage::user("hello").tool_call_id.is_none());
}
