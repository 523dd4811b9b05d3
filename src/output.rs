use std::fmt::Write;
use stepgraph_core::{Message, MessagesState};

/// One transcript entry: the role label on its own line, then the content
pub fn render_message(message: &Message) -> String {
    format!("{}:\n{}", message.role(), message.text_content())
}

/// Every message of a finished run, in order
pub fn render_transcript(state: &MessagesState) -> String {
    let mut out = String::new();
    for message in state.messages() {
        let _ = writeln!(out, "{}", render_message(message));
    }
    out
}
