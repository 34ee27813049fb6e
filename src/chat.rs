use std::collections::VecDeque;

use serde::{Deserialize, Serialize};


pub const MAX_CHAT_MESSAGES: usize = 1000;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ChatParty {
    Myself,
    Participant(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ChatLine {
    pub sender: ChatParty,
    pub text: String,
}

// Inbound frame on the chat room socket. System notices ("[joined the room]") come in the same
// shape, authored by the user they are about.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IncomingChatMessage {
    pub author: String,
    pub content: String,
}

// The chat form field is named `chatm`; the server ignores everything else in the frame.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct OutgoingChatMessage {
    pub chatm: String,
}

#[derive(Clone, Debug)]
pub enum ChatError {
    MalformedMessage(String),
}

impl ChatLine {
    pub fn sender_label(&self) -> &str {
        match &self.sender {
            ChatParty::Myself => "me",
            ChatParty::Participant(name) => name,
        }
    }

    pub fn to_display_string(&self) -> String { format!("[{}]: {}", self.sender_label(), self.text) }
}

#[derive(Clone, Debug, Default)]
pub struct ChatHistory {
    lines: VecDeque<ChatLine>,
}

impl ChatHistory {
    pub fn new() -> Self { Self::default() }

    pub fn lines(&self) -> impl ExactSizeIterator<Item = &ChatLine> { self.lines.iter() }
    pub fn last(&self) -> Option<&ChatLine> { self.lines.back() }

    // Own messages are shown right away: the server does not echo them back.
    pub fn add_local(&mut self, text: &str) -> Option<OutgoingChatMessage> {
        if text.trim().is_empty() {
            return None;
        }
        self.push(ChatLine { sender: ChatParty::Myself, text: text.to_owned() });
        Some(OutgoingChatMessage { chatm: text.to_owned() })
    }

    pub fn add_incoming(&mut self, frame: &str) -> Result<ChatLine, ChatError> {
        let IncomingChatMessage { author, content } = serde_json::from_str(frame)
            .map_err(|err| ChatError::MalformedMessage(err.to_string()))?;
        let line = ChatLine { sender: ChatParty::Participant(author), text: content };
        self.push(line.clone());
        Ok(line)
    }

    fn push(&mut self, line: ChatLine) {
        self.lines.push_back(line);
        while self.lines.len() > MAX_CHAT_MESSAGES {
            self.lines.pop_front();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_and_remote_lines() {
        let mut chat = ChatHistory::new();
        let outgoing = chat.add_local("hi there").unwrap();
        assert_eq!(serde_json::to_string(&outgoing).unwrap(), r#"{"chatm":"hi there"}"#);
        let line = chat.add_incoming(r#"{"author": "u-42", "content": "hello"}"#).unwrap();
        assert_eq!(line.to_display_string(), "[u-42]: hello");
        let all = chat.lines().map(ChatLine::to_display_string).collect::<Vec<_>>();
        assert_eq!(all, vec!["[me]: hi there", "[u-42]: hello"]);
    }

    #[test]
    fn blank_local_message_is_not_sent() {
        let mut chat = ChatHistory::new();
        assert_eq!(chat.add_local("   "), None);
        assert_eq!(chat.lines().len(), 0);
    }

    #[test]
    fn malformed_incoming() {
        let mut chat = ChatHistory::new();
        assert!(chat.add_incoming(r#"{"author": "u"}"#).is_err());
        assert!(chat.last().is_none());
    }

    #[test]
    fn history_is_capped() {
        let mut chat = ChatHistory::new();
        for i in 0..MAX_CHAT_MESSAGES + 5 {
            chat.add_local(&i.to_string());
        }
        assert_eq!(chat.lines().len(), MAX_CHAT_MESSAGES);
        assert_eq!(chat.lines().next().unwrap().text, "5");
    }
}
