use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Text {
        conversation_id: String,
        text: String,
    },
    File {
        conversation_id: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

impl InboundEvent {
    pub fn text(conversation_id: impl Into<String>, text: impl Into<String>) -> Self {
        InboundEvent::Text {
            conversation_id: conversation_id.into(),
            text: text.into(),
        }
    }

    pub fn file(
        conversation_id: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        InboundEvent::File {
            conversation_id: conversation_id.into(),
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn conversation_id(&self) -> &str {
        match self {
            InboundEvent::Text {
                conversation_id, ..
            }
            | InboundEvent::File {
                conversation_id, ..
            } => conversation_id,
        }
    }
}

/// Choices presented alongside a message, one inner vec per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "rows", rename_all = "snake_case")]
pub enum ChoiceSet {
    Remove,
    Options(Vec<Vec<String>>),
}

impl ChoiceSet {
    pub fn rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ChoiceSet::Options(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn column<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ChoiceSet::Options(labels.into_iter().map(|l| vec![l.into()]).collect())
    }

    pub fn labels(&self) -> Vec<&str> {
        match self {
            ChoiceSet::Remove => Vec::new(),
            ChoiceSet::Options(rows) => rows.iter().flatten().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEffect {
    SendText { message: String, choices: ChoiceSet },
    SendFile { file_name: String, bytes: Vec<u8> },
}

impl OutboundEffect {
    pub fn text(message: impl Into<String>, choices: ChoiceSet) -> Self {
        OutboundEffect::SendText {
            message: message.into(),
            choices,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            OutboundEffect::SendText { message, .. } => Some(message),
            OutboundEffect::SendFile { .. } => None,
        }
    }
}
