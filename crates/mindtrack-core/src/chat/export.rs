//! Transcript export formats.

use super::turn::ChatTurn;
use crate::error::{MindTrackError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format of an exported conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptFormat {
    /// `"<Sender>: <content>"` per turn, blank-line separated.
    #[default]
    Text,
    /// `{ "messages": [...], "timestamp": "<ISO 8601>" }`.
    Json,
}

impl TranscriptFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TranscriptFormat::Text => "txt",
            TranscriptFormat::Json => "json",
        }
    }
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TranscriptFormat::Text => "text",
            TranscriptFormat::Json => "json",
        })
    }
}

impl FromStr for TranscriptFormat {
    type Err = MindTrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(TranscriptFormat::Text),
            "json" => Ok(TranscriptFormat::Json),
            other => Err(MindTrackError::invalid_input(format!(
                "unknown transcript format '{other}' (expected text or json)"
            ))),
        }
    }
}

/// JSON transcript document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptDocument {
    pub messages: Vec<ChatTurn>,
    pub timestamp: DateTime<Utc>,
}

/// Renders the text transcript.
pub fn render_text(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.sender.display_name(), turn.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders the JSON transcript stamped with `exported_at`.
pub fn render_json(turns: &[ChatTurn], exported_at: DateTime<Utc>) -> Result<String> {
    let document = TranscriptDocument {
        messages: turns.to_vec(),
        timestamp: exported_at,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Renders `turns` in `format`. Refuses an empty conversation.
pub fn render(
    turns: &[ChatTurn],
    format: TranscriptFormat,
    exported_at: DateTime<Utc>,
) -> Result<String> {
    if turns.is_empty() {
        return Err(MindTrackError::export(
            "Nothing to export. Start a conversation first!",
        ));
    }
    match format {
        TranscriptFormat::Text => Ok(render_text(turns)),
        TranscriptFormat::Json => render_json(turns, exported_at),
    }
}

/// File name used when saving, e.g. `mindtrack-conversation-2024-03-01.txt`.
pub fn transcript_file_name(format: TranscriptFormat, date: NaiveDate) -> String {
    format!(
        "mindtrack-conversation-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::turn::Sender;

    fn sample(n: usize) -> Vec<ChatTurn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ChatTurn::user(format!("message {i}"))
                } else {
                    ChatTurn::ai(format!("reply {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn test_text_has_one_non_empty_line_per_turn() {
        for n in [1, 2, 5, 12] {
            let text = render_text(&sample(n));
            let non_empty = text.lines().filter(|l| !l.trim().is_empty()).count();
            assert_eq!(non_empty, n);
        }
    }

    #[test]
    fn test_text_layout() {
        let text = render_text(&sample(2));
        assert_eq!(text, "You: message 0\n\nMindTrack AI: reply 1");
    }

    #[test]
    fn test_json_document() {
        let turns = sample(3);
        let json = render(&turns, TranscriptFormat::Json, Utc::now()).unwrap();
        let parsed: TranscriptDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.messages.len(), 3);
        assert_eq!(parsed.messages[0].sender, Sender::User);

        let raw: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(raw["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_empty_conversation_refused() {
        let err = render(&[], TranscriptFormat::Text, Utc::now()).unwrap_err();
        assert!(matches!(err, MindTrackError::Export(_)));
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            transcript_file_name(TranscriptFormat::Json, date),
            "mindtrack-conversation-2024-03-01.json"
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<TranscriptFormat>().unwrap(), TranscriptFormat::Json);
        assert_eq!("txt".parse::<TranscriptFormat>().unwrap(), TranscriptFormat::Text);
        assert!("pdf".parse::<TranscriptFormat>().is_err());
    }
}
