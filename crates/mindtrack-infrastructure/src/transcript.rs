//! Saving and sharing conversation transcripts.

use chrono::Utc;
use mindtrack_core::MindTrackError;
use mindtrack_core::chat::export::{render, render_text, transcript_file_name};
use mindtrack_core::chat::{ChatTurn, TranscriptFormat};
use mindtrack_core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the transcript into `directory` and returns the file path.
///
/// An existing file with the same name (same day, same format) is replaced.
pub fn save_transcript(
    turns: &[ChatTurn],
    format: TranscriptFormat,
    directory: &Path,
) -> Result<PathBuf> {
    if turns.is_empty() {
        return Err(MindTrackError::export("Nothing to save. Start a conversation first!"));
    }
    let now = Utc::now();
    let content = render(turns, format, now)?;

    fs::create_dir_all(directory).map_err(|e| {
        MindTrackError::export(format!("Cannot create {}: {}", directory.display(), e))
    })?;
    let path = directory.join(transcript_file_name(format, now.date_naive()));
    fs::write(&path, content)
        .map_err(|e| MindTrackError::export(format!("Cannot write {}: {}", path.display(), e)))?;

    tracing::info!("Saved {} transcript ({} turns) to {}", format, turns.len(), path.display());
    Ok(path)
}

/// Destination for shared transcripts.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| MindTrackError::clipboard(format!("Clipboard unavailable: {}", e)))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| MindTrackError::clipboard(format!("Failed to copy: {}", e)))
    }
}

/// Copies the text transcript to `clipboard`.
pub fn share_transcript(turns: &[ChatTurn], clipboard: &mut dyn Clipboard) -> Result<()> {
    if turns.is_empty() {
        return Err(MindTrackError::export("Nothing to share. Start a conversation first!"));
    }
    clipboard.set_text(&render_text(turns))?;
    tracing::info!("Copied transcript ({} turns) to clipboard", turns.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindtrack_core::chat::Conversation;
    use mindtrack_core::chat::TranscriptDocument;
    use tempfile::TempDir;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Option<String>,
    }

    impl Clipboard for MemoryClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn set_text(&mut self, _text: &str) -> Result<()> {
            Err(MindTrackError::clipboard("no display"))
        }
    }

    fn conversation() -> Conversation {
        let mut conversation = Conversation::new();
        conversation.push_user("I feel stressed");
        conversation.record_reply("I feel stressed", "Take a breath.");
        conversation
    }

    #[test]
    fn test_save_text() {
        let temp_dir = TempDir::new().unwrap();
        let conversation = conversation();

        let path =
            save_transcript(conversation.turns(), TranscriptFormat::Text, temp_dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("mindtrack-conversation-"));
        assert!(name.ends_with(".txt"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("You: I feel stressed"));
        assert!(content.contains("MindTrack AI: Take a breath."));
    }

    #[test]
    fn test_save_json_into_new_directory() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("exports");
        let conversation = conversation();

        let path = save_transcript(conversation.turns(), TranscriptFormat::Json, &target).unwrap();
        let document: TranscriptDocument =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(document.messages.len(), conversation.len());
    }

    #[test]
    fn test_empty_conversation_refused() {
        let temp_dir = TempDir::new().unwrap();

        let err = save_transcript(&[], TranscriptFormat::Text, temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("Nothing to save"));
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);

        let mut clipboard = MemoryClipboard::default();
        let err = share_transcript(&[], &mut clipboard).unwrap_err();
        assert!(err.to_string().contains("Nothing to share"));
        assert!(clipboard.contents.is_none());
    }

    #[test]
    fn test_share_copies_text_transcript() {
        let conversation = conversation();
        let mut clipboard = MemoryClipboard::default();

        share_transcript(conversation.turns(), &mut clipboard).unwrap();
        assert_eq!(clipboard.contents, Some(render_text(conversation.turns())));
    }

    #[test]
    fn test_clipboard_failure_is_reported() {
        let conversation = conversation();
        let err = share_transcript(conversation.turns(), &mut BrokenClipboard).unwrap_err();
        assert!(matches!(err, MindTrackError::Clipboard(_)));
    }
}
