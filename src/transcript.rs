//! Append-only question/answer transcript.
//!
//! Every save request appends one timestamped session block to a flat
//! UTF-8 text file. The file is the storage — there is no index and no
//! rewrite path; the PDF export reads it back verbatim.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Shown in place of an answer left blank.
const EMPTY_ANSWER: &str = "(vide)";

/// Returned by [`read_all`] when no transcript exists yet.
const NO_DATA: &str = "Aucune donnée disponible (QR.txt inexistant).";

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One captured question/answer pair, as sent by the client.
///
/// The id is echoed into the block label and may be a number or a
/// string; missing fields degrade to placeholders rather than rejecting
/// the whole save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl QaPair {
    fn id_label(&self) -> String {
        match &self.id {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => "?".to_string(),
        }
    }
}

/// Append one session block.
///
/// The timestamp is client-supplied so the block lines up with what the
/// user saw; the caller substitutes the server clock when it is absent.
pub fn append_session(
    path: &Path,
    pairs: &[QaPair],
    timestamp: &str,
) -> Result<(), TranscriptError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut block = format!("=== Session @ {timestamp} ===\n");
    for pair in pairs {
        let id = pair.id_label();
        let question = flatten(pair.question.as_deref().unwrap_or(""));
        let answer = flatten(pair.answer.as_deref().unwrap_or(""));
        block.push_str(&format!("Q{id}: {question}\n"));
        if answer.is_empty() {
            block.push_str(&format!("R{id}: {EMPTY_ANSWER}\n"));
        } else {
            block.push_str(&format!("R{id}: {answer}\n"));
        }
    }
    block.push_str("---\n");

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(block.as_bytes())?;
    Ok(())
}

/// Whole transcript, trimmed; a fixed French line when none exists.
pub fn read_all(path: &Path) -> Result<String, TranscriptError> {
    if !path.is_file() {
        return Ok(NO_DATA.to_string());
    }
    let text = std::fs::read_to_string(path)?;
    Ok(text.trim().to_string())
}

/// Collapse embedded newlines so one pair stays on one line.
fn flatten(text: &str) -> String {
    text.replace(['\n', '\r'], " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(id: u32, question: &str, answer: &str) -> QaPair {
        QaPair {
            id: Some(serde_json::Value::from(id)),
            question: Some(question.to_string()),
            answer: Some(answer.to_string()),
        }
    }

    #[test]
    fn session_block_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QR.txt");

        let pairs = vec![
            pair(1, "Quel est votre objectif ?", "Réduire les délais"),
            pair(2, "Quel périmètre ?", ""),
        ];
        append_session(&path, &pairs, "2026-08-08T10:00:00Z").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "=== Session @ 2026-08-08T10:00:00Z ===\n\
             Q1: Quel est votre objectif ?\n\
             R1: Réduire les délais\n\
             Q2: Quel périmètre ?\n\
             R2: (vide)\n\
             ---\n"
        );
    }

    #[test]
    fn sessions_are_appended_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QR.txt");

        append_session(&path, &[pair(1, "Q", "A")], "t1").unwrap();
        append_session(&path, &[pair(1, "Q'", "A'")], "t2").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let first = text.find("=== Session @ t1 ===").unwrap();
        let second = text.find("=== Session @ t2 ===").unwrap();
        assert!(first < second);
        assert_eq!(text.matches("---").count(), 2);
    }

    #[test]
    fn newlines_are_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QR.txt");

        append_session(
            &path,
            &[pair(1, "Ligne une\nligne deux", "Oui\r\nnon")],
            "t",
        )
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Q1: Ligne une ligne deux\n"));
        assert!(text.contains("R1: Oui  non\n"));
    }

    #[test]
    fn missing_fields_degrade_to_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QR.txt");

        let bare = QaPair {
            id: None,
            question: None,
            answer: None,
        };
        append_session(&path, &[bare], "t").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Q?: \n"));
        assert!(text.contains("R?: (vide)\n"));
    }

    #[test]
    fn empty_pairs_still_write_a_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QR.txt");

        append_session(&path, &[], "2026-01-01T00:00:00Z").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "=== Session @ 2026-01-01T00:00:00Z ===\n---\n");
    }

    #[test]
    fn data_dir_is_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("QR.txt");

        append_session(&path, &[pair(1, "Q", "A")], "t").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn read_all_without_file_returns_no_data_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QR.txt");
        assert_eq!(read_all(&path).unwrap(), NO_DATA);
    }

    #[test]
    fn read_all_trims_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QR.txt");
        append_session(&path, &[pair(1, "Q", "A")], "t").unwrap();

        let text = read_all(&path).unwrap();
        assert!(text.starts_with("=== Session"));
        assert!(text.ends_with("---"));
    }

    #[test]
    fn string_ids_are_preserved() {
        let qa = QaPair {
            id: Some(serde_json::Value::from("a3")),
            question: Some("Q".into()),
            answer: Some("A".into()),
        };
        assert_eq!(qa.id_label(), "a3");
    }
}
