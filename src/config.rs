//! Process-level configuration, resolved once at startup from the
//! environment and the optional prompts file.

use std::path::{Path, PathBuf};

/// Application-level constants
pub const APP_NAME: &str = "Anamnese";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Chat-completion endpoint and model used for every generation.
pub const MISTRAL_ENDPOINT: &str = "https://api.mistral.ai/v1/chat/completions";
pub const MISTRAL_MODEL: &str = "mistral-small-latest";

/// Transcript file name inside the data directory.
pub const TRANSCRIPT_FILE: &str = "QR.txt";

const DEFAULT_PORT: u16 = 5000;

/// Runtime configuration shared by every handler.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port (`PORT`, default 5000 — hosting platforms inject this).
    pub port: u16,
    /// Mistral credential. `None` switches every model-backed operation
    /// into degraded local mode.
    pub api_key: Option<String>,
    /// Directory holding the transcript log (`ANAMNESE_DATA_DIR`).
    pub data_dir: PathBuf,
    /// Directory of static front-end assets (`ANAMNESE_FRONTEND_DIR`).
    pub frontend_dir: PathBuf,
    /// System prompt for interview question generation, from the prompts
    /// file when deployed (`ANAMNESE_PROMPTS_PATH`), else `None` and the
    /// built-in default applies.
    pub interview_prompt: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from the environment.
    pub fn from_env() -> Self {
        let api_key = std::env::var("MISTRAL_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        // Never log the key itself.
        if api_key.is_some() {
            tracing::info!("Mistral API key loaded");
        } else {
            tracing::warn!("No Mistral API key — running in degraded local mode");
        }

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_dir = std::env::var("ANAMNESE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let frontend_dir = std::env::var("ANAMNESE_FRONTEND_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("frontend"));

        let prompts_path = std::env::var("ANAMNESE_PROMPTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("prompts.txt"));
        let interview_prompt = load_prompt_file(&prompts_path);

        Self {
            port,
            api_key,
            data_dir,
            frontend_dir,
            interview_prompt,
        }
    }

    /// Full path of the transcript log file.
    pub fn transcript_path(&self) -> PathBuf {
        self.data_dir.join(TRANSCRIPT_FILE)
    }
}

/// Read the prompts file if deployed. Whitespace-only files count as absent.
fn load_prompt_file(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                tracing::info!(path = %path.display(), "Interview prompt loaded");
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}
