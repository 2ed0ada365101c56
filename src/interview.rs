//! Interview question generation.
//!
//! Builds the anti-repetition prompt from previously asked questions,
//! calls the model, and cleans the reply down to a single question.
//! Without an API key the module answers from fixed French fallbacks
//! so an interview can still proceed offline.

use std::time::Duration;

use crate::llm::{ChatRequest, LlmError, LlmProvider};

/// System prompt used when no prompts file is deployed.
pub const DEFAULT_SYSTEM_PROMPT: &str = "Tu es un générateur de questions concises pour un \
     entretien. Pose UNE seule question pertinente à la fois, sans préambule.";

/// Degraded-mode question, and the alternate served when the client
/// reports the first one was already asked.
const LOCAL_BASE_QUESTION: &str = "Pouvez-vous préciser votre objectif principal ?";
const LOCAL_ALTERNATE_QUESTION: &str = "Quel résultat concret voulez-vous obtenir en premier ?";

/// Served when the model replies with nothing usable.
const EMPTY_REPLY_FALLBACK: &str = "Pouvez-vous développer votre contexte ?";

/// Served with a warning when the model cannot be reached at all.
pub const RESCUE_QUESTION: &str = "Quelle est la priorité n°1 de votre projet ?";

const QUESTION_TIMEOUT_SECS: u64 = 15;

/// Generate one interview question, avoiding the questions already asked.
pub async fn generate_question(
    llm: &dyn LlmProvider,
    system_prompt: Option<&str>,
    previous: &[String],
) -> Result<String, LlmError> {
    let request = ChatRequest {
        system: system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT).to_string(),
        user: build_user_prompt(previous),
        temperature: 0.8,
        top_p: 0.9,
        max_tokens: 64,
        timeout: Duration::from_secs(QUESTION_TIMEOUT_SECS),
    };

    let content = llm.chat(&request).await?;
    tracing::debug!(provider = llm.name(), chars = content.len(), "Question reply received");

    Ok(first_usable_line(&content).unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string()))
}

/// Offline question selection. Never repeats the base question twice in
/// a row when the client reports it was already asked.
pub fn degraded_question(previous: &[String]) -> String {
    if previous.iter().any(|q| q == LOCAL_BASE_QUESTION) {
        LOCAL_ALTERNATE_QUESTION.to_string()
    } else {
        LOCAL_BASE_QUESTION.to_string()
    }
}

/// Base instruction plus the already-asked block and the diversity
/// constraints (new angle, single sentence, 5–18 words).
fn build_user_prompt(previous: &[String]) -> String {
    let mut prompt = String::from("Génère UNE question.");

    let asked: Vec<&str> = previous
        .iter()
        .map(|q| q.trim())
        .filter(|q| !q.is_empty())
        .collect();
    if !asked.is_empty() {
        prompt.push_str("\n\nQuestions déjà posées (à NE PAS répéter ni paraphraser):\n");
        for question in asked {
            prompt.push_str("- ");
            prompt.push_str(question);
            prompt.push('\n');
        }
    }

    prompt.push_str(
        "\n\nContraintes:\n\
         - Propose une question NOUVELLE, couvrant un angle non traité.\n\
         - Une seule phrase. Pas de préambule. 5–18 mots.\n",
    );
    prompt
}

/// First non-empty line, stripped of surrounding whitespace, bullets,
/// dashes and colons.
fn first_usable_line(content: &str) -> Option<String> {
    content
        .lines()
        .map(|line| line.trim_matches(|c: char| matches!(c, ' ' | '\t' | '-' | '–' | '—' | '•' | ':')))
        .find(|line| !line.is_empty())
        .map(|line| line.to_string())
}
