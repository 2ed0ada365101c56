//! Clinical coding suggestions.
//!
//! Turns free-text clinical notes into a structured coding proposal for
//! one of the three French schemes: CIM-10 (diagnoses), CCAM (acts) or
//! GHM (case groups). The model does the coding; this module owns the
//! scheme-specific instructions and the degraded-mode output.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::llm::{ChatRequest, LlmError, LlmProvider};

const CODING_TIMEOUT_SECS: u64 = 20;

/// Served when the model answers with an empty body.
const EMPTY_REPLY_FALLBACK: &str = "Aucun résultat renvoyé par le modèle.";

/// Classification schemes accepted by the coding endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodingScheme {
    Cim10,
    Ccam,
    Ghm,
}

impl CodingScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cim10 => "cim10",
            Self::Ccam => "ccam",
            Self::Ghm => "ghm",
        }
    }

    /// Uppercase label used in prompts and degraded output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cim10 => "CIM10",
            Self::Ccam => "CCAM",
            Self::Ghm => "GHM",
        }
    }
}

impl fmt::Display for CodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CodingScheme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cim10" => Ok(Self::Cim10),
            "ccam" => Ok(Self::Ccam),
            "ghm" => Ok(Self::Ghm),
            _ => Err(()),
        }
    }
}

/// Scheme-specific coder instructions. The three-part structure
/// (principal items, associated items, justification by excerpts) keeps
/// the model's output machine-displayable without post-processing.
fn instructions(scheme: CodingScheme) -> &'static str {
    match scheme {
        CodingScheme::Cim10 => {
            "Tu es un codeur médical. Fais le codage CIM-10 (diagnostics) strictement.\n\
             - Donne 3 parties: 1) Principaux codes (avec libellés), 2) Codes associés/secondaires, 3) Justification par extraits.\n\
             - Format: liste à puces, 'CODE — Libellé'.\n\
             - Ne crée pas de codes inexistants. Si ambigu, propose 2-3 alternatives plausibles avec conditions.\n\
             - Pas d'explications générales: uniquement le résultat structuré."
        }
        CodingScheme::Ccam => {
            "Tu es un codeur médical. Fais le codage CCAM (actes) strictement.\n\
             - Donne 3 parties: 1) Actes principaux (CODE — Libellé), 2) Actes associés, 3) Justification par extraits.\n\
             - Ajoute côté actes, si pertinent: latéralité, guidage imagerie, voie d'abord.\n\
             - Ne crée pas de codes inexistants. Si ambigu, alternatives plausibles + conditions."
        }
        CodingScheme::Ghm => {
            "Tu es un codeur médical. Propose le GHM le plus probable.\n\
             - Donne 3 parties: 1) GHM candidat(s) (CODE — Libellé), 2) Diagnostics/actes clés motivants, 3) Justification par extraits.\n\
             - Si l'information est insuffisante, indique précisément ce qu'il manque."
        }
    }
}

/// Ask the model for a coding suggestion. Low temperature — coding
/// should be close to deterministic.
pub async fn suggest_codes(
    llm: &dyn LlmProvider,
    scheme: CodingScheme,
    text: &str,
) -> Result<String, LlmError> {
    let request = ChatRequest {
        system: instructions(scheme).to_string(),
        user: format!("Texte clinique à coder ({}):\n\n{}", scheme.label(), text.trim()),
        temperature: 0.2,
        top_p: 0.9,
        max_tokens: 512,
        timeout: Duration::from_secs(CODING_TIMEOUT_SECS),
    };

    let content = llm.chat(&request).await?;
    tracing::debug!(provider = llm.name(), scheme = %scheme, chars = content.len(), "Coding reply received");

    if content.is_empty() {
        Ok(EMPTY_REPLY_FALLBACK.to_string())
    } else {
        Ok(content)
    }
}

/// Fixed sample block served when no API key is configured.
pub fn degraded_suggestion(scheme: CodingScheme) -> String {
    format!(
        "[MODE LOCAL] {} — exemple de sortie:\n\
         - CODE: XXX.XX — Libellé: Exemple\n\
         - Justification: Indices dans le texte.",
        scheme.label()
    )
}
