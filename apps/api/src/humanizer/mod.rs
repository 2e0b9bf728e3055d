//! Two-tier text humanizer.
//!
//! With credentials configured, text goes to the hosted rewriting API;
//! any failure there falls back to a local pass of lexical substitutions.
//! Without credentials the local pass runs directly, so [`HumanizerClient::humanize`]
//! is total: it always returns text and never surfaces an error.

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::store::settings::SettingsStore;

pub const DEFAULT_HUMANIZER_URL: &str = "https://v2-humanizer.rephrasy.ai/api";

// Formal connectives swapped for casual variants. Case-sensitive and
// anchored to the trailing comma so mid-sentence uses stay untouched.
const CONNECTIVE_SWAPS: &[(&str, &[&str])] = &[
    (r"\bHowever,", &["But", "That said,", "Still,", "However,"]),
    (
        r"\bFurthermore,",
        &["Also,", "Plus,", "What's more,", "Additionally,"],
    ),
    (
        r"\bAdditionally,",
        &["Also,", "On top of that,", "Besides this,", "Plus,"],
    ),
    (
        r"\bMoreover,",
        &["Also,", "What's more,", "On top of that,", "Plus,"],
    ),
    (
        r"\bTherefore,",
        &["So,", "This means", "Because of this,", "As a result,"],
    ),
    (
        r"\bConsequently,",
        &["So,", "As a result,", "This leads to", "Because of this,"],
    ),
    (
        r"\bNevertheless,",
        &["Still,", "Even so,", "That said,", "But still,"],
    ),
];

// AI-typical framing phrases, matched case-insensitively.
const PHRASE_SWAPS: &[(&str, &[&str])] = &[
    (
        r"(?i)\bIt is important to note that",
        &[
            "Keep in mind that",
            "Remember that",
            "Note that",
            "Just know that",
        ],
    ),
    (
        r"(?i)\bIt is worth mentioning",
        &[
            "It's worth noting",
            "You should know",
            "Here's something important:",
            "Worth mentioning:",
        ],
    ),
    (
        r"(?i)\bIn conclusion,",
        &["To wrap up,", "All in all,", "At the end of the day,", "So,"],
    ),
    (
        r"(?i)\bTo summarize,",
        &["In short,", "Basically,", "The bottom line is", "To sum it up,"],
    ),
    (
        r"(?i)\bIn summary,",
        &["To wrap up,", "Long story short,", "Basically,", "So,"],
    ),
];

// Verbose words simplified; single-option entries are unconditional.
const WORD_SWAPS: &[(&str, &[&str])] = &[
    (r"(?i)\butilize\b", &["use"]),
    (r"(?i)\bcommence\b", &["start"]),
    (r"(?i)\bterminate\b", &["end"]),
    (r"(?i)\bfacilitate\b", &["help"]),
    (
        r"(?i)\bimplement\b",
        &["set up", "put in place", "use", "apply"],
    ),
    (
        r"(?i)\bleverage\b",
        &["use", "take advantage of", "make the most of"],
    ),
];

// Contraction sites: each match contracts when the roll lands above the
// keep threshold, so runs of formal text end up only partially contracted.
const CONTRACTIONS: &[(&str, &str, f64)] = &[
    (r"(?i)\bdo not\b", "don't", 0.3),
    (r"(?i)\bcannot\b", "can't", 0.3),
    (r"(?i)\bwill not\b", "won't", 0.3),
    (r"(?i)\bit is\b", "it's", 0.4),
    (r"(?i)\bthat is\b", "that's", 0.4),
    (r"(?i)\bwe have\b", "we've", 0.4),
    (r"(?i)\byou will\b", "you'll", 0.4),
];

#[derive(Debug, Error)]
enum HumanizerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Api(String),
}

#[derive(Debug, Serialize)]
struct HumanizeRequest<'a> {
    text: &'a str,
    model: &'a str,
    style: &'a str,
    words: bool,
    costs: bool,
    language: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HumanizeResponse {
    output: Option<String>,
    new_flesch_score: Option<f64>,
}

struct Swap {
    pattern: Regex,
    options: &'static [&'static str],
}

struct ContractionRule {
    pattern: Regex,
    contraction: &'static str,
    keep_threshold: f64,
}

#[derive(Clone)]
pub struct HumanizerClient {
    client: Client,
    settings: SettingsStore,
    rules: std::sync::Arc<LocalRules>,
}

struct LocalRules {
    swaps: Vec<Swap>,
    contractions: Vec<ContractionRule>,
}

impl LocalRules {
    fn compile() -> Self {
        let swaps = CONNECTIVE_SWAPS
            .iter()
            .chain(PHRASE_SWAPS)
            .chain(WORD_SWAPS)
            .map(|&(pattern, options)| Swap {
                pattern: Regex::new(pattern).expect("Failed to compile humanizer pattern"),
                options,
            })
            .collect();
        let contractions = CONTRACTIONS
            .iter()
            .map(|&(pattern, contraction, keep_threshold)| ContractionRule {
                pattern: Regex::new(pattern).expect("Failed to compile humanizer pattern"),
                contraction,
                keep_threshold,
            })
            .collect();
        LocalRules {
            swaps,
            contractions,
        }
    }
}

impl HumanizerClient {
    pub fn new(settings: SettingsStore) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            settings,
            rules: std::sync::Arc::new(LocalRules::compile()),
        }
    }

    /// Rewrites text to read less machine-generated. Always returns text:
    /// remote failures degrade to the local substitution pass.
    pub async fn humanize(&self, text: &str) -> String {
        let settings = self.settings.effective().await;
        if settings.humanizer_api_key.is_empty() {
            debug!("No humanizer API key configured, applying local transformations");
            return self.apply_local(text);
        }

        match self
            .call_remote(
                &settings.humanizer_api_key,
                &settings.humanizer_api_url,
                text,
            )
            .await
        {
            Ok(output) => output,
            Err(e) => {
                warn!("Humanizer API call failed: {e}; falling back to local transformations");
                self.apply_local(text)
            }
        }
    }

    async fn call_remote(
        &self,
        api_key: &str,
        api_url: &str,
        text: &str,
    ) -> Result<String, HumanizerError> {
        let url = if api_url.is_empty() {
            DEFAULT_HUMANIZER_URL
        } else {
            api_url
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&HumanizeRequest {
                text,
                model: "v3",
                style: "professional",
                words: true,
                costs: true,
                language: "English",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match status.as_u16() {
                401 => "Invalid Rephrasy API key. Please check your settings.".to_string(),
                422 => "Invalid request parameters for Rephrasy API.".to_string(),
                s => format!("Humanizer API error: {s} - {body}"),
            };
            return Err(HumanizerError::Api(message));
        }

        let data: HumanizeResponse = response.json().await?;
        if let Some(score) = data.new_flesch_score {
            info!("Humanizer succeeded, Flesch score {score}");
        }

        // An empty rewrite means the API had nothing for us; keep the input.
        Ok(match data.output {
            Some(output) if !output.is_empty() => output,
            _ => text.to_string(),
        })
    }

    fn apply_local(&self, text: &str) -> String {
        let mut rng = rand::thread_rng();
        let mut out = text.to_string();

        for swap in &self.rules.swaps {
            out = swap
                .pattern
                .replace_all(&out, |caps: &regex::Captures| {
                    match swap.options.choose(&mut rng) {
                        Some(option) => (*option).to_string(),
                        None => caps[0].to_string(),
                    }
                })
                .into_owned();
        }

        for rule in &self.rules.contractions {
            out = rule
                .pattern
                .replace_all(&out, |caps: &regex::Captures| {
                    if rng.gen::<f64>() > rule.keep_threshold {
                        rule.contraction.to_string()
                    } else {
                        caps[0].to_string()
                    }
                })
                .into_owned();
        }

        out
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
