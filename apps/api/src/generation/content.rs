//! Content generation operations: title, body, meta description and tags.
//!
//! The trait seam exists so the scheduler and handlers can be exercised
//! without outbound calls; production wires [`OpenAiGenerator`].

use async_trait::async_trait;

use crate::errors::AppError;
use crate::generation::prompts;
use crate::llm_client::OpenAiClient;
use crate::store::settings::SettingsStore;

const CONTENT_MAX_TOKENS: u32 = 2000;
const CONTENT_TEMPERATURE: f32 = 0.7;
const TITLE_MAX_TOKENS: u32 = 100;
const TITLE_TEMPERATURE: f32 = 0.8;
const META_MAX_TOKENS: u32 = 100;
const META_TEMPERATURE: f32 = 0.7;
const TAGS_MAX_TOKENS: u32 = 100;
const TAGS_TEMPERATURE: f32 = 0.5;

const EXCERPT_CHARS: usize = 500;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Full Markdown blog post for a keyword, ending in the configured CTA.
    async fn generate_content(
        &self,
        keyword: &str,
        additional_context: &str,
    ) -> Result<String, AppError>;

    /// A single SEO title, stripped of wrapping quotes.
    async fn generate_title(&self, keyword: &str) -> Result<String, AppError>;

    /// A 150-160 character meta description from the title and an excerpt.
    async fn generate_meta_description(
        &self,
        title: &str,
        content: &str,
    ) -> Result<String, AppError>;

    /// 3-5 categorization tags; falls back to a static set when the model
    /// answer is not a JSON string array.
    async fn generate_tags(&self, content: &str, keyword: &str) -> Result<Vec<String>, AppError>;
}

pub struct OpenAiGenerator {
    llm: OpenAiClient,
    settings: SettingsStore,
}

impl OpenAiGenerator {
    pub fn new(llm: OpenAiClient, settings: SettingsStore) -> Self {
        Self { llm, settings }
    }
}

#[async_trait]
impl ContentGenerator for OpenAiGenerator {
    async fn generate_content(
        &self,
        keyword: &str,
        additional_context: &str,
    ) -> Result<String, AppError> {
        let settings = self.settings.get().await;
        let context_line = if additional_context.is_empty() {
            String::new()
        } else {
            format!("Additional context: {additional_context}")
        };
        let prompt = prompts::CONTENT_PROMPT_TEMPLATE
            .replace("{keyword}", keyword)
            .replace("{context_line}", &context_line)
            .replace("{cta}", &settings.default_cta);

        let content = self
            .llm
            .chat(
                prompts::CONTENT_SYSTEM,
                &prompt,
                CONTENT_MAX_TOKENS,
                CONTENT_TEMPERATURE,
            )
            .await?;
        Ok(content)
    }

    async fn generate_title(&self, keyword: &str) -> Result<String, AppError> {
        let prompt = prompts::TITLE_PROMPT_TEMPLATE.replace("{keyword}", keyword);
        let title = self
            .llm
            .chat(
                prompts::TITLE_SYSTEM,
                &prompt,
                TITLE_MAX_TOKENS,
                TITLE_TEMPERATURE,
            )
            .await?;
        Ok(strip_wrapping_quotes(title.trim()).to_string())
    }

    async fn generate_meta_description(
        &self,
        title: &str,
        content: &str,
    ) -> Result<String, AppError> {
        let prompt = prompts::META_PROMPT_TEMPLATE
            .replace("{title}", title)
            .replace("{excerpt}", &excerpt(content, EXCERPT_CHARS));
        let meta = self
            .llm
            .chat(
                prompts::META_SYSTEM,
                &prompt,
                META_MAX_TOKENS,
                META_TEMPERATURE,
            )
            .await?;
        Ok(strip_wrapping_quotes(meta.trim()).to_string())
    }

    async fn generate_tags(&self, content: &str, keyword: &str) -> Result<Vec<String>, AppError> {
        let prompt = prompts::TAGS_PROMPT_TEMPLATE
            .replace("{keyword}", keyword)
            .replace("{excerpt}", &excerpt(content, EXCERPT_CHARS));
        let answer = self
            .llm
            .chat(
                prompts::TAGS_SYSTEM,
                &prompt,
                TAGS_MAX_TOKENS,
                TAGS_TEMPERATURE,
            )
            .await?;
        Ok(parse_tags(&answer).unwrap_or_else(|| fallback_tags(keyword)))
    }
}

/// Static tags used whenever the model does not return a parseable array.
pub fn fallback_tags(keyword: &str) -> Vec<String> {
    vec![
        keyword.to_string(),
        "Business Registration".to_string(),
        "Indian Startups".to_string(),
    ]
}

fn parse_tags(answer: &str) -> Option<Vec<String>> {
    serde_json::from_str::<Vec<String>>(answer.trim()).ok()
}

/// Removes one wrapping quote character from each end, the way models
/// like to quote short answers.
fn strip_wrapping_quotes(text: &str) -> &str {
    let text = text
        .strip_prefix('"')
        .or_else(|| text.strip_prefix('\''))
        .unwrap_or(text);
    text.strip_suffix('"')
        .or_else(|| text.strip_suffix('\''))
        .unwrap_or(text)
}

fn excerpt(content: &str, max_chars: usize) -> String {
    content.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_wrapping_quotes_double() {
        assert_eq!(
            strip_wrapping_quotes("\"GST Registration in 2025\""),
            "GST Registration in 2025"
        );
    }

    #[test]
    fn test_strip_wrapping_quotes_single() {
        assert_eq!(strip_wrapping_quotes("'Company Setup'"), "Company Setup");
    }

    #[test]
    fn test_strip_wrapping_quotes_mixed_and_partial() {
        assert_eq!(strip_wrapping_quotes("\"Trademark Basics'"), "Trademark Basics");
        assert_eq!(strip_wrapping_quotes("\"Leading quote only"), "Leading quote only");
    }

    #[test]
    fn test_strip_wrapping_quotes_keeps_inner_quotes() {
        assert_eq!(
            strip_wrapping_quotes("Why \"Private Limited\" wins"),
            "Why \"Private Limited\" wins"
        );
    }

    #[test]
    fn test_parse_tags_valid_array() {
        let tags = parse_tags(r#"["GST", "Taxation", "Compliance"]"#).unwrap();
        assert_eq!(tags, vec!["GST", "Taxation", "Compliance"]);
    }

    #[test]
    fn test_parse_tags_rejects_non_array() {
        assert!(parse_tags("Here are your tags: GST, Taxation").is_none());
        assert!(parse_tags(r#"{"tags": ["GST"]}"#).is_none());
        assert!(parse_tags("```json\n[\"GST\"]\n```").is_none());
    }

    #[test]
    fn test_fallback_tags_include_keyword() {
        let tags = fallback_tags("GST registration");
        assert_eq!(tags[0], "GST registration");
        assert!(tags.contains(&"Business Registration".to_string()));
        assert!(tags.contains(&"Indian Startups".to_string()));
    }

    #[test]
    fn test_excerpt_caps_length() {
        let long = "a".repeat(600);
        assert_eq!(excerpt(&long, EXCERPT_CHARS).len(), 500);
        assert_eq!(excerpt("short", EXCERPT_CHARS), "short");
    }

    #[test]
    fn test_content_prompt_interpolation() {
        let prompt = prompts::CONTENT_PROMPT_TEMPLATE
            .replace("{keyword}", "GST registration")
            .replace("{context_line}", "Additional context: focus on e-commerce")
            .replace("{cta}", "Visit us today!");

        assert!(prompt.contains("\"GST registration\""));
        assert!(prompt.contains("Additional context: focus on e-commerce"));
        assert!(prompt.contains("End with this CTA: \"Visit us today!\""));
        assert!(!prompt.contains('{'));
    }
}
