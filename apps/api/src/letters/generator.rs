//! Cover-letter generation — remote providers first, template last.
//!
//! Flow: build prompt → provider chain (A, then B on 402) → template letter.
//! `generate` never fails; the worst case is the template letter.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::letters::prompts::{
    ADDITIONAL_CONTEXT_HEADING, COVER_LETTER_REQUEST, COVER_LETTER_SYSTEM,
};
use crate::letters::template::render_letter;
use crate::llm_client::chain::ProviderChain;
use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;
use crate::llm_client::CompletionParams;
use crate::models::message::Message;

pub const GENERATION_PARAMS: CompletionParams = CompletionParams {
    temperature: 0.7,
    max_tokens: 1500,
};

/// Inputs for one generation. Constructed per call, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub job_description: String,
    pub resume: String,
    #[serde(default)]
    pub additional_context: Option<String>,
}

/// Which step of the chain produced a letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "provider", rename_all = "snake_case")]
pub enum LetterSource {
    Remote(String),
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLetter {
    pub text: String,
    pub source: LetterSource,
}

#[derive(Clone)]
pub struct CoverLetterGenerator {
    chain: ProviderChain,
}

impl CoverLetterGenerator {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }

    /// Produces a cover letter. Always returns usable text.
    pub async fn generate(&self, request: &GenerationRequest) -> GeneratedLetter {
        self.generate_on(request, Local::now().date_naive()).await
    }

    /// As `generate`, with the template dateline pinned to `today`.
    pub async fn generate_on(
        &self,
        request: &GenerationRequest,
        today: NaiveDate,
    ) -> GeneratedLetter {
        let messages = build_prompt(request);
        debug!(
            "Generation prompt: job_description={} chars, resume={} chars",
            request.job_description.len(),
            request.resume.len()
        );

        if let Some(reply) = self.chain.complete(&messages, GENERATION_PARAMS).await {
            info!("Cover letter generated by provider '{}'", reply.provider);
            return GeneratedLetter {
                text: reply.text,
                source: LetterSource::Remote(reply.provider),
            };
        }

        info!("Remote providers unavailable, using template letter");
        GeneratedLetter {
            text: render_letter(&request.job_description, &request.resume, today),
            source: LetterSource::Template,
        }
    }
}

/// System instruction plus a user turn embedding the job description, the
/// resume, and any non-blank additional context.
pub fn build_prompt(request: &GenerationRequest) -> Vec<Message> {
    let additional_context = request
        .additional_context
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| format!("\n\n{ADDITIONAL_CONTEXT_HEADING}\n{c}"))
        .unwrap_or_default();

    let prompt = format!(
        "{COVER_LETTER_REQUEST}\n\nJOB DESCRIPTION:\n{}\n\nMY RESUME:\n{}{additional_context}",
        request.job_description, request.resume
    );

    vec![
        Message::system(format!("{COVER_LETTER_SYSTEM} {PLAIN_TEXT_INSTRUCTION}")),
        Message::user(prompt),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::chain::testing::ScriptedProvider;
    use crate::models::message::Role;

    const RESUME: &str = "Jane Doe\nSKILLS: Python, Go, SQL\nEXPERIENCE:\nBuilt X\nShipped Y";
    const JOB: &str = "We are hiring for Backend Engineer at Acme Corp.";

    fn request(additional_context: Option<&str>) -> GenerationRequest {
        GenerationRequest {
            job_description: JOB.to_string(),
            resume: RESUME.to_string(),
            additional_context: additional_context.map(str::to_string),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_prompt_has_system_and_user_turns() {
        let messages = build_prompt(&request(None));

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains(&format!("JOB DESCRIPTION:\n{JOB}")));
        assert!(messages[1].content.contains(&format!("MY RESUME:\n{RESUME}")));
        assert!(!messages[1].content.contains(ADDITIONAL_CONTEXT_HEADING));
    }

    #[test]
    fn test_prompt_appends_additional_context_section() {
        let messages = build_prompt(&request(Some("  Relocating to Berlin in May.  ")));
        assert!(messages[1]
            .content
            .ends_with("ADDITIONAL INFORMATION:\nRelocating to Berlin in May."));
    }

    #[test]
    fn test_prompt_skips_blank_additional_context() {
        let messages = build_prompt(&request(Some("   ")));
        assert!(!messages[1].content.contains(ADDITIONAL_CONTEXT_HEADING));
    }

    #[tokio::test]
    async fn test_primary_reply_returned_verbatim() {
        let a = ScriptedProvider::replying("deepseek", "  Dear Acme,\n\nHire me.  ");
        let b = ScriptedProvider::replying("openai", "from b");
        let generator =
            CoverLetterGenerator::new(ProviderChain::primary_with_secondary(a, b.clone()));

        let letter = generator.generate_on(&request(None), today()).await;

        assert_eq!(letter.text, "  Dear Acme,\n\nHire me.  ");
        assert_eq!(letter.source, LetterSource::Remote("deepseek".to_string()));
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test]
    async fn test_payment_required_uses_secondary_not_template() {
        let a = ScriptedProvider::failing("deepseek", 402);
        let b = ScriptedProvider::replying("openai", "Letter from provider B");
        let generator =
            CoverLetterGenerator::new(ProviderChain::primary_with_secondary(a, b.clone()));

        let letter = generator.generate_on(&request(None), today()).await;

        assert_eq!(letter.text, "Letter from provider B");
        assert_eq!(b.calls(), 1);
    }

    #[tokio::test]
    async fn test_server_error_goes_straight_to_template() {
        let a = ScriptedProvider::failing("deepseek", 500);
        let b = ScriptedProvider::replying("openai", "Letter from provider B");
        let chain = ProviderChain::primary_with_secondary(a.clone(), b.clone());
        let generator = CoverLetterGenerator::new(chain);

        let letter = generator.generate_on(&request(None), today()).await;

        assert_eq!(letter.source, LetterSource::Template);
        assert_eq!(letter.text, render_letter(JOB, RESUME, today()));
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test]
    async fn test_both_providers_failing_yields_template() {
        let a = ScriptedProvider::failing("deepseek", 402);
        let b = ScriptedProvider::failing("openai", 503);
        let generator = CoverLetterGenerator::new(ProviderChain::primary_with_secondary(a, b));

        let letter = generator.generate_on(&request(None), today()).await;

        assert_eq!(letter.source, LetterSource::Template);
        assert!(letter.text.contains("Backend Engineer"));
    }

    #[tokio::test]
    async fn test_empty_inputs_still_produce_letter() {
        let generator = CoverLetterGenerator::new(ProviderChain::builder().build());
        let empty = GenerationRequest {
            job_description: String::new(),
            resume: String::new(),
            additional_context: None,
        };

        let letter = generator.generate(&empty).await;

        assert!(!letter.text.trim().is_empty());
        assert!(letter.text.contains("your company"));
    }

    #[test]
    fn test_letter_source_serializes_with_provider() {
        let json = serde_json::to_value(LetterSource::Remote("openai".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "remote", "provider": "openai"}));
        let json = serde_json::to_value(LetterSource::Template).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "template"}));
    }
}
