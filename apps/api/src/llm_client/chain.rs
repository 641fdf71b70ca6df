//! Provider chain — ordered remote tiers with per-tier admission rules.
//!
//! Tiers are consulted in order. The first tier always runs; each later tier
//! runs only if its admission rule accepts the previous tier's failure. The
//! chain stops at the first success or the first refused admission and
//! reports which tier answered. The local, always-succeeding fallback is the
//! caller's terminal step.

use std::sync::Arc;

use tracing::{info, warn};

use crate::llm_client::{ChatProvider, CompletionParams, LlmError};
use crate::models::message::Message;

/// When a tier is allowed to run after the previous tier failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Runs unconditionally (used for the first tier).
    Always,
    /// Runs only when the previous tier failed with HTTP 402.
    AfterPaymentRequired,
}

impl Admission {
    fn admits(self, previous: Option<&LlmError>) -> bool {
        match (self, previous) {
            (Admission::Always, _) => true,
            (Admission::AfterPaymentRequired, Some(err)) => err.is_payment_required(),
            (Admission::AfterPaymentRequired, None) => false,
        }
    }
}

pub struct Tier {
    provider: Arc<dyn ChatProvider>,
    admission: Admission,
}

/// Text produced by a remote tier, tagged with the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReply {
    pub provider: String,
    pub text: String,
}

#[derive(Clone)]
pub struct ProviderChain {
    tiers: Arc<Vec<Tier>>,
}

impl ProviderChain {
    pub fn builder() -> ProviderChainBuilder {
        ProviderChainBuilder { tiers: Vec::new() }
    }

    /// Provider A, then provider B only on payment required.
    pub fn primary_with_secondary(
        primary: Arc<dyn ChatProvider>,
        secondary: Arc<dyn ChatProvider>,
    ) -> Self {
        Self::builder()
            .tier(primary, Admission::Always)
            .tier(secondary, Admission::AfterPaymentRequired)
            .build()
    }

    /// Walks the tiers. Each provider is called at most once. Returns `None`
    /// when no remote tier produced text; errors never escape.
    pub async fn complete(
        &self,
        messages: &[Message],
        params: CompletionParams,
    ) -> Option<ChainReply> {
        let mut last_error: Option<LlmError> = None;

        for (index, tier) in self.tiers.iter().enumerate() {
            if !tier.admission.admits(last_error.as_ref()) {
                break;
            }
            if index > 0 {
                info!("Falling back to provider '{}'", tier.provider.name());
            }

            match tier.provider.complete(messages, params).await {
                Ok(text) if !text.trim().is_empty() => {
                    return Some(ChainReply {
                        provider: tier.provider.name().to_string(),
                        text,
                    });
                }
                Ok(_) => {
                    warn!("Provider '{}' returned blank content", tier.provider.name());
                    last_error = Some(LlmError::EmptyContent);
                }
                Err(e) => {
                    warn!("Provider '{}' failed: {e}", tier.provider.name());
                    last_error = Some(e);
                }
            }
        }

        None
    }
}

pub struct ProviderChainBuilder {
    tiers: Vec<Tier>,
}

impl ProviderChainBuilder {
    pub fn tier(mut self, provider: Arc<dyn ChatProvider>, admission: Admission) -> Self {
        self.tiers.push(Tier {
            provider,
            admission,
        });
        self
    }

    pub fn build(self) -> ProviderChain {
        ProviderChain {
            tiers: Arc::new(self.tiers),
        }
    }
}

/// In-memory providers for exercising the chain without a network.
#[cfg(test)]
pub mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::llm_client::{ChatProvider, CompletionParams, LlmError};
    use crate::models::message::Message;

    enum Script {
        Reply(String),
        Status(u16),
    }

    /// Returns the same scripted outcome on every call and counts calls.
    pub struct ScriptedProvider {
        name: String,
        script: Script,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        pub fn replying(name: &str, text: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                script: Script::Reply(text.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        pub fn failing(name: &str, status: u16) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                script: Script::Status(status),
                calls: AtomicUsize::new(0),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatProvider for ScriptedProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn complete(
            &self,
            _messages: &[Message],
            _params: CompletionParams,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::Reply(text) => Ok(text.clone()),
                Script::Status(status) => Err(LlmError::Api {
                    status: *status,
                    message: "scripted failure".to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedProvider;
    use super::*;

    const PARAMS: CompletionParams = CompletionParams {
        temperature: 0.7,
        max_tokens: 1000,
    };

    fn prompt() -> Vec<Message> {
        vec![Message::system("be helpful"), Message::user("write it")]
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let a = ScriptedProvider::replying("a", "from a");
        let b = ScriptedProvider::replying("b", "from b");
        let chain = ProviderChain::primary_with_secondary(a.clone(), b.clone());

        let reply = chain.complete(&prompt(), PARAMS).await.unwrap();

        assert_eq!(reply.text, "from a");
        assert_eq!(reply.provider, "a");
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test]
    async fn test_payment_required_admits_secondary() {
        let a = ScriptedProvider::failing("a", 402);
        let b = ScriptedProvider::replying("b", "from b");
        let chain = ProviderChain::primary_with_secondary(a.clone(), b.clone());

        let reply = chain.complete(&prompt(), PARAMS).await.unwrap();

        assert_eq!(reply.text, "from b");
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
    }

    #[tokio::test]
    async fn test_server_error_does_not_admit_secondary() {
        let a = ScriptedProvider::failing("a", 500);
        let b = ScriptedProvider::replying("b", "from b");
        let chain = ProviderChain::primary_with_secondary(a.clone(), b.clone());

        assert!(chain.complete(&prompt(), PARAMS).await.is_none());
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test]
    async fn test_rate_limit_does_not_admit_secondary() {
        let a = ScriptedProvider::failing("a", 429);
        let b = ScriptedProvider::replying("b", "from b");
        let chain = ProviderChain::primary_with_secondary(a, b.clone());

        assert!(chain.complete(&prompt(), PARAMS).await.is_none());
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test]
    async fn test_secondary_failure_exhausts_chain() {
        let a = ScriptedProvider::failing("a", 402);
        let b = ScriptedProvider::failing("b", 402);
        let chain = ProviderChain::primary_with_secondary(a.clone(), b.clone());

        assert!(chain.complete(&prompt(), PARAMS).await.is_none());
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_primary_reply_is_failure_but_not_402() {
        let a = ScriptedProvider::replying("a", "  \n ");
        let b = ScriptedProvider::replying("b", "from b");
        let chain = ProviderChain::primary_with_secondary(a, b.clone());

        assert!(chain.complete(&prompt(), PARAMS).await.is_none());
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_chain_yields_none() {
        let chain = ProviderChain::builder().build();
        assert!(chain.complete(&prompt(), PARAMS).await.is_none());
    }

    #[test]
    fn test_payment_required_admission_needs_a_failure() {
        assert!(!Admission::AfterPaymentRequired.admits(None));
        assert!(Admission::Always.admits(None));
        assert!(Admission::Always.admits(Some(&LlmError::EmptyContent)));
    }
}
