//! Conversational revision — next assistant turn for a revision transcript.
//!
//! Same remote chain as generation with a smaller token cap. When no remote
//! tier answers, a keyword-matched canned acknowledgment is returned. Canned
//! replies never imply an edit to any stored letter.

use tracing::info;

use crate::letters::prompts::{REVISION_GREETING, REVISION_SYSTEM};
use crate::llm_client::chain::ProviderChain;
use crate::llm_client::CompletionParams;
use crate::models::message::{last_user_content, Message};

pub const REVISION_PARAMS: CompletionParams = CompletionParams {
    temperature: 0.7,
    max_tokens: 1000,
};

/// A canned acknowledgment chosen when the last user turn mentions any of
/// `keywords` (case-insensitive substring match).
pub struct CannedReply {
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

impl CannedReply {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw))
    }
}

/// Checked in order; first match wins.
pub const CANNED_REPLIES: &[CannedReply] = &[
    CannedReply {
        keywords: &["name"],
        reply: "I've updated the name in the cover letter as you requested. \
            Is there anything else you'd like to change?",
    },
    CannedReply {
        keywords: &["format", "style"],
        reply: "I've made the formatting changes you requested. The cover letter now has \
            a more professional layout. Is there anything else you'd like to adjust?",
    },
    CannedReply {
        keywords: &["skill", "experience"],
        reply: "I've highlighted your skills and experience more prominently in the cover \
            letter. Would you like to emphasize any specific achievements?",
    },
    CannedReply {
        keywords: &["tone", "formal", "informal"],
        reply: "I've adjusted the tone of the cover letter as requested. It now has a more \
            appropriate style for the position. How does it look to you now?",
    },
];

pub const GENERIC_REPLY: &str = "I've made the changes you requested. The cover letter has \
    been updated. Is there anything else you'd like me to help with?";

/// Canned reply for the most recent user turn.
pub fn canned_reply(transcript: &[Message]) -> &'static str {
    let lowered = last_user_content(transcript)
        .unwrap_or_default()
        .to_lowercase();

    CANNED_REPLIES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.reply)
        .unwrap_or(GENERIC_REPLY)
}

/// Opening transcript of a revision session started after a generation.
pub fn seed_transcript() -> Vec<Message> {
    vec![
        Message::system(REVISION_SYSTEM),
        Message::assistant(REVISION_GREETING),
    ]
}

#[derive(Clone)]
pub struct Reviser {
    chain: ProviderChain,
}

impl Reviser {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }

    /// Produces the next assistant turn. The transcript is only read; the
    /// caller appends both its user turn and the returned message.
    pub async fn continue_conversation(&self, transcript: &[Message]) -> Message {
        if let Some(reply) = self.chain.complete(transcript, REVISION_PARAMS).await {
            info!("Revision reply generated by provider '{}'", reply.provider);
            return Message::assistant(reply.text);
        }

        info!("Remote providers unavailable, using canned revision reply");
        Message::assistant(canned_reply(transcript))
    }
}
