// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Keeps model output pasteable into a plain-text letter field.
pub const PLAIN_TEXT_INSTRUCTION: &str = "Respond in plain text only. \
    Do NOT use markdown headings, bold text, or code fences. \
    Do NOT wrap the answer in quotes or add commentary before or after it.";
