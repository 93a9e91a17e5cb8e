// Shared prompt constants. Each service that needs completion calls defines
// its own prompts.rs alongside it; this file holds cross-cutting fragments.

/// Default system prompt for plain assistance calls.
pub const HELPFUL_ASSISTANT_SYSTEM: &str = "You are a helpful assistant.";

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "IMPORTANT: Respond ONLY with valid JSON. \
    Do not include any text before or after the JSON. \
    Use proper JSON formatting with double quotes and no HTML entities.";
