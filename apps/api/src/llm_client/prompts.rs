// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it;
// the tag rules live here because ticket extraction and tag inference must agree on them.

/// Tag formatting rules, one per line, shared by every prompt that asks for tags.
pub const TAG_RULES: &str = "\
- tags are an array of 1-5 concise strings, each 1-3 words, lowercase with hyphens
";

/// Instruction that forbids anything but bare JSON in the reply.
pub const JSON_ONLY_RULE: &str = "\
- output must be valid JSON, without markdown
";
