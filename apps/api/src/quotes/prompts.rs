// The prompt constant for the Quotes module.

/// Generation prompt template. Replace `{topic}` before sending.
///
/// The wording is fixed: three quotes, one per line, attributed where
/// possible. The line-per-quote instruction is what `split_quotes` relies on.
pub const QUOTE_PROMPT_TEMPLATE: &str = r#"Generate 3 short, motivational quotes about the topic: "{topic}". Each quote should be on a new line and attributed to a well-known figure if possible."#;

/// Renders the generation prompt for a trimmed topic.
pub fn quote_prompt(topic: &str) -> String {
    QUOTE_PROMPT_TEMPLATE.replace("{topic}", topic)
}
