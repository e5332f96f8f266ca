//! Instruction template sent to the model provider.

/// Placeholder replaced by the user's text.
const INPUT_MARKER: &str = "{{INPUT}}";

const TEMPLATE: &str = r#"Audit this news claim for veracity:

INPUT: "{{INPUT}}"

Respond with a single JSON object and nothing else, using exactly these fields:
{
  "verdict": "REAL" | "FAKE" | "MISLEADING" | "UNVERIFIED",
  "confidence": integer 0-100,
  "explanation": short summary of the reasoning,
  "keyPoints": [string, ...],
  "sources": [{"title": string, "uri": absolute URL, "verified": boolean}, ...],
  "categories": {"bias": integer 0-100, "sensationalism": integer 0-100, "logicalConsistency": integer 0-100}
}

Return ONLY valid JSON."#;

/// Build the analysis prompt. The text is embedded verbatim, unescaped.
pub fn build_prompt(news_text: &str) -> String {
    TEMPLATE.replacen(INPUT_MARKER, news_text, 1)
}
