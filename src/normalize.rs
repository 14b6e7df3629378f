//! Best-effort extraction of structured fields from free-form provider text.
//!
//! Malformed input is the common case here, not the exception: the provider's
//! output format is not contractually guaranteed, so normalization is a total
//! function with explicit fallbacks and never fails.

use serde::Serialize;

/// Structured result returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct CodeResult {
    /// Corrected or generated code, absent if the provider returned only
    /// prose.
    pub result_code: Option<String>,
    /// Always populated; falls back to the full raw text when no surrounding
    /// prose exists.
    pub explanation: String,
    /// Original provider text, kept for diagnostics.
    pub raw: String,
}

const FENCE: &str = "```";

/// Extracts the first fenced code block and treats the surrounding text as
/// the explanation. First fenced block wins; an unterminated fence takes the
/// remainder of the text as code.
pub fn normalize(raw: &str) -> CodeResult {
    let Some(open) = raw.find(FENCE) else {
        return CodeResult {
            result_code: None,
            explanation: raw.to_string(),
            raw: raw.to_string(),
        };
    };

    let before = &raw[..open];
    let body_start = open + FENCE.len();
    let (block, after) = match raw[body_start..].find(FENCE) {
        Some(close) => (
            &raw[body_start..body_start + close],
            &raw[body_start + close + FENCE.len()..],
        ),
        None => (&raw[body_start..], ""),
    };

    let code = strip_language_tag(block).trim();

    let mut parts: Vec<&str> = Vec::new();
    if !before.trim().is_empty() {
        parts.push(before.trim());
    }
    if !after.trim().is_empty() {
        parts.push(after.trim());
    }
    let explanation = if parts.is_empty() {
        raw.trim().to_string()
    } else {
        parts.join("\n")
    };

    CodeResult {
        result_code: (!code.is_empty()).then(|| code.to_string()),
        explanation,
        raw: raw.to_string(),
    }
}

/// Drops a language annotation after the opening fence. Only applies when the
/// block spans lines and the first line is a single bare word; an inline
/// block like ```` ```def f(): return 1``` ```` keeps its full content.
fn strip_language_tag(block: &str) -> &str {
    let Some(nl) = block.find('\n') else {
        return block;
    };
    let first = block[..nl].trim();
    let looks_like_tag = !first.is_empty()
        && first
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '_' | '-' | '.'));
    if looks_like_tag {
        &block[nl + 1..]
    } else {
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_fenced_block_round_trips() {
        let r = normalize("fix: ```def f(): return 1``` done");
        assert_eq!(r.result_code.as_deref(), Some("def f(): return 1"));
        assert!(!r.explanation.is_empty());
        assert!(r.explanation.contains("fix:"));
        assert!(r.explanation.contains("done"));
    }

    #[test]
    fn prose_without_fence_passes_through() {
        let r = normalize("I could not find an issue.");
        assert_eq!(r.result_code, None);
        assert_eq!(r.explanation, "I could not find an issue.");
        assert_eq!(r.raw, "I could not find an issue.");
    }

    #[test]
    fn total_over_empty_input() {
        let r = normalize("");
        assert_eq!(r.result_code, None);
        assert_eq!(r.explanation, "");
    }

    #[test]
    fn language_tag_is_stripped_from_multiline_block() {
        let r = normalize("Here you go:\n```python\nprint(1)\n```\nEnjoy.");
        assert_eq!(r.result_code.as_deref(), Some("print(1)"));
        assert_eq!(r.explanation, "Here you go:\nEnjoy.");
    }

    #[test]
    fn first_fenced_block_wins() {
        let r = normalize("```rust\nfn a() {}\n```\ntext\n```rust\nfn b() {}\n```");
        assert_eq!(r.result_code.as_deref(), Some("fn a() {}"));
        assert!(r.explanation.contains("text"));
    }

    #[test]
    fn unterminated_fence_takes_remainder_as_code() {
        let r = normalize("partial answer ```python\nx = 1\ny = 2");
        assert_eq!(r.result_code.as_deref(), Some("x = 1\ny = 2"));
        assert_eq!(r.explanation, "partial answer");
    }

    #[test]
    fn code_only_reply_falls_back_to_raw_explanation() {
        let raw = "```go\nfunc main() {}\n```";
        let r = normalize(raw);
        assert_eq!(r.result_code.as_deref(), Some("func main() {}"));
        assert_eq!(r.explanation, raw.trim());
    }

    #[test]
    fn empty_block_yields_no_code() {
        let r = normalize("nothing here: ``` ``` sorry");
        assert_eq!(r.result_code, None);
        assert!(r.explanation.contains("sorry"));
    }

    #[test]
    fn multiline_first_line_with_spaces_is_not_a_tag() {
        let r = normalize("```\nlet x = 1;\nlet y = 2;\n```");
        assert_eq!(r.result_code.as_deref(), Some("let x = 1;\nlet y = 2;"));
    }
}
