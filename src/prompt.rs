//! Prompt construction: one template per task, selected through a single
//! match so each template stays independently testable.

use crate::catalog::{self, Task, SUPPORTED_LANGUAGES};
use crate::error::ApiError;

/// Builds the instruction string for a validated request.
///
/// Pure function of its inputs. Validation failures (unknown task,
/// unsupported language, missing required field) are reported here so the
/// dispatcher never contacts the provider with a bad request.
pub fn build(
    task: &str,
    language: &str,
    code: &str,
    description: Option<&str>,
) -> Result<String, ApiError> {
    let task = Task::parse(task).ok_or_else(|| {
        ApiError::InvalidRequest(format!(
            "unsupported task {task:?}; supported tasks are: debug, correct, generate"
        ))
    })?;

    if !catalog::language_supported(language) {
        return Err(ApiError::InvalidRequest(format!(
            "unsupported language {language:?}; supported languages are: {}",
            SUPPORTED_LANGUAGES.join(", ")
        )));
    }

    let description = description.map(str::trim).filter(|d| !d.is_empty());

    match task {
        Task::Debug | Task::Correct if code.trim().is_empty() => Err(ApiError::InvalidRequest(
            format!("code must not be empty for task {:?}", task.as_str()),
        )),
        Task::Debug => Ok(debug_prompt(language, code, description)),
        Task::Correct => Ok(correct_prompt(language, code)),
        Task::Generate => match description {
            Some(desc) => Ok(generate_prompt(language, desc)),
            None => Err(ApiError::InvalidRequest(
                "description must not be empty for task \"generate\"".to_string(),
            )),
        },
    }
}

fn debug_prompt(language: &str, code: &str, context: Option<&str>) -> String {
    let mut p = format!(
        "Analyze this {language} code and provide a debugging report:\n\
         1. Identify any bugs, logical errors, or potential issues\n\
         2. Explain each problem found\n\
         3. Provide the corrected code in a fenced code block\n\
         \n\
         Code to debug:\n\
         ```{language}\n{code}\n```\n"
    );
    if let Some(ctx) = context {
        p.push_str(&format!("\nObserved behavior or error output:\n{ctx}\n"));
    }
    p
}

fn correct_prompt(language: &str, code: &str) -> String {
    format!(
        "Review and improve this {language} code:\n\
         1. Fix any bugs or issues\n\
         2. Improve efficiency and readability\n\
         3. Apply the language's idiomatic conventions\n\
         4. Return the improved code in a fenced code block with a short rationale\n\
         \n\
         Original code:\n\
         ```{language}\n{code}\n```\n"
    )
}

fn generate_prompt(language: &str, description: &str) -> String {
    format!(
        "Generate {language} code based on this description:\n\
         1. Create efficient, well-structured code\n\
         2. Follow the language's conventions\n\
         3. Include error handling\n\
         4. Return the code in a fenced code block with a brief explanation\n\
         \n\
         Requirements:\n{description}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_prompt_contains_code_and_language() {
        let p = build("debug", "python", "def f(): pass", None).unwrap();
        assert!(!p.is_empty());
        assert!(p.contains("def f(): pass"));
        assert!(p.contains("python"));
    }

    #[test]
    fn correct_prompt_contains_code_and_language() {
        let p = build("correct", "rust", "fn main() {}", None).unwrap();
        assert!(p.contains("fn main() {}"));
        assert!(p.contains("rust"));
    }

    #[test]
    fn debug_prompt_appends_context_when_given() {
        let p = build("debug", "go", "func main() {}", Some("panic: nil deref")).unwrap();
        assert!(p.contains("panic: nil deref"));
    }

    #[test]
    fn generate_succeeds_with_empty_code() {
        let p = build("generate", "typescript", "", Some("a debounce helper")).unwrap();
        assert!(p.contains("a debounce helper"));
        assert!(p.contains("typescript"));
    }

    #[test]
    fn generate_without_description_is_invalid() {
        let err = build("generate", "python", "", None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
        let err = build("generate", "python", "", Some("   ")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn unknown_task_is_invalid() {
        let err = build("translate", "python", "x = 1", None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn unsupported_language_is_invalid() {
        let err = build("debug", "cobol", "MOVE A TO B", None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn empty_code_is_invalid_for_debug_and_correct() {
        for task in ["debug", "correct"] {
            let err = build(task, "java", "   ", None).unwrap_err();
            assert!(matches!(err, ApiError::InvalidRequest(_)));
        }
    }
}
