//! Prompt builder for the grounded question-answering template.

use crate::catalog::MessageCatalog;
use crate::types::{BuiltPrompt, BuiltPromptMetadata, Language, MessageKind};
use regio_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Question-answering template. The three language-conditioned slots are
/// `prefix`, `questionLabel` and `answerLabel`.
pub const QA_TEMPLATE: &str = "{{prefix}}

Context:
{{context}}

{{questionLabel}}: {{question}}

{{answerLabel}}:";

/// Build the QA prompt for a question and its retrieved passages.
///
/// Passages are joined with newlines in the order given, which is the
/// retrieval order. No model is invoked here.
///
/// # Example
/// ```
/// use regio_prompt::{build_qa_prompt, Language, MessageCatalog};
///
/// let catalog = MessageCatalog::new("Bad Breisig").unwrap();
/// let built = build_qa_prompt(
///     &catalog,
///     Language::German,
///     &["Das Rathaus liegt am Koblenzer Platz."],
///     "Wo ist das Rathaus?",
/// )
/// .unwrap();
/// assert!(built.user.contains("Frage: Wo ist das Rathaus?"));
/// ```
pub fn build_qa_prompt<S: AsRef<str>>(
    catalog: &MessageCatalog,
    language: Language,
    passages: &[S],
    question: &str,
) -> AppResult<BuiltPrompt> {
    let context = passages
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("\n");

    let mut variables = HashMap::new();
    variables.insert(
        "prefix".to_string(),
        catalog.get(language, MessageKind::InstructionPrefix).to_string(),
    );
    variables.insert(
        "questionLabel".to_string(),
        catalog.get(language, MessageKind::QuestionLabel).to_string(),
    );
    variables.insert(
        "answerLabel".to_string(),
        catalog.get(language, MessageKind::AnswerLabel).to_string(),
    );
    variables.insert("question".to_string(), question.to_string());

    let context_chars = context.chars().count();
    variables.insert("context".to_string(), context);

    let user = render_template(QA_TEMPLATE, &variables)?;

    tracing::debug!(
        "Built {} QA prompt with {} passages ({} context chars)",
        language.tag(),
        passages.len(),
        context_chars
    );

    Ok(BuiltPrompt {
        user,
        metadata: BuiltPromptMetadata {
            language,
            context_passages: passages.len(),
            context_chars,
        },
    })
}

/// Render a Handlebars template with variables.
pub(crate) fn render_template(
    template: &str,
    variables: &HashMap<String, String>,
) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text output, never HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
