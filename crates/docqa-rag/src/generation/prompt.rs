//! Prompt templates for RAG generation

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the question-answering prompt sent to the generator
    pub fn build_qa_prompt(context: &str, question: &str) -> String {
        format!(
            "Context: {context}\n\nQuestion: {question}\n\nAnswer:",
            context = context,
            question = question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qa_prompt_layout() {
        let prompt = PromptBuilder::build_qa_prompt("Paris is in France.", "Where is Paris?");
        assert_eq!(
            prompt,
            "Context: Paris is in France.\n\nQuestion: Where is Paris?\n\nAnswer:"
        );
    }

    #[test]
    fn test_qa_prompt_with_empty_context() {
        let prompt = PromptBuilder::build_qa_prompt("", "Anything?");
        assert!(prompt.starts_with("Context: \n\nQuestion: Anything?"));
    }
}
