//! Prompt assembly.
//!
//! The system instruction and the user-message template are fixed strings
//! sent verbatim to the completion service; downstream behavior depends on
//! their exact wording, so they must not be reworded or reformatted.

use newsdesk_core::Message;

/// System instruction sent with every generation request.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert news curator and writer. Based solely on the provided context, perform the specified task (e.g., summarization or question answering).\n    Do not include any information not present in the context.\n    Write in an engaging, user-friendly news style: start with a clear, concise title, then present the content in short, factual paragraphs, maintaining a curious and informative tone.\n    Use factual language, avoid opinions, and maintain objectivity. Ensure clarity and cohesion throughout.";

/// Compose the message pair for one generation request.
///
/// Only the freshly retrieved context and the task description go into
/// the prompt; prior conversation turns are deliberately not included.
pub fn build_prompt(context: &str, task: &str) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_INSTRUCTION),
        Message::user(format!(
            "Here is the context\u{2014}do not hallucinate.\ncontext: {context}\ntask: {task}"
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    use newsdesk_core::Role;

    #[test]
    fn prompt_is_a_system_user_pair() {
        let messages = build_prompt("CTX", "Summarize this context");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_INSTRUCTION);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn user_message_embeds_context_and_task() {
        let messages = build_prompt("the retrieved text", "Answer the question.");
        assert_eq!(
            messages[1].content,
            "Here is the context\u{2014}do not hallucinate.\ncontext: the retrieved text\ntask: Answer the question."
        );
    }

    #[test]
    fn instruction_keeps_its_exact_wording() {
        assert!(SYSTEM_INSTRUCTION.starts_with("You are an expert news curator and writer."));
        assert!(SYSTEM_INSTRUCTION.ends_with("Ensure clarity and cohesion throughout."));
    }
}
