//! Context-derived greeting and starter suggestions.

use hrportal_rs_protocol::AssistantContext;

pub(crate) fn phase_name(phase: u32) -> &'static str {
    match phase {
        1 => "Welcome & Paperwork",
        2 => "Orientation",
        3 => "Training",
        4 => "Integration",
        5 => "Review",
        _ => "Onboarding",
    }
}

pub(crate) fn welcome_text(context: &AssistantContext) -> String {
    let name = context.first_name.trim();
    let greeting = if name.is_empty() {
        "Hi there!".to_string()
    } else {
        format!("Hi {name}!")
    };
    format!(
        "{greeting} I'm your onboarding assistant. You're in Phase {} ({}). \
         Ask me anything about your next steps, documents, or company policies.",
        context.phase,
        phase_name(context.phase)
    )
}

pub(crate) fn default_suggestions(phase: u32) -> Vec<String> {
    let suggestions: &[&str] = match phase {
        1 => &[
            "What documents do I need to upload?",
            "How do I complete my profile?",
            "When is my first day orientation?",
            "Who is my onboarding buddy?",
        ],
        2 => &[
            "What happens during orientation?",
            "Where can I find the employee handbook?",
            "How do I set up my benefits?",
            "Who should I meet this week?",
        ],
        3 => &[
            "Which trainings are mandatory?",
            "How do I track my training progress?",
            "Where are the training materials?",
            "What's the deadline for compliance training?",
        ],
        4 => &[
            "How do I request time off?",
            "What are my team's goals?",
            "How do performance reviews work?",
            "Show me my onboarding timeline",
        ],
        _ => &[
            "What should I do next?",
            "Show me my onboarding timeline",
            "Where can I find company policies?",
            "How do I contact HR?",
        ],
    };
    suggestions.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{default_suggestions, welcome_text};
    use hrportal_rs_protocol::AssistantContext;
    use pretty_assertions::assert_eq;

    #[test]
    fn welcome_mentions_name_and_phase() {
        let text = welcome_text(&AssistantContext::new(2, 10, "Priya"));
        assert!(text.starts_with("Hi Priya!"), "{text}");
        assert!(text.contains("Phase 2 (Orientation)"), "{text}");
    }

    #[test]
    fn unknown_phase_falls_back_to_generic_set() {
        assert_eq!(default_suggestions(9), default_suggestions(5));
        assert_eq!(default_suggestions(1).len(), 4);
    }
}
