//! Conversation state machine
//!
//! Pure transition logic: given a session and one incoming message, decide
//! the next session state and the intended outbound action. The effectful
//! form submission lives in [`crate::services::forms`]; this module only
//! signals that submission is due, so the transitions are testable without
//! any network mocking.

use tracing::debug;
use crate::catalog::{Catalog, Question};
use super::session::{Session, Stage, NAME_KEY};

/// Greeting sent on first contact, before any input is consumed
pub const NAME_PROMPT: &str =
    "📢 AUDIÊNCIAS PÚBLICAS - LOA 2025\n\n👤 Qual o seu nome completo?";

/// Prompt for the free-text "other suggestion" branch
pub const FREE_TEXT_PROMPT: &str = "✍️ Por favor, escreva sua sugestão para esta área:";

/// Validation message for a numeral outside the menu range
pub const INVALID_OPTION: &str =
    "❌ Opção inválida. Por favor, digite um número válido da lista.";

/// Validation message for input that is not a clean positive integer
pub const DIGIT_REQUIRED: &str =
    "❌ Por favor, digite o número correspondente à opção desejada.";

/// Acknowledgement after a successful submission
pub const SUBMIT_SUCCESS: &str = "✅ Obrigado! Suas respostas foram enviadas com sucesso.";

/// Notice after a failed submission
pub const SUBMIT_FAILURE: &str = "❌ Ocorreu um erro ao enviar suas respostas.";

/// Outbound reply message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub body: String,
    pub media_url: Option<String>,
}

impl Reply {
    pub fn text(body: impl Into<String>) -> Self {
        Self { body: body.into(), media_url: None }
    }
}

/// Result of one state machine step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send this reply and persist the session
    Reply(Reply),
    /// The flow is complete: build the payload, submit it, and remove the
    /// session regardless of the outcome
    Submit,
}

/// Advance the conversation by one step.
///
/// The caller handles first contact itself (create the session, send
/// [`NAME_PROMPT`]); this function is only invoked for sessions that
/// already exist.
pub fn advance(session: &mut Session, input: &str, catalog: &Catalog) -> Action {
    let action = match session.stage.clone() {
        Stage::AwaitingName => {
            // The name is accepted verbatim, no format constraints.
            session.set_answer(NAME_KEY, input);
            session.set_stage(Stage::Answering { step: 0, awaiting_free_text: false });
            present_next(session, catalog)
        }
        Stage::Answering { step, awaiting_free_text } => {
            if awaiting_free_text {
                // awaiting_free_text is only ever set with step > 0
                if let Some(question) = step.checked_sub(1).and_then(|i| catalog.get(i)) {
                    session.set_answer(&question.form_field_id, input);
                }
                session.set_stage(Stage::Answering { step, awaiting_free_text: false });
                present_next(session, catalog)
            } else if step > 0 {
                answer_menu(session, input, catalog, step)
            } else {
                // Right after the name step there is no previous question
                // to record.
                present_next(session, catalog)
            }
        }
        Stage::Complete => Action::Submit,
    };

    // The flow can reach Complete without the usual answer-recording path
    // (e.g. an empty catalog, or a stored Complete session); the raw
    // incoming text then stands in for the final answer.
    if action == Action::Submit {
        if let Some(last) = catalog.last() {
            if session.answer(&last.form_field_id).is_none() {
                session.set_answer(&last.form_field_id, input);
            }
        }
    }

    action
}

/// Handle a numeric menu reply for the question at `step - 1`
fn answer_menu(session: &mut Session, input: &str, catalog: &Catalog, step: usize) -> Action {
    let Some(question) = catalog.get(step - 1) else {
        // Catalog shrank out from under the session; treat as complete.
        session.set_stage(Stage::Complete);
        return Action::Submit;
    };

    let Some(choice) = parse_choice(input) else {
        debug!(sender = %session.sender, input = %input, "Menu reply is not a number");
        return Action::Reply(Reply::text(DIGIT_REQUIRED));
    };

    if choice == question.options.len() + 1 {
        session.set_stage(Stage::Answering { step, awaiting_free_text: true });
        Action::Reply(Reply::text(FREE_TEXT_PROMPT))
    } else if (1..=question.options.len()).contains(&choice) {
        session.set_answer(&question.form_field_id, question.options[choice - 1].clone());
        present_next(session, catalog)
    } else {
        debug!(sender = %session.sender, choice = choice, "Menu reply out of range");
        Action::Reply(Reply::text(INVALID_OPTION))
    }
}

/// Present the next catalog question, or complete the flow when the
/// catalog is exhausted
fn present_next(session: &mut Session, catalog: &Catalog) -> Action {
    let step = match session.stage {
        Stage::Answering { step, .. } => step,
        _ => return Action::Submit,
    };

    match catalog.get(step) {
        Some(question) => {
            session.set_stage(Stage::Answering { step: step + 1, awaiting_free_text: false });
            Action::Reply(Reply {
                body: build_menu(question),
                media_url: question.image_url.clone(),
            })
        }
        None => {
            session.set_stage(Stage::Complete);
            Action::Submit
        }
    }
}

/// Parse a menu selection: trimmed base-10, anything that is not a clean
/// non-negative integer is a failure
fn parse_choice(input: &str) -> Option<usize> {
    input.trim().parse::<usize>().ok()
}

/// Build the menu text for a question: area header, numbered options and
/// the appended free-text option
fn build_menu(question: &Question) -> String {
    let mut body = format!("📌 *{}*\n\nEscolha uma opção:\n\n", question.area.to_uppercase());
    for (i, option) in question.options.iter().enumerate() {
        body.push_str(&format!("{}\u{fe0f}\u{20e3} {}\n", i + 1, option));
    }
    body.push_str(&format!(
        "{}\u{fe0f}\u{20e3} Outra sugestão (escreva)",
        question.options.len() + 1
    ));
    body
}

/// Build the answer payload for the external form: the configured name
/// field first, then one entry per catalog question, missing answers as
/// empty strings
pub fn build_payload(
    session: &Session,
    catalog: &Catalog,
    name_field: &str,
) -> Vec<(String, String)> {
    let mut payload = Vec::with_capacity(catalog.len() + 1);
    payload.push((
        name_field.to_string(),
        session.answer(NAME_KEY).unwrap_or_default().to_string(),
    ));
    for question in catalog.iter() {
        payload.push((
            format!("entry.{}", question.form_field_id),
            session.answer(&question.form_field_id).unwrap_or_default().to_string(),
        ));
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Question;
    use assert_matches::assert_matches;

    fn expect_reply(action: Action) -> Reply {
        match action {
            Action::Reply(reply) => reply,
            Action::Submit => panic!("expected a reply, got Submit"),
        }
    }

    fn catalog(specs: &[(&str, &str, &[&str])]) -> Catalog {
        let questions = specs
            .iter()
            .map(|(id, area, options)| Question {
                form_field_id: id.to_string(),
                area: area.to_string(),
                options: options.iter().map(|s| s.to_string()).collect(),
                image_url: None,
            })
            .collect();
        Catalog::new(questions).unwrap()
    }

    fn health_catalog() -> Catalog {
        catalog(&[("A1", "health", &["more staff", "more beds"])])
    }

    fn session_at_menu(catalog: &Catalog) -> Session {
        let mut session = Session::new("whatsapp:+551100");
        advance(&mut session, "Maria", catalog);
        session
    }

    #[test]
    fn test_name_is_recorded_and_first_menu_presented() {
        let catalog = health_catalog();
        let mut session = Session::new("whatsapp:+551100");

        let action = advance(&mut session, "Maria", &catalog);

        assert_eq!(session.answer(NAME_KEY), Some("Maria"));
        assert_eq!(session.stage, Stage::Answering { step: 1, awaiting_free_text: false });
        let reply = expect_reply(action);
        assert!(reply.body.contains("HEALTH"));
        assert!(reply.body.contains("1\u{fe0f}\u{20e3} more staff"));
        assert!(reply.body.contains("2\u{fe0f}\u{20e3} more beds"));
        assert!(reply.body.contains("3\u{fe0f}\u{20e3} Outra sugestão (escreva)"));
    }

    #[test]
    fn test_valid_option_records_answer_and_completes() {
        let catalog = health_catalog();
        let mut session = session_at_menu(&catalog);

        let action = advance(&mut session, "1", &catalog);

        assert_eq!(action, Action::Submit);
        assert_eq!(session.stage, Stage::Complete);
        assert_eq!(session.answer("A1"), Some("more staff"));
    }

    #[test]
    fn test_multi_question_walk() {
        let catalog = catalog(&[
            ("A1", "health", &["more staff", "more beds"]),
            ("B2", "education", &["daycare"]),
        ]);
        let mut session = session_at_menu(&catalog);

        let action = advance(&mut session, "2", &catalog);
        assert_matches!(&action, Action::Reply(_));
        let reply = expect_reply(action);
        assert!(reply.body.contains("EDUCATION"));
        assert_eq!(session.stage, Stage::Answering { step: 2, awaiting_free_text: false });

        let action = advance(&mut session, "1", &catalog);
        assert_eq!(action, Action::Submit);
        assert_eq!(session.answer("A1"), Some("more beds"));
        assert_eq!(session.answer("B2"), Some("daycare"));
    }

    #[test]
    fn test_free_text_branch_sets_flag_without_advancing() {
        let catalog = health_catalog();
        let mut session = session_at_menu(&catalog);

        let action = advance(&mut session, "3", &catalog);

        assert_eq!(action, Action::Reply(Reply::text(FREE_TEXT_PROMPT)));
        assert_eq!(session.stage, Stage::Answering { step: 1, awaiting_free_text: true });
    }

    #[test]
    fn test_free_text_answer_recorded_verbatim() {
        let catalog = health_catalog();
        let mut session = session_at_menu(&catalog);
        advance(&mut session, "3", &catalog);

        let action = advance(&mut session, "build more clinics", &catalog);

        assert_eq!(action, Action::Submit);
        assert_eq!(session.answer("A1"), Some("build more clinics"));
    }

    #[test]
    fn test_non_numeric_input_leaves_state_unchanged() {
        let catalog = health_catalog();
        let mut session = session_at_menu(&catalog);
        let before = session.stage.clone();

        let action = advance(&mut session, "abc", &catalog);

        assert_eq!(action, Action::Reply(Reply::text(DIGIT_REQUIRED)));
        assert_eq!(session.stage, before);
        assert_eq!(session.answer("A1"), None);
    }

    #[test]
    fn test_mixed_numeral_is_rejected_as_non_numeric() {
        // "2abc" would pass a prefix-based parse; the clean-integer rule
        // rejects it.
        let catalog = health_catalog();
        let mut session = session_at_menu(&catalog);

        let action = advance(&mut session, "2abc", &catalog);

        assert_eq!(action, Action::Reply(Reply::text(DIGIT_REQUIRED)));
    }

    #[test]
    fn test_out_of_range_option_leaves_state_unchanged() {
        let catalog = health_catalog();
        let mut session = session_at_menu(&catalog);
        let before = session.stage.clone();

        for input in ["0", "4", "99"] {
            let action = advance(&mut session, input, &catalog);
            assert_eq!(action, Action::Reply(Reply::text(INVALID_OPTION)), "input {input}");
            assert_eq!(session.stage, before);
        }
    }

    #[test]
    fn test_recovery_after_validation_error() {
        let catalog = health_catalog();
        let mut session = session_at_menu(&catalog);

        advance(&mut session, "abc", &catalog);
        let action = advance(&mut session, "1", &catalog);

        assert_eq!(action, Action::Submit);
        assert_eq!(session.answer("A1"), Some("more staff"));
    }

    #[test]
    fn test_menu_includes_media_url() {
        let questions = vec![Question {
            form_field_id: "A1".to_string(),
            area: "health".to_string(),
            options: vec!["more staff".to_string()],
            image_url: Some("https://example.com/health.png".to_string()),
        }];
        let catalog = Catalog::new(questions).unwrap();
        let mut session = Session::new("whatsapp:+551100");

        let action = advance(&mut session, "Maria", &catalog);

        let reply = expect_reply(action);
        assert_eq!(reply.media_url.as_deref(), Some("https://example.com/health.png"));
    }

    #[test]
    fn test_empty_catalog_completes_with_name_only() {
        let catalog = Catalog::new(vec![]).unwrap();
        let mut session = Session::new("whatsapp:+551100");

        let action = advance(&mut session, "Maria", &catalog);

        assert_eq!(action, Action::Submit);
        assert_eq!(session.stage, Stage::Complete);
    }

    #[test]
    fn test_complete_stage_fills_missing_final_answer() {
        let catalog = health_catalog();
        let mut session = Session::new("whatsapp:+551100");
        session.set_answer(NAME_KEY, "Maria");
        session.set_stage(Stage::Complete);

        let action = advance(&mut session, "late answer", &catalog);

        assert_eq!(action, Action::Submit);
        assert_eq!(session.answer("A1"), Some("late answer"));
    }

    #[test]
    fn test_payload_has_name_first_and_empty_strings_for_missing() {
        let catalog = catalog(&[
            ("A1", "health", &["more staff"]),
            ("B2", "education", &["daycare"]),
        ]);
        let mut session = Session::new("whatsapp:+551100");
        session.set_answer(NAME_KEY, "Maria");
        session.set_answer("A1", "more staff");

        let payload = build_payload(&session, &catalog, "entry.name");

        assert_eq!(payload, vec![
            ("entry.name".to_string(), "Maria".to_string()),
            ("entry.A1".to_string(), "more staff".to_string()),
            ("entry.B2".to_string(), String::new()),
        ]);
    }

    #[test]
    fn test_whitespace_around_numeral_is_accepted() {
        let catalog = health_catalog();
        let mut session = session_at_menu(&catalog);

        let action = advance(&mut session, " 2 ", &catalog);

        assert_eq!(action, Action::Submit);
        assert_eq!(session.answer("A1"), Some("more beds"));
    }
}
