//! Generation pipeline tests driven by the mock provider.

use pagequiz_core::engine::{generate_quiz, parse_failure};
use pagequiz_core::model::{ImagePart, QuestionKind};
use pagequiz_core::prompt::generation_prompt;
use pagequiz_providers::mock::MockProvider;
use pagequiz_providers::PagequizConfig;

const REPLY: &str = r#"```json
{
  "topic": "Zlomky",
  "questions": [
    {"type": "multiple_choice", "question": "Kolik je 1/2 + 1/4?", "options": ["3/4", "2/6", "1/8", "1"], "answer": 0, "explanation": "1/2 = 2/4."},
    {"type": "true_false", "question": "1/3 je větší než 1/2.", "answer": false, "explanation": "Třetina je menší."},
    {"type": "fill_blank", "question": "Čitatel zlomku 3/5 je ___.", "answer": "3", "explanation": "Číslo nad zlomkovou čarou."},
    {"type": "true_false", "question": "2/4 = 1/2.", "answer": true, "explanation": "Krácení dvěma."}
  ]
}
```"#;

fn page(n: u8) -> ImagePart {
    ImagePart {
        mime_type: "image/png".into(),
        data: format!("cGFnZ{n}"),
    }
}

#[tokio::test]
async fn config_request_reaches_provider() {
    let config = PagequizConfig {
        model: "gemini-2.5-pro".into(),
        temperature: 0.4,
        ..Default::default()
    };
    let provider = MockProvider::with_fixed_response(REPLY);
    let request = config.generate_request(generation_prompt(), vec![page(1), page(2)]);

    let generated = generate_quiz(&provider, &request).await.unwrap();

    assert_eq!(provider.call_count(), 1);
    let sent = provider.last_request().unwrap();
    assert_eq!(sent.model, "gemini-2.5-pro");
    assert_eq!(sent.temperature, 0.4);
    assert_eq!(sent.images, vec![page(1), page(2)]);
    assert_eq!(sent.prompt, generation_prompt());

    assert_eq!(generated.model, "gemini-2.5-pro");
    assert_eq!(generated.quiz.topic, "Zlomky");
    assert!(generated.warnings.is_empty());

    let breakdown = generated.quiz.type_breakdown();
    assert_eq!(breakdown[&QuestionKind::TrueFalse], 2);
    assert_eq!(breakdown[&QuestionKind::MultipleChoice], 1);
    assert_eq!(breakdown[&QuestionKind::FillBlank], 1);
}

#[tokio::test]
async fn prose_reply_is_a_parse_failure() {
    let reply = "Bohužel na obrázcích nevidím žádný text.";
    let provider = MockProvider::with_fixed_response(reply);
    let request = PagequizConfig::default().generate_request(generation_prompt(), vec![page(1)]);

    let err = generate_quiz(&provider, &request).await.unwrap_err();

    assert_eq!(provider.call_count(), 1);
    assert_eq!(parse_failure(&err).unwrap().raw(), reply);
}
