use questionnaire_types::{EmptyQuestionText, Question, Questionnaire};
use serde_json::{Value, json};

/// A single two-option question.
pub fn color_preference() -> Result<Questionnaire, EmptyQuestionText> {
    Ok(Questionnaire::new("T", "A", "I").with_question(Question::new("Color?", ["Red", "Blue"])?))
}

/// `color_preference` as an agent would send it.
pub fn raw() -> Value {
    json!({
        "title": "T",
        "author": "A",
        "introduction": "I",
        "questions": [{ "question": "Color?", "options": ["Red", "Blue"] }],
    })
}
