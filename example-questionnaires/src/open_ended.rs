use questionnaire_types::{EmptyQuestionText, Question, Questionnaire};

/// Questions without options; only free text can answer them.
pub fn open_ended() -> Result<Questionnaire, EmptyQuestionText> {
    Ok(Questionnaire::new(
        "Retrospective",
        "Scrum agent",
        "Two quick questions about the last sprint.",
    )
    .with_questions([
        Question::new("What went well?", Vec::<String>::new())?,
        Question::new("What should change?", Vec::<String>::new())?,
    ]))
}

/// Nothing to answer except the closing comment.
pub fn no_questions() -> Questionnaire {
    Questionnaire::new("T", "A", "I")
}
