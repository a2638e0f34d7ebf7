use questionnaire_types::{EmptyQuestionText, Question, Questionnaire};
use serde_json::{Value, json};

pub const TITLE: &str = "Website redesign kickoff";
pub const AUTHOR: &str = "Project manager agent";
pub const INTRODUCTION: &str = "Before the team starts on the redesign we need a few \
decisions from you. Check every option that applies and add anything we missed in the text \
field below each question.";

/// A realistic requirements-gathering questionnaire.
pub fn project_kickoff() -> Result<Questionnaire, EmptyQuestionText> {
    Ok(Questionnaire::new(TITLE, AUTHOR, INTRODUCTION).with_questions([
        Question::new(
            "Which pages should be redesigned first?",
            ["Home", "Pricing", "Blog", "Contact"],
        )?,
        Question::new(
            "What is the main goal of the redesign?",
            [
                "More sign-ups",
                "Clearer pricing",
                "Modern look and feel",
                "Better mobile experience",
            ],
        )?,
        Question::new("Which launch window works for you?", ["This quarter", "Next quarter"])?,
        Question::new("Who should approve the final designs?", Vec::<String>::new())?,
    ]))
}

/// `project_kickoff` as an agent would send it, without an author.
pub fn raw_without_author() -> Value {
    json!({
        "title": TITLE,
        "introduction": INTRODUCTION,
        "questions": [
            {
                "question": "Which pages should be redesigned first?",
                "options": ["Home", "Pricing", "Blog", "Contact"],
            },
            {
                "question": "What is the main goal of the redesign?",
                "options": [
                    "More sign-ups",
                    "Clearer pricing",
                    "Modern look and feel",
                    "Better mobile experience",
                ],
            },
            {
                "question": "Which launch window works for you?",
                "options": ["This quarter", "Next quarter"],
            },
            { "question": "Who should approve the final designs?" },
        ],
    })
}
