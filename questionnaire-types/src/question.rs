use serde::{Deserialize, Serialize};

use crate::{EmptyQuestionText, SchemaError};

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// The question text shown to the human.
    #[serde(rename = "question")]
    text: String,

    /// Options the human can check, in display order.
    options: Vec<String>,
}

impl Question {
    /// Create a new question with the given options.
    ///
    /// Fails when the text is empty or only whitespace.
    pub fn new<I, S>(text: impl Into<String>, options: I) -> Result<Self, EmptyQuestionText>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(EmptyQuestionText);
        }
        Ok(Self {
            text,
            options: options.into_iter().map(Into::into).collect(),
        })
    }

    /// Get the question text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the options in declared order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Get the option at the given index.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}

/// The top-level questionnaire presented to a human.
///
/// Question order is significant: it is both the display order and the transcript order.
/// A questionnaire without questions is legal, it only collects the closing comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Questionnaire {
    title: String,
    author: String,
    introduction: String,
    questions: Vec<Question>,
}

impl Questionnaire {
    /// Create a questionnaire without questions.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        introduction: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            introduction: introduction.into(),
            questions: Vec::new(),
        }
    }

    /// Append a question.
    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// Append several questions.
    pub fn with_questions(mut self, questions: impl IntoIterator<Item = Question>) -> Self {
        self.questions.extend(questions);
        self
    }

    /// Validate a raw, agent-supplied questionnaire.
    ///
    /// See [`crate::validate`] for the structural rules.
    pub fn from_value(raw: &serde_json::Value) -> Result<Self, SchemaError> {
        crate::validate(raw)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn introduction(&self) -> &str {
        &self.introduction
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Check if the questionnaire has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

impl TryFrom<serde_json::Value> for Questionnaire {
    type Error = SchemaError;

    fn try_from(raw: serde_json::Value) -> Result<Self, Self::Error> {
        crate::validate(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let questionnaire = Questionnaire::new("T", "A", "I")
            .with_question(Question::new("Color?", ["Red", "Blue"]).unwrap())
            .with_question(Question::new("Anything else?", Vec::<String>::new()).unwrap());

        assert_eq!(questionnaire.title(), "T");
        assert_eq!(questionnaire.len(), 2);
        assert_eq!(questionnaire.questions()[0].option(1), Some("Blue"));
        assert_eq!(questionnaire.questions()[0].option(2), None);
        assert!(questionnaire.questions()[1].options().is_empty());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let questionnaire =
            Questionnaire::new("T", "A", "I").with_question(Question::new("Color?", ["Red"]).unwrap());

        let value = serde_json::to_value(&questionnaire).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "T",
                "author": "A",
                "introduction": "I",
                "questions": [{ "question": "Color?", "options": ["Red"] }],
            })
        );
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(Question::new("", ["a"]), Err(EmptyQuestionText));
        assert_eq!(
            Question::new(" \n\t", Vec::<String>::new()),
            Err(EmptyQuestionText)
        );
    }

    #[test]
    fn built_questionnaire_survives_serde() {
        let questionnaire = Questionnaire::new("T", "A", "I").with_questions([
            Question::new("Color?", ["Red", "Blue"]).unwrap(),
            Question::new("Why?", Vec::<String>::new()).unwrap(),
        ]);

        let value = serde_json::to_value(&questionnaire).unwrap();
        assert_eq!(crate::validate(&value), Ok(questionnaire.clone()));
        assert_eq!(
            serde_json::from_value::<Questionnaire>(value).unwrap(),
            questionnaire
        );
    }

    #[test]
    fn deserializes_through_validation() {
        let questionnaire: Questionnaire = serde_json::from_str(
            r#"{"title":"T","author":"A","introduction":"I","questions":[{"question":"Q"}]}"#,
        )
        .unwrap();
        assert_eq!(questionnaire.questions()[0].text(), "Q");

        let missing_author = serde_json::from_str::<Questionnaire>(
            r#"{"title":"T","introduction":"I","questions":[]}"#,
        );
        assert!(missing_author.is_err());
    }
}
