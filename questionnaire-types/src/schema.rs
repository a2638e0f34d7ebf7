//! Structural validation of agent-supplied questionnaires.

use serde_json::{Map, Value};

use crate::{Question, Questionnaire, SchemaError};

/// Validate a raw questionnaire and build the immutable model.
///
/// The expected shape is:
///
/// ```text
/// { "title": string, "author": string, "introduction": string,
///   "questions": [ { "question": string, "options": [string, ...] }, ... ] }
/// ```
///
/// `options` may be omitted (no options). Unknown fields are ignored. Missing
/// `title`, `author` or `introduction` are errors here; substituting defaults is
/// left to the caller.
pub fn validate(raw: &Value) -> Result<Questionnaire, SchemaError> {
    let object = raw
        .as_object()
        .ok_or_else(|| SchemaError::NotAnObject(kind_of(raw)))?;

    let title = required_string(object, "title")?;
    let author = required_string(object, "author")?;
    let introduction = required_string(object, "introduction")?;

    let questions = match object.get("questions") {
        None | Some(Value::Null) => return Err(SchemaError::MissingField("questions")),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| question(index, item))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(SchemaError::InvalidField {
                field: "questions",
                expected: "an array",
                found: kind_of(other),
            });
        }
    };

    Ok(Questionnaire::new(title, author, introduction).with_questions(questions))
}

fn required_string(object: &Map<String, Value>, field: &'static str) -> Result<String, SchemaError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(SchemaError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(SchemaError::InvalidField {
            field,
            expected: "a string",
            found: kind_of(other),
        }),
    }
}

fn question(index: usize, raw: &Value) -> Result<Question, SchemaError> {
    let object = raw.as_object().ok_or(SchemaError::QuestionNotAnObject {
        index,
        found: kind_of(raw),
    })?;

    let text = match object.get("question") {
        None | Some(Value::Null) => return Err(SchemaError::MissingQuestionText { index }),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(SchemaError::InvalidQuestionText {
                index,
                found: kind_of(other),
            });
        }
    };

    let options = match object.get("options") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(option, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(SchemaError::OptionNotAString {
                    question: index,
                    option,
                    found: kind_of(other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(SchemaError::OptionsNotAnArray {
                index,
                found: kind_of(other),
            });
        }
    };

    Question::new(text, options).map_err(|_| SchemaError::EmptyQuestion { index })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
