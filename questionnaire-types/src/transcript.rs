//! The canonical text handed back to the calling agent.

use crate::{Questionnaire, Response, Selection};

/// Heading that introduces the closing comment.
pub const COMMENTS_HEADING: &str = "Client comments:";

/// Format a response as the transcript returned to the caller.
///
/// ```text
/// Client answers to the questionnaire "{title}":
///
/// {question}
///   * {checked option}
///   + {custom text}
///
/// Client comments:
/// {comment}
/// ```
///
/// Checked options appear in declared order, unchecked ones are left out.
/// Custom text and the comment are trimmed and skipped when blank. The
/// function never fails: a missing selection reads as an empty one and checked
/// indices without a matching option are ignored.
pub fn format_transcript(questionnaire: &Questionnaire, response: &Response) -> String {
    let mut lines = vec![format!(
        "Client answers to the questionnaire \"{}\":",
        questionnaire.title()
    )];

    for (index, question) in questionnaire.questions().iter().enumerate() {
        let selection = response.selection(index);

        lines.push(String::new());
        lines.push(question.text().to_string());

        for (option_index, option) in question.options().iter().enumerate() {
            if selection.is_some_and(|s| s.is_checked(option_index)) {
                lines.push(format!("  * {option}"));
            }
        }

        if let Some(custom) = selection.and_then(Selection::trimmed_custom_text) {
            lines.push(format!("  + {custom}"));
        }
    }

    if let Some(comment) = response.trimmed_comment() {
        lines.push(String::new());
        lines.push(COMMENTS_HEADING.to_string());
        lines.push(comment.to_string());
    }

    lines.join("\n")
}
