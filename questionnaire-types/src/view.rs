use crate::Questionnaire;

/// Prompt shown above the closing comment field.
pub const COMMENT_PROMPT: &str = "Any other comments?";

/// Label of the button that submits the form.
pub const SUBMIT_LABEL: &str = "Submit";

/// A plain render instruction.
///
/// Surfaces walk the list produced by [`layout`] top to bottom and decide for
/// themselves how each node looks. Nodes that collect input carry the
/// indices needed to write into a [`crate::Response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Header {
        title: String,
        author: String,
        introduction: String,
    },

    Separator,

    /// A question's text, introducing the option and free-text nodes that follow it.
    Question { index: usize, text: String },

    /// A checkable option.
    Option {
        question: usize,
        option: usize,
        label: String,
    },

    /// Free text for the given question.
    CustomText { question: usize },

    /// The closing comment field.
    Comment { prompt: String },

    Submit { label: String },
}

impl ViewNode {
    /// Check if the node collects input or triggers submission.
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Self::Option { .. } | Self::CustomText { .. } | Self::Comment { .. } | Self::Submit { .. }
        )
    }
}

/// Lay out a questionnaire as render instructions.
pub fn layout(questionnaire: &Questionnaire) -> Vec<ViewNode> {
    let mut nodes = vec![
        ViewNode::Header {
            title: questionnaire.title().to_string(),
            author: questionnaire.author().to_string(),
            introduction: questionnaire.introduction().to_string(),
        },
        ViewNode::Separator,
    ];

    for (index, question) in questionnaire.questions().iter().enumerate() {
        nodes.push(ViewNode::Question {
            index,
            text: question.text().to_string(),
        });
        nodes.extend(
            question
                .options()
                .iter()
                .enumerate()
                .map(|(option, label)| ViewNode::Option {
                    question: index,
                    option,
                    label: label.clone(),
                }),
        );
        nodes.push(ViewNode::CustomText { question: index });
    }

    nodes.push(ViewNode::Comment {
        prompt: COMMENT_PROMPT.to_string(),
    });
    nodes.push(ViewNode::Separator);
    nodes.push(ViewNode::Submit {
        label: SUBMIT_LABEL.to_string(),
    });
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Question;

    #[test]
    fn layout_order() {
        let questionnaire = Questionnaire::new("T", "A", "I")
            .with_question(Question::new("Color?", ["Red", "Blue"]).unwrap())
            .with_question(Question::new("Why?", Vec::<String>::new()).unwrap());

        let nodes = layout(&questionnaire);
        assert_eq!(
            nodes,
            vec![
                ViewNode::Header {
                    title: "T".into(),
                    author: "A".into(),
                    introduction: "I".into(),
                },
                ViewNode::Separator,
                ViewNode::Question {
                    index: 0,
                    text: "Color?".into()
                },
                ViewNode::Option {
                    question: 0,
                    option: 0,
                    label: "Red".into()
                },
                ViewNode::Option {
                    question: 0,
                    option: 1,
                    label: "Blue".into()
                },
                ViewNode::CustomText { question: 0 },
                ViewNode::Question {
                    index: 1,
                    text: "Why?".into()
                },
                ViewNode::CustomText { question: 1 },
                ViewNode::Comment {
                    prompt: COMMENT_PROMPT.into()
                },
                ViewNode::Separator,
                ViewNode::Submit {
                    label: SUBMIT_LABEL.into()
                },
            ]
        );
    }

    #[test]
    fn empty_questionnaire_still_has_comment_and_submit() {
        let nodes = layout(&Questionnaire::new("T", "A", "I"));
        let interactive: Vec<_> = nodes.iter().filter(|n| n.is_interactive()).collect();
        assert_eq!(interactive.len(), 2);
        assert!(matches!(interactive[0], ViewNode::Comment { .. }));
        assert!(matches!(interactive[1], ViewNode::Submit { .. }));
    }
}
