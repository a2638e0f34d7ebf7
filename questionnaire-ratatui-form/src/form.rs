//! Form state and keyboard handling, independent of any terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use questionnaire::{Questionnaire, Response, SUBMIT_LABEL, ViewNode, layout};

/// Title of the free-text box under each question.
pub(crate) const CUSTOM_TEXT_TITLE: &str = "Other";

/// Number of items PageUp/PageDown move.
const PAGE_STEP: usize = 5;

/// Something the keyboard can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Option { question: usize, option: usize },
    CustomText(usize),
    Comment,
    Submit,
}

impl Focus {
    fn from_node(node: &ViewNode) -> Option<Self> {
        match node {
            ViewNode::Option {
                question, option, ..
            } => Some(Self::Option {
                question: *question,
                option: *option,
            }),
            ViewNode::CustomText { question } => Some(Self::CustomText(*question)),
            ViewNode::Comment { .. } => Some(Self::Comment),
            ViewNode::Submit { .. } => Some(Self::Submit),
            _ => None,
        }
    }

    fn is_text(self) -> bool {
        matches!(self, Self::CustomText(_) | Self::Comment)
    }
}

/// What a key press asks the surface to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormAction {
    Continue,
    Submit,
    Abandon,
}

/// Editable text with a cursor counted in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TextBuffer {
    pub(crate) value: String,
    pub(crate) cursor: usize,
}

impl TextBuffer {
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    fn to_answer(&self) -> Option<String> {
        (!self.value.is_empty()).then(|| self.value.clone())
    }
}

/// Everything the terminal form shows and edits.
#[derive(Debug)]
pub(crate) struct FormState {
    pub(crate) title: String,
    pub(crate) author: String,
    /// Scrollable body, in layout order. The submit button lives in the footer.
    pub(crate) nodes: Vec<ViewNode>,
    pub(crate) submit_label: String,
    focusables: Vec<Focus>,
    focused: usize,
    response: Response,
    pub(crate) custom: Vec<TextBuffer>,
    pub(crate) comment: TextBuffer,
    pub(crate) scroll_offset: u16,
}

impl FormState {
    pub(crate) fn new(questionnaire: &Questionnaire) -> Self {
        let mut submit_label = SUBMIT_LABEL.to_string();
        let mut nodes = Vec::new();
        let mut focusables = Vec::new();

        for node in layout(questionnaire) {
            if let Some(focus) = Focus::from_node(&node) {
                focusables.push(focus);
            }
            match node {
                ViewNode::Submit { label } => submit_label = label,
                other => nodes.push(other),
            }
        }

        Self {
            title: questionnaire.title().to_string(),
            author: questionnaire.author().to_string(),
            nodes,
            submit_label,
            focusables,
            focused: 0,
            response: Response::blank(questionnaire),
            custom: vec![TextBuffer::default(); questionnaire.len()],
            comment: TextBuffer::default(),
            scroll_offset: 0,
        }
    }

    pub(crate) fn focus(&self) -> Focus {
        self.focusables
            .get(self.focused)
            .copied()
            .unwrap_or(Focus::Submit)
    }

    /// Index into `nodes` of the focused item, `None` for the submit button.
    pub(crate) fn focused_node(&self) -> Option<usize> {
        let focus = self.focus();
        self.nodes
            .iter()
            .position(|node| Focus::from_node(node) == Some(focus))
    }

    pub(crate) fn is_checked(&self, question: usize, option: usize) -> bool {
        self.response
            .selection(question)
            .is_some_and(|selection| selection.is_checked(option))
    }

    fn next(&mut self) {
        if self.focused + 1 < self.focusables.len() {
            self.focused += 1;
        }
    }

    fn prev(&mut self) {
        self.focused = self.focused.saturating_sub(1);
    }

    fn toggle(&mut self, question: usize, option: usize) {
        if let Some(selection) = self.response.selection_mut(question) {
            selection.toggle(option);
        }
    }

    fn text_mut(&mut self) -> Option<&mut TextBuffer> {
        match self.focus() {
            Focus::CustomText(question) => self.custom.get_mut(question),
            Focus::Comment => Some(&mut self.comment),
            _ => None,
        }
    }

    /// Apply a key press.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.kind != KeyEventKind::Press {
            return FormAction::Continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let focus = self.focus();

        match key.code {
            KeyCode::Esc => return FormAction::Abandon,
            KeyCode::Char('c') if ctrl => return FormAction::Abandon,
            KeyCode::F(10) => return FormAction::Submit,
            KeyCode::Char('s') if ctrl => return FormAction::Submit,
            KeyCode::Enter if ctrl => return FormAction::Submit,
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => self.prev(),
            KeyCode::BackTab | KeyCode::Up => self.prev(),
            KeyCode::Tab | KeyCode::Down => self.next(),
            KeyCode::PageDown => (0..PAGE_STEP).for_each(|_| self.next()),
            KeyCode::PageUp => (0..PAGE_STEP).for_each(|_| self.prev()),
            KeyCode::Enter => match focus {
                Focus::Option { question, option } => self.toggle(question, option),
                Focus::CustomText(_) | Focus::Comment => {
                    if let Some(text) = self.text_mut() {
                        text.insert('\n');
                    }
                }
                Focus::Submit => return FormAction::Submit,
            },
            KeyCode::Char(' ') if !focus.is_text() => {
                if let Focus::Option { question, option } = focus {
                    self.toggle(question, option);
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(text) = self.text_mut() {
                    text.insert(c);
                }
            }
            KeyCode::Backspace => self.text_mut().into_iter().for_each(TextBuffer::backspace),
            KeyCode::Delete => self.text_mut().into_iter().for_each(TextBuffer::delete),
            KeyCode::Left => self.text_mut().into_iter().for_each(TextBuffer::left),
            KeyCode::Right => self.text_mut().into_iter().for_each(TextBuffer::right),
            KeyCode::Home => {
                if let Some(text) = self.text_mut() {
                    text.cursor = 0;
                }
            }
            KeyCode::End => {
                if let Some(text) = self.text_mut() {
                    text.cursor = text.len();
                }
            }
            _ => {}
        }

        FormAction::Continue
    }

    /// Snapshot of what the human entered so far.
    pub(crate) fn to_response(&self) -> Response {
        let mut response = self.response.clone();
        for (selection, text) in response.answers.iter_mut().zip(&self.custom) {
            selection.custom_text = text.to_answer();
        }
        response.comment = self.comment.to_answer();
        response
    }
}

/// Word-wrap display text. Always returns at least one line.
pub(crate) fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();

            if line_len > 0 && line_len + 1 + chars.len() > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            while chars.len() > width - line_len {
                let rest = chars.split_off(width - line_len);
                line.extend(chars);
                lines.push(std::mem::take(&mut line));
                line_len = 0;
                chars = rest;
            }
            line_len += chars.len();
            line.extend(chars);
        }

        lines.push(line);
    }

    lines
}

/// Hard-wrap editable text so every char keeps its column.
pub(crate) fn wrap_input(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for c in text.chars() {
        if c == '\n' {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
            continue;
        }
        if line_len == width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        line.push(c);
        line_len += 1;
    }

    lines.push(line);
    lines
}

/// Row and column of the cursor within `wrap_input(text, width)`.
pub(crate) fn input_cursor(buffer: &TextBuffer, width: u16) -> (u16, u16) {
    let width = usize::from(width.max(1));
    let (mut row, mut col) = (0usize, 0usize);

    for c in buffer.value.chars().take(buffer.cursor) {
        if c == '\n' {
            row += 1;
            col = 0;
            continue;
        }
        if col == width {
            row += 1;
            col = 0;
        }
        col += 1;
    }

    let col = col.min(width - 1);
    (
        u16::try_from(row).unwrap_or(u16::MAX),
        u16::try_from(col).unwrap_or(u16::MAX),
    )
}
