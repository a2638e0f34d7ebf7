//! Egui surface implementation for the PresentationSurface trait.

use eframe::egui;
use questionnaire::{
    CompletionSink, PresentationSurface, Questionnaire, Response, Selection, ViewNode, layout,
};
use thiserror::Error;
use tracing::debug;

const DEFAULT_TITLE: &str = "Client Questionnaire";

/// Visible rows of the free-text field under each question.
const CUSTOM_TEXT_ROWS: usize = 2;

/// Error type for the Egui surface.
#[derive(Debug, Error)]
pub enum EguiFormError {
    /// An error occurred in the egui/eframe backend.
    #[error("egui error: {0}")]
    Egui(String),
}

/// Builder/configuration for the Egui surface.
#[derive(Debug, Clone)]
pub struct EguiFormSurface {
    /// Window title.
    title: String,
    /// Window size [width, height].
    window_size: [f32; 2],
}

impl Default for EguiFormSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiFormSurface {
    /// Create a new Egui surface with default settings.
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            window_size: [480.0, 640.0],
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the window size.
    pub fn with_window_size(mut self, size: [f32; 2]) -> Self {
        self.window_size = size;
        self
    }
}

/// Returned once the window has closed. Nothing is left to release.
#[derive(Debug)]
pub struct EguiFormHandle;

/// What the human has entered so far.
#[derive(Debug, Clone, PartialEq)]
struct FormState {
    checked: Vec<Vec<bool>>,
    custom: Vec<String>,
    comment: String,
}

impl FormState {
    fn new(questionnaire: &Questionnaire) -> Self {
        Self {
            checked: questionnaire
                .questions()
                .iter()
                .map(|question| vec![false; question.options().len()])
                .collect(),
            custom: vec![String::new(); questionnaire.len()],
            comment: String::new(),
        }
    }

    fn to_response(&self) -> Response {
        let mut response = Response::new(vec![Selection::new(); self.checked.len()]);
        for ((selection, checked), custom) in response
            .answers
            .iter_mut()
            .zip(&self.checked)
            .zip(&self.custom)
        {
            selection.checked = checked
                .iter()
                .enumerate()
                .filter_map(|(i, &c)| c.then_some(i))
                .collect();
            if !custom.is_empty() {
                selection.set_custom_text(custom.as_str());
            }
        }
        response.comment = (!self.comment.is_empty()).then(|| self.comment.clone());
        response
    }
}

struct QuestionnaireApp {
    nodes: Vec<ViewNode>,
    form: FormState,
    sink: CompletionSink,
}

impl QuestionnaireApp {
    fn new(questionnaire: &Questionnaire, sink: CompletionSink) -> Self {
        Self {
            nodes: layout(questionnaire),
            form: FormState::new(questionnaire),
            sink,
        }
    }

    fn show(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.viewport().close_requested()) && !self.sink.is_resolved() {
            debug!("questionnaire window closed without submitting");
            self.sink.abandon();
        }

        let mut submitted = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for node in &self.nodes {
                    submitted |= render_node(ui, node, &mut self.form);
                }
            });
        });

        if submitted && self.sink.submit(self.form.to_response()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

/// Draw one node. Returns true when the submit button was clicked.
fn render_node(ui: &mut egui::Ui, node: &ViewNode, form: &mut FormState) -> bool {
    match node {
        ViewNode::Header {
            title,
            author,
            introduction,
        } => {
            ui.heading(title);
            ui.label(egui::RichText::new(format!("from {author}")).italics());
            ui.add_space(4.0);
            ui.label(introduction);
        }
        ViewNode::Separator => {
            ui.separator();
        }
        ViewNode::Question { index, text } => {
            ui.add_space(8.0);
            ui.strong(format!("{}. {}", index + 1, text));
        }
        ViewNode::Option {
            question,
            option,
            label,
        } => {
            if let Some(checked) = form
                .checked
                .get_mut(*question)
                .and_then(|options| options.get_mut(*option))
            {
                ui.checkbox(checked, label);
            }
        }
        ViewNode::CustomText { question } => {
            if let Some(text) = form.custom.get_mut(*question) {
                ui.add(
                    egui::TextEdit::multiline(text)
                        .desired_rows(CUSTOM_TEXT_ROWS)
                        .hint_text("Other"),
                );
            }
        }
        ViewNode::Comment { prompt } => {
            ui.add_space(8.0);
            ui.label(prompt);
            ui.text_edit_multiline(&mut form.comment);
        }
        ViewNode::Submit { label } => {
            return ui.button(label).clicked();
        }
    }
    false
}

impl eframe::App for QuestionnaireApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

impl PresentationSurface for EguiFormSurface {
    type Handle = EguiFormHandle;
    type Error = EguiFormError;

    fn render(
        &self,
        questionnaire: &Questionnaire,
        sink: CompletionSink,
    ) -> Result<Self::Handle, Self::Error> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.title.clone())
                .with_inner_size(self.window_size),
            ..Default::default()
        };

        debug!(title = questionnaire.title(), "opening questionnaire window");
        // run_native blocks until the window is closed
        let app = QuestionnaireApp::new(questionnaire, sink.clone());
        eframe::run_native(
            &self.title,
            options,
            Box::new(move |_cc| Ok(Box::new(app) as Box<dyn eframe::App>)),
        )
        .map_err(|e| EguiFormError::Egui(e.to_string()))?;

        // Window gone without either path resolving, e.g. killed by the window manager
        if !sink.is_resolved() {
            sink.abandon();
        }

        Ok(EguiFormHandle)
    }

    fn dispose(&self, _handle: Self::Handle) {
        debug!("egui form already closed");
    }
}
