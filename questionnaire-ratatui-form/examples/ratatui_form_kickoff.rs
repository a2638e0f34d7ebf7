//! Kickoff - terminal form example
//!
//! Shows the website redesign kickoff questionnaire in the terminal and prints
//! the transcript once the form is submitted. The form is drawn on stderr.
//!
//! Run with: cargo run -p questionnaire-ratatui-form --example ratatui_form_kickoff

use example_questionnaires::project_kickoff;
use questionnaire::Session;
use questionnaire_ratatui_form::{RatatuiFormSurface, Theme};
use ratatui::style::Color;

fn main() -> anyhow::Result<()> {
    let theme = Theme {
        primary: Color::LightBlue,
        highlight: Color::LightYellow,
        ..Theme::default()
    };
    let surface = RatatuiFormSurface::new().with_theme(theme);

    let transcript = Session::open(project_kickoff()?, &surface)?.await_result()?;
    println!("{transcript}");
    Ok(())
}
