//! Retrospective example - free-text questions in a desktop window.
//!
//! Run with: cargo run -p questionnaire-egui-form --example egui_retrospective

use example_questionnaires::open_ended;
use questionnaire::Session;
use questionnaire_egui_form::EguiFormSurface;

fn main() -> anyhow::Result<()> {
    let surface = EguiFormSurface::new()
        .with_title("Sprint Retrospective")
        .with_window_size([520.0, 480.0]);

    match Session::open(open_ended()?, &surface)?.await_result() {
        Ok(transcript) => println!("{transcript}"),
        Err(err) if err.is_abandoned() => eprintln!("Window closed without submitting."),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
