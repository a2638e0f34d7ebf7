pub mod color;
pub mod kickoff;
pub mod open_ended;

pub use color::color_preference;
pub use kickoff::project_kickoff;
pub use open_ended::{no_questions, open_ended};
