mod categorize_question;
mod follow_up_question;
mod generate_answer;

pub use categorize_question::*;
pub use follow_up_question::*;
pub use generate_answer::*;
