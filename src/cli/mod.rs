use clap::Subcommand;

use tutorai::Category;

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the AI tutor a question
    Ask {
        question: String,

        /// study, career, exam, other (or 学習, キャリア, 大学受験, その他).
        /// Detected automatically when omitted.
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// Classify a question into a category
    Categorize {
        question: String,
    },

    /// Continue an earlier question/answer exchange
    FollowUp {
        original: String,

        answer: String,

        follow_up: String,
    },
}
