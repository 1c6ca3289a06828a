mod answer;
mod category;
mod chat_message;
mod completion;

pub use answer::*;
pub use category::*;
pub use chat_message::*;
pub use completion::*;
