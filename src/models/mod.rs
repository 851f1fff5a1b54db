//! Plain data shared by the session components.

mod answers;
mod file;
mod phase;
mod question;

pub use answers::AnswerMap;
pub use file::{UploadedFile, display_name};
pub use phase::SessionPhase;
pub use question::{OPTION_COUNT, QuestionRecord};
