mod level;
mod question;
mod store;

pub use level::Level;
pub use question::{answer_is_true, NormalizedQuestion, QuestionRecord, QuestionSet};
pub use store::{BankSession, LevelCounts, QuestionBank};
