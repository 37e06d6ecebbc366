//! 数据模型

pub mod question;

pub use question::{DraftQuestion, ImportSummary, StoredQuestion, UNCATEGORIZED};
