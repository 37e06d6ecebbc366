//! 业务能力层
//!
//! 描述"我能做什么"，只处理单个题目：
//! - `answer` - 答案与解析生成能力
//! - `classify` - 题目分类能力
//! - `categories` - 本地关键词分类表（无网络兜底）
//!
//! 能力通过 trait 暴露，流程层不感知具体实现。

pub mod answer;
pub mod categories;
pub mod classify;

pub use answer::{AnswerService, GeneratedAnswer, LlmAnswerService};
pub use classify::{ClassifyService, LlmClassifyService};
