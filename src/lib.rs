//! # Question Import
//!
//! 一个从 Excel / 纯文本题库文件导入题目的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Grid / Models）
//! - `grid` - 表格抽象与 Excel 加载
//! - `models` - 题目草稿、入库记录、导入汇总
//!
//! ### ② 提取层（Extract）
//! - `extract::columns` - 标题行列角色识别
//! - `extract::options` / `extract::content` - 选项提取与题干清理
//! - `extract::row` - 单行到题目草稿的兜底级联
//! - `extract::textfile` - 行式纯文本解析
//!
//! ### ③ 业务能力层（Services / Store）
//! - `services` - 答案生成、题目分类能力（LLM + 本地兜底）
//! - `store` - 题库存储能力
//!
//! ### ④ 流程与编排层（Workflow / App）
//! - `workflow::enrichment` - 草稿补全与入库流水线
//! - `app` - 文件级入口与目录批量导入
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod grid;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use extract::{detect, parse_questions_from_grid, ColumnRoleMap};
pub use grid::{load_grid_from_bytes, Cell, Grid};
pub use models::question::{DraftQuestion, ImportSummary, StoredQuestion, UNCATEGORIZED};
pub use store::{MemoryStore, QuestionStore};
pub use workflow::{EnrichmentPipeline, PacingPolicy};
