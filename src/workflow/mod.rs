//! 流程层
//!
//! 定义题目草稿从提取到入库的完整补全流程

pub mod enrichment;

pub use enrichment::{EnrichmentPipeline, PacingPolicy};
