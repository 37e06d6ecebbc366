use serde::{Deserialize, Serialize};

/// 未分类题目的分类哨兵值
pub const UNCATEGORIZED: &str = "未分类";

/// 从表格行中提取出的题目草稿
///
/// 选项已格式化为 `"A. 内容"` 的形式；`answer` 为空或大写字母串；
/// `category` 可能为空，等待补全流程填充。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftQuestion {
    pub content: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub category: String,
}

impl Default for DraftQuestion {
    fn default() -> Self {
        Self {
            content: String::new(),
            options: Vec::new(),
            answer: String::new(),
            explanation: String::new(),
            category: String::new(),
        }
    }
}

/// 入库后的题目记录
///
/// `id` 由题库存储层分配，导入流程不读取也不生成
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQuestion {
    pub id: u64,
    pub content: String,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
    pub category: String,
    #[serde(default)]
    pub error_count: u32,
}

impl StoredQuestion {
    /// 根据错题次数返回错误等级
    pub fn error_level(&self) -> &'static str {
        match self.error_count {
            0 => "none",
            1..=2 => "low",
            3..=5 => "medium",
            _ => "high",
        }
    }
}

/// 一次导入的处理汇总
///
/// `total_found` 可能大于 `processed_count`（超出上限的题目不处理，
/// 这不是错误，需要在结果消息中如实报告）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// 从文件中发现的题目总数
    pub total_found: usize,
    /// 实际处理的题目数（受上限约束）
    pub processed_count: usize,
    /// 成功入库的题目数
    pub succeeded_count: usize,
}

impl ImportSummary {
    /// 生成用户可见的结果消息
    pub fn message(&self) -> String {
        let mut message = format!("成功处理 {} 道题目", self.processed_count);
        if self.total_found > self.processed_count {
            message += &format!(
                "（共发现 {} 道题目，限制处理数量为 {}）",
                self.total_found, self.processed_count
            );
        }
        message
    }
}
