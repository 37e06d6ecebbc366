//! 补全流程
//!
//! 对提取出的题目草稿逐条补全答案和分类，然后入库。
//!
//! ## 流程编排
//! 1. 数量上限裁剪（超出部分不处理，结果消息中报告）
//! 2. 答案缺失 → 答案服务生成，失败时写入保底答案，绝不中断
//! 3. 分类确定：已有分类 > 知识点标注映射 > 在线分类 > 关键词兜底 > 未分类
//! 4. 每处理若干条暂停一次，礼让外部服务
//! 5. 逐条入库
//!
//! 整个流程严格串行，一条失败不影响后续条目。

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::question::{DraftQuestion, ImportSummary, UNCATEGORIZED};
use crate::services::categories;
use crate::services::{AnswerService, ClassifyService};
use crate::store::QuestionStore;

/// 限流节奏
///
/// 每处理 `every` 条暂停 `delay` 毫秒；`every` 为 0 表示不暂停
#[derive(Debug, Clone, Copy)]
pub struct PacingPolicy {
    pub every: usize,
    pub delay_ms: u64,
}

impl PacingPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            every: config.pause_every,
            delay_ms: config.pause_ms,
        }
    }

    /// 测试和离线场景使用：完全不暂停
    pub fn none() -> Self {
        Self {
            every: 0,
            delay_ms: 0,
        }
    }

    async fn maybe_pause(&self, processed: usize) {
        if self.every > 0 && self.delay_ms > 0 && processed % self.every == 0 {
            debug!("已处理 {} 条，暂停 {} 毫秒", processed, self.delay_ms);
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

/// 补全流水线
///
/// 持有能力引用，不持有数据；每次 `run` 处理一批草稿
pub struct EnrichmentPipeline<'a> {
    answer_service: &'a dyn AnswerService,
    classify_service: &'a dyn ClassifyService,
    store: &'a dyn QuestionStore,
    max_questions: usize,
    pacing: PacingPolicy,
}

impl<'a> EnrichmentPipeline<'a> {
    pub fn new(
        config: &Config,
        answer_service: &'a dyn AnswerService,
        classify_service: &'a dyn ClassifyService,
        store: &'a dyn QuestionStore,
    ) -> Self {
        Self {
            answer_service,
            classify_service,
            store,
            max_questions: config.max_questions,
            pacing: PacingPolicy::from_config(config),
        }
    }

    /// 覆盖限流节奏（测试用零延迟）
    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    /// 补全并入库一批草稿
    pub async fn run(&self, drafts: Vec<DraftQuestion>) -> ImportSummary {
        let total_found = drafts.len();
        let process_count = total_found.min(self.max_questions);
        if total_found > process_count {
            warn!(
                "⚠️ 发现 {} 道题目，超出单次处理上限 {}，多余部分跳过",
                total_found, self.max_questions
            );
        }
        info!("📥 开始补全 {} 道题目...", process_count);

        let mut succeeded = 0usize;
        for (i, mut draft) in drafts.into_iter().take(process_count).enumerate() {
            let seq = i + 1;

            if draft.answer.is_empty() {
                self.fill_answer(&mut draft, seq).await;
            }
            if draft.category.is_empty() {
                draft.category = self.resolve_category(&draft.content).await;
            }

            match self.store.insert(draft).await {
                Ok(stored) => {
                    debug!("✓ 第 {}/{} 道题目入库，id={}", seq, process_count, stored.id);
                    succeeded += 1;
                }
                Err(e) => {
                    warn!("❌ 第 {} 道题目入库失败: {}", seq, e);
                }
            }

            self.pacing.maybe_pause(seq).await;
        }

        info!("✓ 补全完成: 入库 {}/{}", succeeded, process_count);
        ImportSummary {
            total_found,
            processed_count: process_count,
            succeeded_count: succeeded,
        }
    }

    /// 生成缺失的答案
    ///
    /// 答案和解析始终成对写入：生成成功用生成结果整体替换，
    /// 失败写入保底答案和致歉说明。生成失败不是流程错误，继续后续条目。
    async fn fill_answer(&self, draft: &mut DraftQuestion, seq: usize) {
        debug!("第 {} 道题目缺少答案，调用答案服务", seq);
        match self.answer_service.generate(&draft.content).await {
            Ok(generated) => {
                draft.answer = generated.answer;
                draft.explanation = generated.explanation;
            }
            Err(e) => {
                warn!("⚠️ 第 {} 道题目答案生成失败: {}", seq, e);
                draft.answer = "分析失败".to_string();
                draft.explanation = format!("无法获取AI解析，请稍后重试。错误信息: {}", e);
            }
        }
    }

    /// 确定分类
    ///
    /// 知识点标注可以完全绕开在线分类；在线分类失败或回答"未分类"
    /// 时退回本地关键词表
    async fn resolve_category(&self, content: &str) -> String {
        if let Some(kp) = categories::extract_knowledge_point(content) {
            if let Some(category) = categories::category_from_knowledge_point(&kp) {
                debug!("根据知识点 \"{}\" 匹配到分类: \"{}\"", kp, category);
                return category;
            }
        }

        match self.classify_service.classify(content).await {
            Ok(category) if !category.is_empty() && category != UNCATEGORIZED => {
                return category;
            }
            Ok(_) => {
                debug!("在线分类未命中，退回关键词分类");
            }
            Err(e) => {
                warn!("⚠️ 在线分类失败: {}，退回关键词分类", e);
            }
        }

        categories::classify_by_keywords(content).unwrap_or_else(|| UNCATEGORIZED.to_string())
    }
}
