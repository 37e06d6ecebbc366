//! 应用编排层
//!
//! 组装各层能力，提供"一个文件进，一份汇总出"的入口，
//! 以及扫描目录批量导入的运行模式。

use std::path::Path;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, FileError, GridError};
use crate::extract;
use crate::grid;
use crate::models::question::ImportSummary;
use crate::services::{LlmAnswerService, LlmClassifyService};
use crate::store::{MemoryStore, QuestionStore};
use crate::utils::logging;
use crate::workflow::EnrichmentPipeline;

/// 应用主结构
pub struct App {
    config: Config,
    answer_service: LlmAnswerService,
    classify_service: LlmClassifyService,
    store: MemoryStore,
}

impl App {
    /// 初始化应用
    pub fn new(config: Config) -> Self {
        let answer_service = LlmAnswerService::new(&config);
        let classify_service = LlmClassifyService::new(&config);
        Self {
            config,
            answer_service,
            classify_service,
            store: MemoryStore::new(),
        }
    }

    /// 题库存储（查询用）
    pub fn store(&self) -> &impl QuestionStore {
        &self.store
    }

    /// 导入一份 Excel 文件内容
    ///
    /// 致命错误（无法解析、数据为空、提取不出任何题目）直接返回；
    /// 单条题目的补全失败不致命，反映在汇总数字里。
    pub async fn import_excel_bytes(&self, bytes: &[u8]) -> AppResult<ImportSummary> {
        let grid = grid::load_grid_from_bytes(bytes)?;
        let drafts = extract::parse_questions_from_grid(&grid);
        if drafts.is_empty() {
            return Err(GridError::NoQuestions.into());
        }
        Ok(self.enrich(drafts).await)
    }

    /// 导入一份纯文本内容
    pub async fn import_text(&self, content: &str) -> AppResult<ImportSummary> {
        let drafts = extract::textfile::parse_questions_from_text(content);
        if drafts.is_empty() {
            return Err(AppError::Other(
                "无法从文本中解析出题目，请确保格式正确".to_string(),
            ));
        }
        Ok(self.enrich(drafts).await)
    }

    /// 按扩展名导入一个文件
    pub async fn import_file(&self, path: &Path) -> AppResult<ImportSummary> {
        if !path.exists() {
            return Err(FileError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xls" => {
                let bytes = std::fs::read(path).map_err(|e| FileError::ReadFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })?;
                self.import_excel_bytes(&bytes).await
            }
            _ => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| FileError::ReadFailed {
                        path: path.display().to_string(),
                        source: Box::new(e),
                    })?;
                self.import_text(&content).await
            }
        }
    }

    /// 运行应用主逻辑：扫描目录，逐个导入
    pub async fn run(&self) -> Result<()> {
        logging::log_startup(&self.config);

        let files = scan_input_folder(&self.config.input_folder)?;
        if files.is_empty() {
            warn!("⚠️ 目录 {} 中没有找到待导入的文件，程序结束", self.config.input_folder);
            return Ok(());
        }
        info!("✓ 找到 {} 个待导入的文件", files.len());

        let mut combined = ImportSummary::default();
        for path in &files {
            info!("\n📄 正在导入: {}", path.display());
            match self.import_file(path).await {
                Ok(summary) => {
                    info!("✓ {}", summary.message());
                    combined.total_found += summary.total_found;
                    combined.processed_count += summary.processed_count;
                    combined.succeeded_count += summary.succeeded_count;
                }
                Err(e) => {
                    error!("❌ 导入失败: {}", e);
                }
            }
        }

        self.export_bank_snapshot().await?;
        logging::print_final_stats(&combined);
        Ok(())
    }

    /// 把当前题库内容写成 JSON 快照，供外部系统消费
    async fn export_bank_snapshot(&self) -> Result<()> {
        let questions = self.store.list_all().await?;
        if questions.is_empty() {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&questions)?;
        let out_path = Path::new(&self.config.input_folder).join("question_bank.json");
        std::fs::write(&out_path, json)?;
        info!("💾 题库快照已写入: {}", out_path.display());
        Ok(())
    }

    async fn enrich(&self, drafts: Vec<crate::models::question::DraftQuestion>) -> ImportSummary {
        EnrichmentPipeline::new(
            &self.config,
            &self.answer_service,
            &self.classify_service,
            &self.store,
        )
        .run(drafts)
        .await
    }
}

/// 扫描导入目录，按文件名排序返回支持的文件
fn scan_input_folder(folder: &str) -> Result<Vec<std::path::PathBuf>> {
    let dir = Path::new(folder);
    if !dir.is_dir() {
        warn!("⚠️ 导入目录 {} 不存在", folder);
        return Ok(Vec::new());
    }

    let mut files: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref(),
                Some("xlsx") | Some("xls") | Some("txt")
            )
        })
        .collect();
    files.sort();
    Ok(files)
}
