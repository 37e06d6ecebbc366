use serde::Deserialize;
use std::path::Path;

use crate::error::{AppResult, FileError};

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 单次导入最多处理的题目数量（防止外部调用超量）
    pub max_questions: usize,
    /// 每处理多少道题暂停一次（外部服务限流礼让）
    pub pause_every: usize,
    /// 暂停时长（毫秒），测试可配置为 0
    pub pause_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 待导入文件存放目录
    pub input_folder: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    /// 答案生成使用的模型
    pub llm_answer_model: String,
    /// 题目分类使用的模型
    pub llm_classify_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_questions: 100,
            pause_every: 5,
            pause_ms: 1000,
            verbose_logging: false,
            input_folder: "uploads".to_string(),
            llm_api_key: "26e96c4d312e48feacbd78b7c42bd71e".to_string(),
            llm_api_base_url: "http://menshen.xdf.cn/v1".to_string(),
            llm_answer_model: "qwen2-7b-instruct".to_string(),
            llm_classify_model: "qwen2-7b-instruct".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_questions: std::env::var("MAX_QUESTIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_questions),
            pause_every: std::env::var("PAUSE_EVERY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.pause_every),
            pause_ms: std::env::var("PAUSE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.pause_ms),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(default.input_folder),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_answer_model: std::env::var("LLM_ANSWER_MODEL").unwrap_or(default.llm_answer_model),
            llm_classify_model: std::env::var("LLM_CLASSIFY_MODEL").unwrap_or(default.llm_classify_model),
        }
    }

    /// 从 TOML 配置文件加载
    ///
    /// 文件中未出现的字段使用默认值
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| FileError::ReadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        let config = toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cap_is_100() {
        let config = Config::default();
        assert_eq!(config.max_questions, 100);
        assert_eq!(config.pause_every, 5);
    }

    #[test]
    fn test_from_toml_partial() {
        let config: Config = toml::from_str("max_questions = 10\npause_ms = 0").unwrap();
        assert_eq!(config.max_questions, 10);
        assert_eq!(config.pause_ms, 0);
        // 未指定字段保持默认
        assert_eq!(config.pause_every, 5);
    }
}
