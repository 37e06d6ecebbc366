//! 题目分类服务 - 业务能力层
//!
//! 只负责"判断一道题属于哪个分类"能力，不关心流程。
//! 离线兜底在 `categories` 模块，由流程层决定何时启用。

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;

/// 题目分类能力
#[async_trait]
pub trait ClassifyService: Send + Sync {
    /// 返回题目的分类名称（调用方把"未分类"当作未命中处理）
    async fn classify(&self, question: &str) -> Result<String>;
}

/// 基于 LLM 的分类服务
pub struct LlmClassifyService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

const SYSTEM_PROMPT: &str = "你是一个专业的计算机科学题目分类助手。请分析以下问题，\
                             并只回复一个简短的分类名称，使用常见的计算机科学课程分类，\
                             如：\"数据结构\"、\"算法\"、\"数据库\"、\"编程语言\"、\
                             \"计算机网络\"、\"操作系统\"、\"软件工程\"等。";

impl LlmClassifyService {
    /// 创建新的分类服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_classify_model.clone(),
        }
    }
}

#[async_trait]
impl ClassifyService for LlmClassifyService {
    async fn classify(&self, question: &str) -> Result<String> {
        debug!("调用分类 API，模型: {}", self.model_name);

        let build_request = || -> Result<_, async_openai::error::OpenAIError> {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_PROMPT)
                .build()?;
            let user_msg = ChatCompletionRequestUserMessageArgs::default()
                .content(format!("请分类以下问题: {}", question))
                .build()?;
            // 分类只要一个短名称，低温度 + 小 token 上限
            CreateChatCompletionRequestArgs::default()
                .model(&self.model_name)
                .messages(vec![
                    ChatCompletionRequestMessage::System(system_msg),
                    ChatCompletionRequestMessage::User(user_msg),
                ])
                .temperature(0.3)
                .max_tokens(50u32)
                .build()
        };

        let request = build_request().map_err(|e| LlmError::ApiCallFailed {
            model: self.model_name.clone(),
            source: Box::new(e),
        })?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("分类 API 调用失败: {}", e);
            LlmError::ApiCallFailed {
                model: self.model_name.clone(),
                source: Box::new(e),
            }
        })?;

        let category = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?
            .trim()
            .to_string();

        debug!("AI分类结果: \"{}\"", category);
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试真实 LLM 分类
    ///
    /// 运行方式：
    /// ```bash
    /// cargo test test_classify_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_classify_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::default();
        let service = LlmClassifyService::new(&config);

        let result = service.classify("SELECT语句中WHERE子句的作用是什么？").await;

        match result {
            Ok(category) => {
                println!("\n分类结果: {}", category);
                assert!(!category.is_empty());
            }
            Err(e) => {
                println!("❌ 分类失败: {}", e);
                panic!("测试失败: {}", e);
            }
        }
    }
}
