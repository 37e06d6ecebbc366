use thiserror::Error;

/// 应用程序错误类型
///
/// 注意：列缺失、单元格越界、选项解析失败等"结构性缺失"不属于错误，
/// 由各级兜底逻辑处理。这里只定义真正需要向调用方报告的失败。
#[derive(Debug, Error)]
pub enum AppError {
    /// 表格数据错误（文件无法解析为表格、数据为空等致命输入问题）
    #[error("表格错误: {0}")]
    Grid(#[from] GridError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 表格数据错误
#[derive(Debug, Error)]
pub enum GridError {
    /// Excel 文件无法解析
    #[error("Excel文件解析失败: {source}")]
    WorkbookParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 工作簿中没有工作表
    #[error("Excel文件中没有工作表")]
    NoWorksheet,
    /// 数据为空或只有标题行
    #[error("Excel数据为空或只包含标题行")]
    NoDataRows,
    /// 没有解析出任何题目
    #[error("无法从Excel数据中解析出题目，请确保格式正确")]
    NoQuestions,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
