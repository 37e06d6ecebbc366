use std::path::Path;

use anyhow::Result;
use question_import::utils::logging;
use question_import::{App, Config};

const CONFIG_FILE: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：工作目录下有配置文件时优先，否则回退环境变量
    let config = if Path::new(CONFIG_FILE).exists() {
        Config::from_file(CONFIG_FILE)?
    } else {
        Config::from_env()
    };

    // 初始化日志
    logging::init(&config);

    // 初始化并运行应用
    App::new(config).run().await
}
