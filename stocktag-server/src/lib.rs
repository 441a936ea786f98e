//! StockTag Server - 资产标签与打印服务
//!
//! # 架构概述
//!
//! 本模块是服务主入口，提供以下核心功能：
//!
//! - **资产记录** (`api/items`): 资产 CRUD、图片、二维码
//! - **打印调度** (`printing`): 异步打印队列 + 外部打印命令
//! - **数据库** (`db`): 嵌入式 SQLite 存储
//! - **公共页面** (`api/public`): 扫码访问入口
//!
//! # 模块结构
//!
//! ```text
//! stocktag-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── api/           # HTTP 路由和处理器
//! ├── printing/      # 打印任务提交、工作者、执行器
//! ├── services/      # 建议生成器
//! ├── db/            # 数据库层
//! └── utils/         # 错误、日志、短标识符
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod printing;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use printing::{LabelPrintService, PrintExecutor, PrintWorker};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 工作目录 + 日志)
pub fn setup_environment(config: &Config) -> std::io::Result<()> {
    std::fs::create_dir_all(config.work_dir_path())?;

    let log_dir = config.work_dir_path().join("logs");
    std::fs::create_dir_all(&log_dir)?;
    if config.is_production() {
        init_logger_with_file(None, log_dir.to_str());
    } else {
        init_logger();
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __             __  ______
  / ___// /_____  _____/ /_/_  __/___ _____ _
  \__ \/ __/ __ \/ ___/ //_// / / __ `/ __ `/
 ___/ / /_/ /_/ / /__/ ,<  / / / /_/ / /_/ /
/____/\__/\____/\___/_/|_|/_/  \__,_/\__, /
                                    /____/
    "#
    );
}
