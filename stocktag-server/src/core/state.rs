use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::mpsc;

use crate::core::Config;
use crate::db::DbService;
use crate::printing::LabelPrintService;
use crate::services::{StubSuggestions, SuggestionProvider};
use crate::utils::AppError;

/// 打印队列容量 (背压上限)
const PRINT_QUEUE_CAPACITY: usize = 256;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc/Clone 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | print_service | 打印任务提交/查询 |
/// | suggestions | 建议生成器 (可注入) |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub print_service: LabelPrintService,
    pub suggestions: Arc<dyn SuggestionProvider>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (数据库、媒体目录)
    /// 2. 数据库连接池 + 迁移
    /// 3. 打印队列与服务
    ///
    /// 返回状态和打印任务接收端（交给后台工作者）。
    pub async fn initialize(config: &Config) -> Result<(Self, mpsc::Receiver<String>), AppError> {
        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;
        }
        std::fs::create_dir_all(config.labels_dir())
            .map_err(|e| AppError::internal(format!("Failed to create media dir: {e}")))?;
        std::fs::create_dir_all(config.items_media_dir())
            .map_err(|e| AppError::internal(format!("Failed to create media dir: {e}")))?;

        let db = DbService::new(&db_path.to_string_lossy()).await?;

        let (job_tx, job_rx) = mpsc::channel(PRINT_QUEUE_CAPACITY);
        let print_service = LabelPrintService::new(db.pool.clone(), job_tx);

        let state = Self {
            config: config.clone(),
            pool: db.pool,
            print_service,
            suggestions: Arc::new(StubSuggestions),
        };

        Ok((state, job_rx))
    }

    /// 公共访问地址 (无尾部斜杠)
    pub fn public_base_url(&self) -> String {
        self.config.public_base_url.trim_end_matches('/').to_string()
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
