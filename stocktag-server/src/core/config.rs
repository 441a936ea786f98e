use std::path::PathBuf;

/// 服务器配置 - 标签服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/stocktag | 工作目录 (数据库、媒体、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | PUBLIC_BASE_URL | http://localhost:3000 | 扫码访问的公共地址 |
/// | LABEL_PRINTER | LABEL_PRINTER | 打印目的地名称 (lp -d) |
/// | PRINT_COMMAND | lp | 外部打印命令 |
/// | PRINT_WORKERS | 2 | 并发打印槽位 |
/// | RENDER_DPI | 300 | 标签渲染分辨率 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/stocktag HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、媒体文件和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 公共访问地址 (标签二维码指向这里)
    pub public_base_url: String,
    /// 打印目的地名称
    pub label_printer: String,
    /// 外部打印命令 (测试时可替换)
    pub print_command: String,
    /// 并发打印槽位数
    pub print_workers: usize,
    /// 渲染分辨率 (DPI)
    pub render_dpi: u32,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/stocktag".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            label_printer: std::env::var("LABEL_PRINTER")
                .unwrap_or_else(|_| "LABEL_PRINTER".into()),
            print_command: std::env::var("PRINT_COMMAND").unwrap_or_else(|_| "lp".into()),
            print_workers: std::env::var("PRINT_WORKERS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(2),
            render_dpi: std::env::var("RENDER_DPI")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(300),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn work_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    /// 数据库文件路径 (work_dir/database/stocktag.db)
    pub fn database_path(&self) -> PathBuf {
        self.work_dir_path().join("database/stocktag.db")
    }

    /// 媒体根目录 (上传图片、渲染标签)
    pub fn media_dir(&self) -> PathBuf {
        self.work_dir_path().join("media")
    }

    /// 渲染标签输出目录
    pub fn labels_dir(&self) -> PathBuf {
        self.media_dir().join("labels")
    }

    /// 上传图片目录
    pub fn items_media_dir(&self) -> PathBuf {
        self.media_dir().join("items")
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
