// ==========================================
// 营销活动数据导入 - 核心库
// ==========================================
// 职责: CSV / Excel 解析、文件类型识别、线索提取、多文件合并
// 技术栈: Rust + calamine + csv
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 类型定义
pub mod domain;

// 导入层 - 文件解析与识别
pub mod importer;

// 引擎层 - 多文件合并
pub mod engine;

// 配置层
pub mod config;

// 应用层 - 导入会话
pub mod app;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CsvType, FileType, LeadStatus, MergeMode, MergeType, MetricKind};

// 领域实体
pub use domain::{
    CampaignMetricsReport, CellValue, CsvDetectionResult, LeadImport, LeadRecord, MergedTable,
    ParsedFile, Row, UploadedFile,
};

// 导入与合并
pub use engine::MergeEngine;
pub use importer::{
    CampaignMetricsExtractor, FileIngestor, FileIngestorImpl, HeaderClassifier, ImportError,
    ImportResult, LeadExtractor,
};

// 会话与配置
pub use app::IngestSession;
pub use config::{ConfigManager, IngestConfig, IngestConfigReader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "campaign-ingest";
