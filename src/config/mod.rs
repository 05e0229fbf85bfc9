// ==========================================
// 营销活动数据导入 - 配置层
// ==========================================
// 职责: 导入配置加载与读取
// 存储: JSON 文件（用户配置目录）
// ==========================================

pub mod config_manager;
pub mod ingest_config;
pub mod ingest_config_trait;

// 重导出核心配置管理器
pub use config_manager::{default_config_path, default_session_path, ConfigManager, CONFIG_PATH_ENV};
pub use ingest_config::{config_keys, IngestConfig};
pub use ingest_config_trait::IngestConfigReader;
