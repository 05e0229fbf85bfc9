// ==========================================
// 营销活动数据导入 - 导入配置项
// ==========================================
// 职责: 配置项定义与默认值
// 存储: JSON 文件（缺失字段取默认值）
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 配置键（用于错误信息与快照）
pub mod config_keys {
    pub const LEADS_MIN_MATCHES: &str = "leads_min_matches";
    pub const LEADS_SIGNAL_CONFIDENCE: &str = "leads_signal_confidence";
    pub const MAX_CONCURRENT_PARSES: &str = "max_concurrent_parses";
    pub const LOCALE: &str = "locale";
    pub const LOG_FILTER: &str = "log_filter";
    pub const SESSION_FILE: &str = "session_file";
}

// ==========================================
// IngestConfig - 导入配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// 线索词表最少命中数（默认 3）
    pub leads_min_matches: usize,
    /// 仅靠回复信号列判定为线索时的置信度（默认 0.9）
    pub leads_signal_confidence: f64,
    /// 批量解析最大并发数（默认 4）
    pub max_concurrent_parses: usize,
    /// 界面语言（默认 pt-BR）
    pub locale: String,
    /// 日志过滤器，RUST_LOG 优先（默认 info）
    pub log_filter: String,
    /// 会话文件路径（None 时使用数据目录下的默认位置）
    pub session_file: Option<PathBuf>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            leads_min_matches: 3,
            leads_signal_confidence: 0.9,
            max_concurrent_parses: 4,
            locale: "pt-BR".to_string(),
            log_filter: "info".to_string(),
            session_file: None,
        }
    }
}
