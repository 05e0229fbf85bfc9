// ==========================================
// 营销活动数据导入 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、快照
// 查找顺序: 显式路径 → 环境变量 CAMPAIGN_INGEST_CONFIG → 用户配置目录 → 默认值
// ==========================================

use crate::config::ingest_config::{config_keys, IngestConfig};
use crate::config::ingest_config_trait::IngestConfigReader;
use crate::importer::error::{ImportError, ImportResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "CAMPAIGN_INGEST_CONFIG";

const APP_DIR_NAME: &str = "campaign-ingest";
const CONFIG_FILE_NAME: &str = "config.json";
const SESSION_FILE_NAME: &str = "session.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: IngestConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self {
            config: IngestConfig::default(),
            source: None,
        }
    }

    /// 由已有配置创建（会校验）
    pub fn from_config(config: IngestConfig) -> ImportResult<Self> {
        validate(&config)?;
        Ok(Self {
            config,
            source: None,
        })
    }

    /// 从 JSON 文件加载
    ///
    /// # 返回
    /// - Ok(ConfigManager): 加载并校验通过
    /// - Err(ConfigReadError): 文件不可读或 JSON 格式错误
    /// - Err(ConfigValueError): 配置值越界
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: IngestConfig =
            serde_json::from_str(&raw).map_err(|e| ImportError::ConfigReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        validate(&config)?;

        info!(path = %path.display(), "配置文件加载完成");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 按查找顺序加载配置
    ///
    /// # 参数
    /// - explicit: 显式指定的配置文件（存在时必须可读）
    pub fn load(explicit: Option<&Path>) -> ImportResult<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
            if !env_path.trim().is_empty() {
                return Self::from_path(Path::new(env_path.trim()));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => {
                debug!("未找到配置文件，使用默认配置");
                Ok(Self::with_defaults())
            }
        }
    }

    /// 当前配置
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// 配置来源文件（默认配置时为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 获取配置快照（JSON格式）
    pub fn get_config_snapshot(&self) -> ImportResult<String> {
        serde_json::to_string_pretty(&self.config).map_err(|e| ImportError::ConfigValueError {
            key: "*".to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl IngestConfigReader for ConfigManager {
    fn leads_min_matches(&self) -> usize {
        self.config.leads_min_matches
    }

    fn leads_signal_confidence(&self) -> f64 {
        self.config.leads_signal_confidence
    }

    fn max_concurrent_parses(&self) -> usize {
        self.config.max_concurrent_parses
    }

    fn locale(&self) -> String {
        self.config.locale.clone()
    }

    fn log_filter(&self) -> String {
        self.config.log_filter.clone()
    }

    fn session_file(&self) -> PathBuf {
        self.config
            .session_file
            .clone()
            .or_else(default_session_path)
            .unwrap_or_else(|| PathBuf::from(SESSION_FILE_NAME))
    }
}

/// 用户配置目录下的默认配置文件
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// 用户数据目录下的默认会话文件
pub fn default_session_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join(SESSION_FILE_NAME))
}

fn validate(config: &IngestConfig) -> ImportResult<()> {
    if config.max_concurrent_parses == 0 {
        return Err(ImportError::ConfigValueError {
            key: config_keys::MAX_CONCURRENT_PARSES.to_string(),
            message: "必须大于 0".to_string(),
        });
    }
    if config.leads_min_matches == 0 {
        return Err(ImportError::ConfigValueError {
            key: config_keys::LEADS_MIN_MATCHES.to_string(),
            message: "必须大于 0".to_string(),
        });
    }
    if !(0.0..=1.0).contains(&config.leads_signal_confidence) {
        return Err(ImportError::ConfigValueError {
            key: config_keys::LEADS_SIGNAL_CONFIDENCE.to_string(),
            message: format!("超出范围 [0, 1]: {}", config.leads_signal_confidence),
        });
    }
    if config.locale.trim().is_empty() {
        return Err(ImportError::ConfigValueError {
            key: config_keys::LOCALE.to_string(),
            message: "不能为空".to_string(),
        });
    }
    Ok(())
}
