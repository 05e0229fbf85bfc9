// ==========================================
// 营销活动数据导入 - 配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use std::path::PathBuf;

// ==========================================
// IngestConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 JSON 文件读取）
pub trait IngestConfigReader: Send + Sync {
    /// 线索词表最少命中数
    ///
    /// # 默认值
    /// - 3
    fn leads_min_matches(&self) -> usize;

    /// 仅靠回复信号列判定为线索时的置信度
    ///
    /// # 默认值
    /// - 0.9
    fn leads_signal_confidence(&self) -> f64;

    /// 批量解析最大并发数
    ///
    /// # 默认值
    /// - 4
    fn max_concurrent_parses(&self) -> usize;

    /// 界面语言
    fn locale(&self) -> String;

    /// 日志过滤器
    fn log_filter(&self) -> String;

    /// 会话文件路径
    fn session_file(&self) -> PathBuf;
}
