// ==========================================
// 营销活动数据导入 - 领域类型定义
// ==========================================
// 职责: 文件类型 / 识别结果类型 / 合并方式 / 线索状态 / 指标类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 文件类型 (File Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Csv,
    Excel,
}

impl FileType {
    /// 根据扩展名判定文件类型（大小写不敏感）
    ///
    /// # 返回
    /// - Some(FileType): csv / xlsx / xls
    /// - None: 不支持的扩展名
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().to_lowercase().as_str() {
            "csv" => Some(FileType::Csv),
            "xlsx" | "xls" => Some(FileType::Excel),
            _ => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Csv => write!(f, "csv"),
            FileType::Excel => write!(f, "excel"),
        }
    }
}

// ==========================================
// 表格类型识别结果 (CSV Type)
// ==========================================
// 序列化格式: kebab-case (campaign-input / leads / unknown)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CsvType {
    CampaignInput, // 活动指标导出
    Leads,         // 线索名单
    Unknown,       // 无法识别
}

impl fmt::Display for CsvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvType::CampaignInput => write!(f, "campaign-input"),
            CsvType::Leads => write!(f, "leads"),
            CsvType::Unknown => write!(f, "unknown"),
        }
    }
}

// ==========================================
// 合并键类型 (Merge Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeType {
    LeadName,    // 按线索姓名
    CompanyName, // 按公司名称
}

impl fmt::Display for MergeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeType::LeadName => write!(f, "lead-name"),
            MergeType::CompanyName => write!(f, "company-name"),
        }
    }
}

// ==========================================
// 合并方式 (Merge Mode)
// ==========================================
// 调用方二选一: 纵向拼接 / 按合并键左连接
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode", content = "merge_type")]
pub enum MergeMode {
    Concatenate,
    LeftJoin(MergeType),
}

// ==========================================
// 线索状态 (Lead Status)
// ==========================================
// 正向回复也初始化为 Pending，由人工审核后再流转
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    Pending,
    Negative,
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadStatus::Pending => write!(f, "pending"),
            LeadStatus::Negative => write!(f, "negative"),
        }
    }
}

// ==========================================
// 活动指标类型 (Metric Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Visits,
    Invitations,
    Connections,
    Messages,
    Likes,
    Comments,
    #[serde(rename = "follow_up_1")]
    FollowUp1,
    #[serde(rename = "follow_up_2")]
    FollowUp2,
    #[serde(rename = "follow_up_3")]
    FollowUp3,
    PositiveResponses,
    Meetings,
    Proposals,
    Sales,
}

impl MetricKind {
    /// 周汇总时 follow-up 计入 messages
    pub fn weekly_bucket(self) -> MetricKind {
        match self {
            MetricKind::FollowUp1 | MetricKind::FollowUp2 | MetricKind::FollowUp3 => {
                MetricKind::Messages
            }
            other => other,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            MetricKind::Visits => "visits",
            MetricKind::Invitations => "invitations",
            MetricKind::Connections => "connections",
            MetricKind::Messages => "messages",
            MetricKind::Likes => "likes",
            MetricKind::Comments => "comments",
            MetricKind::FollowUp1 => "follow_up_1",
            MetricKind::FollowUp2 => "follow_up_2",
            MetricKind::FollowUp3 => "follow_up_3",
            MetricKind::PositiveResponses => "positive_responses",
            MetricKind::Meetings => "meetings",
            MetricKind::Proposals => "proposals",
            MetricKind::Sales => "sales",
        };
        write!(f, "{}", key)
    }
}
