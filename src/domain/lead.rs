// ==========================================
// 营销活动数据导入 - 线索实体
// ==========================================
// 职责: 线索名单行 → 统一线索记录（PT/EN 多版本表头对齐后）
// 红线: 一行源数据只产生一条线索记录，提取阶段不拆分、不合并
// ==========================================

use crate::domain::types::LeadStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// LeadRecord - 统一线索记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub campaign: String,
    pub linkedin: Option<String>,
    pub name: String,
    pub position: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub connection_date: Option<String>,
    pub sequence_date: Option<String>,
    pub status: LeadStatus,
    /// 状态相关的可选字段
    pub details: LeadDetails,
}

// ==========================================
// LeadDetails - 按回复信号区分的可选字段
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum LeadDetails {
    /// 有正向回复日期
    Positive(PositiveDetails),
    /// 有负向回复日期（仅在无正向回复时判定）
    Negative(NegativeDetails),
    /// 无任何回复信号，所有可选字段为空
    NoSignal(PositiveDetails),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositiveDetails {
    pub positive_response_date: Option<String>,
    pub transfer_date: Option<String>,
    pub status_details: Option<String>,
    pub phone: Option<String>,
    pub had_follow_up: bool,
    pub follow_up_reason: Option<String>,
    pub observations: Option<String>,
    pub meeting_date: Option<String>,
    pub attended_meeting: bool,
    pub proposal_date: Option<String>,
    pub proposal_value: Option<String>,
    pub sale_date: Option<String>,
    pub sale_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NegativeDetails {
    pub negative_response_date: Option<String>,
    pub transfer_date: Option<String>,
    pub status_details: Option<String>,
    pub had_follow_up: bool,
    pub follow_up_reason: Option<String>,
    pub observations: Option<String>,
}

// ==========================================
// SkippedLeadRow - 跳过的行（非致命告警）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLeadRow {
    /// 数据行号（从 1 开始，不含表头）
    pub row_number: usize,
    pub reason: String,
}

// ==========================================
// LeadImport - 线索提取结果
// ==========================================
// non_negative_leads 同时包含正向回复与无信号行，依靠 status/details 区分
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadImport {
    pub non_negative_leads: Vec<LeadRecord>,
    pub negative_leads: Vec<LeadRecord>,
    pub skipped: Vec<SkippedLeadRow>,
}

impl LeadImport {
    /// 已保留的线索总数（两个集合之和）
    pub fn total_leads(&self) -> usize {
        self.non_negative_leads.len() + self.negative_leads.len()
    }

    /// 已确认正向回复的线索
    pub fn confirmed_positive(&self) -> impl Iterator<Item = &LeadRecord> {
        self.non_negative_leads
            .iter()
            .filter(|lead| matches!(lead.details, LeadDetails::Positive(_)))
    }
}
