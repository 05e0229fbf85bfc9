// ==========================================
// 营销活动数据导入 - 活动指标实体
// ==========================================
// 职责: 活动指标导出（Campaign Name / Event Type / Profile Name / Total Count + 日期列）
// ==========================================

use crate::domain::types::MetricKind;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// CampaignMetricRow - 单行指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignMetricRow {
    pub campaign: String,
    pub profile: String,
    pub metric: MetricKind,
    /// 原始 Event Type 文本
    pub event_type: String,
    pub total: u64,
    /// 日期 → 当日计数
    pub daily: BTreeMap<NaiveDate, u64>,
}

// ==========================================
// WeeklyTotals - 周汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTotals {
    /// 周一日期
    pub week_start: NaiveDate,
    pub totals: BTreeMap<MetricKind, u64>,
}

// ==========================================
// CampaignMetricsReport - 指标提取结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignMetricsReport {
    pub rows: Vec<CampaignMetricRow>,
    /// 无法映射到指标的 Event Type（去重，按出现顺序）
    pub unrecognized_event_types: Vec<String>,
}

impl CampaignMetricsReport {
    /// 出现过的活动名称（去重，按出现顺序）
    pub fn campaigns(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for row in &self.rows {
            if !names.contains(&row.campaign) {
                names.push(row.campaign.clone());
            }
        }
        names
    }

    /// 各指标总数（原始指标，不合并 follow-up）
    pub fn funnel_totals(&self) -> BTreeMap<MetricKind, u64> {
        let mut totals = BTreeMap::new();
        for row in &self.rows {
            *totals.entry(row.metric).or_insert(0) += row.total;
        }
        totals
    }

    /// 按周汇总（周一为起点），follow-up 计入 messages
    ///
    /// # 参数
    /// - campaign: 仅汇总指定活动；None 汇总全部
    pub fn weekly_totals(&self, campaign: Option<&str>) -> Vec<WeeklyTotals> {
        let mut weeks: BTreeMap<NaiveDate, BTreeMap<MetricKind, u64>> = BTreeMap::new();

        let selected = self
            .rows
            .iter()
            .filter(|row| campaign.map_or(true, |c| row.campaign == c));

        for row in selected {
            for (date, count) in &row.daily {
                let offset = date.weekday().num_days_from_monday() as i64;
                let week_start = *date - Duration::days(offset);
                *weeks
                    .entry(week_start)
                    .or_default()
                    .entry(row.metric.weekly_bucket())
                    .or_insert(0) += count;
            }
        }

        weeks
            .into_iter()
            .map(|(week_start, totals)| WeeklyTotals { week_start, totals })
            .collect()
    }
}
