// ==========================================
// 营销活动数据导入 - 活动指标提取器
// ==========================================
// 输入: 识别为 campaign-input 的 ParsedFile
// 输出: 每行指标（总数 + 每日计数），供漏斗/趋势视图汇总
// 规则: Event Type 经文本标准化后查词表（PT/EN）；未知类型记录并忽略
// ==========================================

use crate::domain::campaign::{CampaignMetricRow, CampaignMetricsReport};
use crate::domain::parsed_file::{ParsedFile, Row};
use crate::domain::types::MetricKind;
use crate::importer::header_classifier::is_date_header;
use crate::importer::text_normalizer::normalize_str;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Event Type 词表（标准化后小写）→ 指标
pub const EVENT_TYPE_VOCABULARY: &[(&str, MetricKind)] = &[
    ("profile visits", MetricKind::Visits),
    ("visitas ao perfil", MetricKind::Visits),
    ("connection requests sent", MetricKind::Invitations),
    ("convites enviados", MetricKind::Invitations),
    ("solicitacoes de conexao enviadas", MetricKind::Invitations),
    ("connection requests accepted", MetricKind::Connections),
    ("connections made", MetricKind::Connections),
    ("conexoes realizadas", MetricKind::Connections),
    ("conexoes aceitas", MetricKind::Connections),
    ("messages sent", MetricKind::Messages),
    ("mensagens enviadas", MetricKind::Messages),
    ("post likes", MetricKind::Likes),
    ("curtidas em posts", MetricKind::Likes),
    ("curtidas", MetricKind::Likes),
    ("comments done", MetricKind::Comments),
    ("comentarios realizados", MetricKind::Comments),
    ("comentarios", MetricKind::Comments),
    ("follow ups 1", MetricKind::FollowUp1),
    ("follow up 1", MetricKind::FollowUp1),
    ("follow ups 2", MetricKind::FollowUp2),
    ("follow up 2", MetricKind::FollowUp2),
    ("follow ups 3", MetricKind::FollowUp3),
    ("follow up 3", MetricKind::FollowUp3),
    ("positive responses", MetricKind::PositiveResponses),
    ("respostas positivas", MetricKind::PositiveResponses),
    ("meetings", MetricKind::Meetings),
    ("reunioes", MetricKind::Meetings),
    ("proposals", MetricKind::Proposals),
    ("propostas", MetricKind::Proposals),
    ("sales", MetricKind::Sales),
    ("vendas", MetricKind::Sales),
];

/// Event Type 文本 → 指标（大小写、重音、标点不敏感）
pub fn metric_for_event_type(event_type: &str) -> Option<MetricKind> {
    let key = normalize_str(event_type).to_lowercase();
    EVENT_TYPE_VOCABULARY
        .iter()
        .find(|(label, _)| *label == key)
        .map(|(_, metric)| *metric)
}

/// 计数单元格: 非数字或空 → 0
fn parse_count(raw: &str) -> Option<u64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value.round() as u64)
    } else {
        None
    }
}

/// 按标准列名查找表头（精确或子串匹配，大小写不敏感）
fn find_header<'a>(headers: &'a [String], label: &str) -> Option<&'a String> {
    headers.iter().find(|h| {
        let lowered = h.trim().to_lowercase();
        lowered == label || lowered.contains(label)
    })
}

fn text_of(row: &Row, header: Option<&String>) -> String {
    header
        .and_then(|h| row.get(h))
        .map(|v| v.as_text().trim().to_string())
        .unwrap_or_default()
}

// ==========================================
// CampaignMetricsExtractor - 活动指标提取器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CampaignMetricsExtractor;

impl CampaignMetricsExtractor {
    /// 提取活动指标
    ///
    /// # 规则
    /// - 每个 YYYY-MM-DD 列为一日计数
    /// - Total Count 为空或非数字时，取每日计数之和
    pub fn extract(&self, file: &ParsedFile) -> CampaignMetricsReport {
        let campaign_col = find_header(&file.headers, "campaign name");
        let event_col = find_header(&file.headers, "event type");
        let profile_col = find_header(&file.headers, "profile name");
        let total_col = find_header(&file.headers, "total count");

        let date_cols: Vec<(&String, NaiveDate)> = file
            .headers
            .iter()
            .filter(|h| is_date_header(h))
            .filter_map(|h| {
                NaiveDate::parse_from_str(h.trim(), "%Y-%m-%d")
                    .ok()
                    .map(|d| (h, d))
            })
            .collect();

        let mut report = CampaignMetricsReport::default();
        for row in &file.data {
            let event_type = text_of(row, event_col);
            let metric = match metric_for_event_type(&event_type) {
                Some(m) => m,
                None => {
                    if !event_type.is_empty() && !report.unrecognized_event_types.contains(&event_type) {
                        warn!(event_type = %event_type, "未知的 Event Type，已忽略");
                        report.unrecognized_event_types.push(event_type);
                    }
                    continue;
                }
            };

            let daily: BTreeMap<NaiveDate, u64> = date_cols
                .iter()
                .map(|(header, date)| {
                    let count = row
                        .get(*header)
                        .and_then(|v| parse_count(&v.as_text()))
                        .unwrap_or(0);
                    (*date, count)
                })
                .collect();

            let total = parse_count(&text_of(row, total_col))
                .unwrap_or_else(|| daily.values().sum());

            report.rows.push(CampaignMetricRow {
                campaign: text_of(row, campaign_col),
                profile: text_of(row, profile_col),
                metric,
                event_type,
                total,
                daily,
            });
        }

        debug!(
            rows = report.rows.len(),
            date_columns = date_cols.len(),
            unrecognized = report.unrecognized_event_types.len(),
            "活动指标提取完成"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::file_parser::CsvParser;

    const SAMPLE: &str = "Campaign Name,Event Type,Profile Name,Total Count,2025-01-06,2025-01-07,2025-01-13\n\
        Q1,Profile Visits,Ana,10,4,6,0\n\
        Q1,Messages Sent,Ana,3,1,1,1\n\
        Q1,Follow-Ups 1,Ana,,2,,3\n\
        Q1,Unknown Thing,Ana,5,5,0,0\n\
        Q2,Convites Enviados,Bia,7,7,0,0\n";

    fn sample_report() -> CampaignMetricsReport {
        let file = CsvParser.parse_text("metrics.csv", SAMPLE);
        CampaignMetricsExtractor.extract(&file)
    }

    #[test]
    fn test_event_type_vocabulary() {
        assert_eq!(metric_for_event_type("Profile Visits"), Some(MetricKind::Visits));
        assert_eq!(metric_for_event_type("CONEXÕES REALIZADAS"), Some(MetricKind::Connections));
        assert_eq!(metric_for_event_type("Follow-Ups 2"), Some(MetricKind::FollowUp2));
        assert_eq!(metric_for_event_type("Something Else"), None);
    }

    #[test]
    fn test_extract_rows_and_unrecognized() {
        let report = sample_report();
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.unrecognized_event_types, vec!["Unknown Thing".to_string()]);
        assert_eq!(report.campaigns(), vec!["Q1".to_string(), "Q2".to_string()]);
    }

    #[test]
    fn test_total_falls_back_to_daily_sum() {
        let report = sample_report();
        let follow_up = report
            .rows
            .iter()
            .find(|r| r.metric == MetricKind::FollowUp1)
            .unwrap();
        assert_eq!(follow_up.total, 5);
    }

    #[test]
    fn test_weekly_totals_sum_follow_ups_into_messages() {
        let report = sample_report();
        let weeks = report.weekly_totals(Some("Q1"));

        assert_eq!(weeks.len(), 2);
        let first = &weeks[0];
        assert_eq!(first.week_start, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(first.totals.get(&MetricKind::Visits), Some(&10));
        // messages 1 + 1 + follow-up 2
        assert_eq!(first.totals.get(&MetricKind::Messages), Some(&4));
        assert_eq!(first.totals.get(&MetricKind::FollowUp1), None);

        let second = &weeks[1];
        assert_eq!(second.week_start, NaiveDate::from_ymd_opt(2025, 1, 13).unwrap());
        assert_eq!(second.totals.get(&MetricKind::Messages), Some(&4));
    }

    #[test]
    fn test_funnel_totals() {
        let totals = sample_report().funnel_totals();
        assert_eq!(totals.get(&MetricKind::Visits), Some(&10));
        assert_eq!(totals.get(&MetricKind::Invitations), Some(&7));
    }
}
