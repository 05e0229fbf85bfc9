// ==========================================
// 营销活动数据导入 - 线索提取器
// ==========================================
// 职责: 线索名单 CSV → 统一线索记录
// 流程: 严格 CSV 解析 → 姓名解析 → 字段对齐 → 回复信号分类
// 红线: 结构错误整体失败（不返回部分结果）
//       缺姓名的行跳过并告警，不中断批次
// ==========================================

use crate::domain::lead::{
    LeadDetails, LeadImport, LeadRecord, NegativeDetails, PositiveDetails, SkippedLeadRow,
};
use crate::domain::parsed_file::ParsedFile;
use crate::domain::types::{FileType, LeadStatus};
use crate::i18n;
use crate::importer::error::ImportResult;
use crate::importer::field_synonyms as syn;
use csv::{ReaderBuilder, Trim};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, instrument, warn};

/// 连接日期哨兵值（大小写不敏感）
const CONNECTION_DATE_SENTINELS: [&str; 2] = ["never", ""];

fn connected_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Connected:\s*(\S+)").expect("连接日期正则无效"))
}

fn filter_sentinel(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let lowered = trimmed.to_lowercase();
    if CONNECTION_DATE_SENTINELS.contains(&lowered.as_str()) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ==========================================
// LeadExtractor - 线索提取器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadExtractor;

impl LeadExtractor {
    /// 解析线索 CSV 文本
    ///
    /// # 参数
    /// - csv_text: CSV 全文（需含表头）
    /// - file_name: 文件名（用于回退活动名称）
    ///
    /// # 返回
    /// - Ok(LeadImport): 非负向线索 / 负向线索 / 跳过行
    /// - Err(StructuralParse): 行长度不一致等结构错误
    #[instrument(skip(self, csv_text, file_name), fields(file_name = file_name.unwrap_or("")))]
    pub fn parse_leads_csv(
        &self,
        csv_text: &str,
        file_name: Option<&str>,
    ) -> ImportResult<LeadImport> {
        let text = csv_text.strip_prefix('\u{feff}').unwrap_or(csv_text);
        let rows = read_strict_rows(text)?;
        debug!(rows = rows.len(), "线索 CSV 解析完成");

        Ok(self.extract_rows(&rows, file_name))
    }

    /// 从导入的线索名单文件提取线索
    ///
    /// # 规则
    /// - CSV 且保留了原文: 按严格规则重新解析（引号内逗号、结构错误）
    /// - 其他（Excel）: 直接使用已解析的行
    pub fn extract_file(&self, file: &ParsedFile) -> ImportResult<LeadImport> {
        match (file.file_type, file.source_text.as_deref()) {
            (FileType::Csv, Some(text)) => self.parse_leads_csv(text, Some(file.name.as_str())),
            _ => Ok(self.extract_parsed(file)),
        }
    }

    /// 从已解析的行提取线索（Excel 线索名单使用此入口）
    pub fn extract_parsed(&self, file: &ParsedFile) -> LeadImport {
        let rows: Vec<HashMap<String, String>> = file
            .data
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(k, v)| (k.clone(), v.as_text().trim().to_string()))
                    .collect()
            })
            .collect();
        self.extract_rows(&rows, Some(file.name.as_str()))
    }

    fn extract_rows(&self, rows: &[HashMap<String, String>], file_name: Option<&str>) -> LeadImport {
        let fallback_campaign = file_name.map(campaign_from_file_name).unwrap_or_default();

        let mut result = LeadImport::default();
        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;
            match self.extract_lead(row, &fallback_campaign) {
                Some(lead) => match lead.status {
                    LeadStatus::Negative => result.negative_leads.push(lead),
                    LeadStatus::Pending => result.non_negative_leads.push(lead),
                },
                None => {
                    warn!(row_number, "线索行缺少姓名，已跳过");
                    result.skipped.push(SkippedLeadRow {
                        row_number,
                        reason: i18n::t_with_args(
                            "leads.missing_name",
                            &[("row", &row_number.to_string())],
                        ),
                    });
                }
            }
        }

        info!(
            non_negative = result.non_negative_leads.len(),
            negative = result.negative_leads.len(),
            skipped = result.skipped.len(),
            "线索提取完成"
        );
        result
    }

    /// 单行 → 线索记录（姓名无法解析时返回 None）
    pub fn extract_lead(
        &self,
        row: &HashMap<String, String>,
        fallback_campaign: &str,
    ) -> Option<LeadRecord> {
        let name = resolve_name(row)?;

        let campaign = syn::CAMPAIGN
            .lookup_owned(row)
            .unwrap_or_else(|| fallback_campaign.to_string());

        let (status, details) = classify_details(row);

        Some(LeadRecord {
            campaign,
            linkedin: syn::LINKEDIN.lookup_owned(row),
            name,
            position: syn::POSITION.lookup_owned(row),
            company: syn::COMPANY.lookup_owned(row),
            source: syn::SOURCE.lookup_owned(row),
            connection_date: resolve_connection_date(row),
            sequence_date: syn::SEQUENCE_DATE.lookup_owned(row),
            status,
            details,
        })
    }
}

/// 严格 CSV 解析（支持引号内逗号/换行；行长度不一致即失败）
fn read_strict_rows(text: &str) -> ImportResult<Vec<HashMap<String, String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(record.iter().map(|v| v.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// 文件名 → 活动名称（去扩展名，下划线转空格）
pub fn campaign_from_file_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    stem.replace('_', " ")
}

/// 姓名: 直接姓名列，否则 名 + 空格 + 姓
fn resolve_name(row: &HashMap<String, String>) -> Option<String> {
    if let Some(name) = syn::NAME.lookup(row) {
        return Some(name.to_string());
    }

    let first = syn::FIRST_NAME.lookup(row).unwrap_or("");
    let last = syn::LAST_NAME.lookup(row).unwrap_or("");
    let joined = format!("{} {}", first, last).trim().to_string();
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// 连接日期: Connected At 列优先，否则从旧版 Messages 列中提取 "Connected: xxx"
fn resolve_connection_date(row: &HashMap<String, String>) -> Option<String> {
    if let Some(value) = syn::CONNECTED_AT.lookup(row).and_then(filter_sentinel) {
        return Some(value);
    }

    let messages = syn::MESSAGES.lookup(row)?;
    connected_pattern()
        .captures(messages)
        .and_then(|caps| caps.get(1))
        .and_then(|m| filter_sentinel(m.as_str()))
}

/// 回复信号分类
///
/// # 规则
/// - 有正向回复日期 → Pending + Positive
/// - 否则有负向回复日期 → Negative
/// - 都没有 → Pending + NoSignal（可选字段全部为空/false）
fn classify_details(row: &HashMap<String, String>) -> (LeadStatus, LeadDetails) {
    if let Some(date) = syn::POSITIVE_RESPONSE_DATE.lookup_owned(row) {
        let details = PositiveDetails {
            positive_response_date: Some(date),
            transfer_date: syn::TRANSFER_DATE.lookup_owned(row),
            status_details: syn::STATUS_DETAILS.lookup_owned(row),
            phone: syn::PHONE.lookup_owned(row),
            had_follow_up: syn::HAD_FOLLOW_UP.lookup_flag(row),
            follow_up_reason: syn::FOLLOW_UP_REASON.lookup_owned(row),
            observations: syn::OBSERVATIONS.lookup_owned(row),
            meeting_date: syn::MEETING_DATE.lookup_owned(row),
            attended_meeting: syn::ATTENDED_MEETING.lookup_flag(row),
            proposal_date: syn::PROPOSAL_DATE.lookup_owned(row),
            proposal_value: syn::PROPOSAL_VALUE.lookup_owned(row),
            sale_date: syn::SALE_DATE.lookup_owned(row),
            sale_value: syn::SALE_VALUE.lookup_owned(row),
        };
        return (LeadStatus::Pending, LeadDetails::Positive(details));
    }

    if let Some(date) = syn::NEGATIVE_RESPONSE_DATE.lookup_owned(row) {
        let details = NegativeDetails {
            negative_response_date: Some(date),
            transfer_date: syn::TRANSFER_DATE.lookup_owned(row),
            status_details: syn::STATUS_DETAILS.lookup_owned(row),
            had_follow_up: syn::HAD_FOLLOW_UP.lookup_flag(row),
            follow_up_reason: syn::FOLLOW_UP_REASON.lookup_owned(row),
            observations: syn::OBSERVATIONS.lookup_owned(row),
        };
        return (LeadStatus::Negative, LeadDetails::Negative(details));
    }

    (LeadStatus::Pending, LeadDetails::NoSignal(PositiveDetails::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;

    #[test]
    fn test_positive_row_without_name_is_skipped() {
        let csv = "Nome,Empresa,Data Resposta Positiva\n,Acme,2025-01-10\n";
        let result = LeadExtractor.parse_leads_csv(csv, None).unwrap();
        assert_eq!(result.total_leads(), 0);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].row_number, 1);
    }

    #[test]
    fn test_row_without_signal_is_pending_with_defaults() {
        let csv = "Name,Company\nAna Souza,Acme\n";
        let result = LeadExtractor.parse_leads_csv(csv, None).unwrap();
        assert_eq!(result.non_negative_leads.len(), 1);
        let lead = &result.non_negative_leads[0];
        assert_eq!(lead.status, LeadStatus::Pending);
        assert_eq!(lead.details, LeadDetails::NoSignal(PositiveDetails::default()));
        assert_eq!(lead.connection_date, None);
    }

    #[test]
    fn test_positive_wins_over_negative() {
        let csv = "Nome,Data Resposta Positiva,Data Resposta Negativa,Teve Follow Up\n\
                   Ana,2025-01-10,2025-01-12,Sim\n";
        let result = LeadExtractor.parse_leads_csv(csv, None).unwrap();
        assert_eq!(result.negative_leads.len(), 0);
        match &result.non_negative_leads[0].details {
            LeadDetails::Positive(d) => {
                assert_eq!(d.positive_response_date.as_deref(), Some("2025-01-10"));
                assert!(d.had_follow_up);
            }
            other => panic!("期望 Positive，实际 {:?}", other),
        }
    }

    #[test]
    fn test_negative_row() {
        let csv = "Name,Negative Response Date\nBruno,2025-02-01\n";
        let result = LeadExtractor.parse_leads_csv(csv, None).unwrap();
        assert_eq!(result.negative_leads.len(), 1);
        assert_eq!(result.negative_leads[0].status, LeadStatus::Negative);
    }

    #[test]
    fn test_first_last_name_concatenation() {
        let csv = "First Name,Last Name\nCarla,Dias\nEduardo,\n";
        let result = LeadExtractor.parse_leads_csv(csv, None).unwrap();
        assert_eq!(result.non_negative_leads[0].name, "Carla Dias");
        assert_eq!(result.non_negative_leads[1].name, "Eduardo");
    }

    #[test]
    fn test_campaign_fallback_to_file_name() {
        let csv = "Name\nAna\n";
        let result = LeadExtractor
            .parse_leads_csv(csv, Some("outbound_q1_2025.csv"))
            .unwrap();
        assert_eq!(result.non_negative_leads[0].campaign, "outbound q1 2025");

        let result = LeadExtractor.parse_leads_csv(csv, None).unwrap();
        assert_eq!(result.non_negative_leads[0].campaign, "");
    }

    #[test]
    fn test_connection_date_sentinel_and_messages_fallback() {
        let csv = "Name,Connected At,Messages\n\
                   Ana,Never,\"Connected: 2025-01-03 Hello\"\n\
                   Bia,2025-01-05,\n\
                   Caio,,Connected: never\n";
        let result = LeadExtractor.parse_leads_csv(csv, None).unwrap();
        let leads = &result.non_negative_leads;
        assert_eq!(leads[0].connection_date.as_deref(), Some("2025-01-03"));
        assert_eq!(leads[1].connection_date.as_deref(), Some("2025-01-05"));
        assert_eq!(leads[2].connection_date, None);
    }

    #[test]
    fn test_quoted_commas_are_preserved() {
        let csv = "Name,Company\n\"Souza, Ana\",\"Acme, Inc\"\n";
        let result = LeadExtractor.parse_leads_csv(csv, None).unwrap();
        assert_eq!(result.non_negative_leads[0].name, "Souza, Ana");
        assert_eq!(result.non_negative_leads[0].company.as_deref(), Some("Acme, Inc"));
    }

    #[test]
    fn test_structural_error_is_fatal() {
        let csv = "Name,Company\nAna,Acme\nBruno,Beta,extra\n";
        let err = LeadExtractor.parse_leads_csv(csv, None).unwrap_err();
        assert!(matches!(err, ImportError::StructuralParse { .. }));
    }

    #[test]
    fn test_extract_file_reparses_csv_source_strictly() {
        use crate::importer::file_parser::CsvParser;

        let text = "Name,Company\n\"Souza, Ana\",\"Acme, Inc\"\n";
        let file = CsvParser.parse_text("roster.csv", text);
        let result = LeadExtractor.extract_file(&file).unwrap();
        assert_eq!(result.non_negative_leads[0].name, "Souza, Ana");
        assert_eq!(result.non_negative_leads[0].company.as_deref(), Some("Acme, Inc"));

        let ragged = CsvParser.parse_text("roster.csv", "Name,Company\nAna,Acme,extra\n");
        assert!(matches!(
            LeadExtractor.extract_file(&ragged),
            Err(ImportError::StructuralParse { .. })
        ));
    }

    #[test]
    fn test_extract_parsed_uses_file_name_for_campaign() {
        use crate::importer::file_parser::CsvParser;
        let file = CsvParser.parse_text("spring_push.xlsx", "Nome,Empresa\nAna,Acme\n,Beta\n");
        let result = LeadExtractor.extract_parsed(&file);
        assert_eq!(result.non_negative_leads.len(), 1);
        assert_eq!(result.non_negative_leads[0].campaign, "spring push");
        assert_eq!(result.skipped.len(), 1);
    }
}
