// ==========================================
// 营销活动数据导入 - 表头识别器
// ==========================================
// 职责: 根据表头判定文件类型（活动指标 / 线索名单 / 未知）
//       并识别姓名列、公司列
// 规则: 有序规则表，自上而下求值，命中即返回
//       活动指标规则先于线索规则（同时命中时报告 campaign-input）
// ==========================================

use crate::config::IngestConfigReader;
use crate::domain::parsed_file::{CsvDetectionResult, NameColumns};
use crate::domain::types::CsvType;
use regex::Regex;
use std::sync::OnceLock;

// ==========================================
// 词表（静态数据，可独立测试与扩展）
// ==========================================

/// 活动指标导出的四个标准列
pub const CAMPAIGN_INPUT_LABELS: [&str; 4] =
    ["campaign name", "event type", "profile name", "total count"];

/// 线索名单词表（表头子串匹配，每个词最多计 1 次）
pub const LEADS_VOCABULARY: [&str; 11] = [
    "campaign",
    "campanha",
    "linkedin",
    "nome",
    "name",
    "cargo",
    "position",
    "empresa",
    "company",
    "connected at",
    "sequence generated at",
];

/// 正向回复信号列
pub const POSITIVE_SIGNAL_VOCABULARY: [&str; 5] = [
    "data resposta positiva",
    "positive response date",
    "data repasse",
    "transfer date",
    "teve follow up",
];

/// 负向回复信号列
pub const NEGATIVE_SIGNAL_VOCABULARY: [&str; 4] = [
    "data resposta negativa",
    "negative response date",
    "had follow-up",
    "had follow up",
];

/// 公司列词表
pub const COMPANY_VOCABULARY: [&str; 8] = [
    "company",
    "empresa",
    "enterprise",
    "companhia",
    "organization",
    "organizacao",
    "organization name",
    "company name",
];

/// 完整姓名列（精确匹配）
pub const FULL_NAME_EXACT: [&str; 6] = ["nome", "name", "lead", "lead_name", "lead name", "leadname"];

const FIRST_NAME_MARKERS: [&str; 2] = ["first", "primeiro"];
const LAST_NAME_MARKERS: [&str; 4] = ["last", "ultimo", "último", "sobrenome"];
const NAME_MARKERS: [&str; 2] = ["name", "nome"];

fn date_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("日期表头正则无效"))
}

/// 表头是否为 YYYY-MM-DD 日期列
pub fn is_date_header(header: &str) -> bool {
    date_header_regex().is_match(header.trim())
}

/// 表头标准化: 小写 + 去首尾空白
fn lowercase_headers(headers: &[String]) -> Vec<String> {
    headers.iter().map(|h| h.trim().to_lowercase()).collect()
}

/// 精确或子串匹配
fn header_matches(header: &str, label: &str) -> bool {
    header == label || header.contains(label)
}

fn any_header_matches(headers: &[String], label: &str) -> bool {
    headers.iter().any(|h| header_matches(h, label))
}

// ==========================================
// HeaderClassifier - 文件类型识别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderClassifier {
    /// 线索词表最少命中数
    pub leads_min_matches: usize,
    /// 仅靠回复信号列判定为线索时的置信度
    pub leads_signal_confidence: f64,
}

impl Default for HeaderClassifier {
    fn default() -> Self {
        Self {
            leads_min_matches: 3,
            leads_signal_confidence: 0.9,
        }
    }
}

type ClassificationRule = fn(&HeaderClassifier, &[String]) -> Option<CsvDetectionResult>;

impl HeaderClassifier {
    /// 按顺序求值的规则表
    const RULES: [ClassificationRule; 3] = [
        HeaderClassifier::campaign_input_rule,
        HeaderClassifier::leads_vocabulary_rule,
        HeaderClassifier::leads_signal_rule,
    ];

    pub fn from_config<C: IngestConfigReader + ?Sized>(config: &C) -> Self {
        Self {
            leads_min_matches: config.leads_min_matches(),
            leads_signal_confidence: config.leads_signal_confidence(),
        }
    }

    /// 识别文件类型
    ///
    /// # 返回
    /// - campaign-input: 置信度 1.0
    /// - leads: 词表命中数 / 11，或回复信号置信度
    /// - unknown: 置信度 0
    pub fn detect_csv_type(&self, headers: &[String]) -> CsvDetectionResult {
        let lowered = lowercase_headers(headers);
        Self::RULES
            .iter()
            .find_map(|rule| rule(self, &lowered))
            .unwrap_or_else(CsvDetectionResult::unknown)
    }

    /// 规则 1: 四个标准列齐全，或 campaign name + 至少一个日期列
    pub fn campaign_input_rule(&self, headers: &[String]) -> Option<CsvDetectionResult> {
        let has_all_labels = CAMPAIGN_INPUT_LABELS
            .iter()
            .all(|label| any_header_matches(headers, label));
        let has_name_and_dates = any_header_matches(headers, "campaign name")
            && headers.iter().any(|h| is_date_header(h));

        if has_all_labels || has_name_and_dates {
            Some(CsvDetectionResult {
                csv_type: CsvType::CampaignInput,
                confidence: 1.0,
            })
        } else {
            None
        }
    }

    /// 规则 2: 线索词表命中数达到阈值
    pub fn leads_vocabulary_rule(&self, headers: &[String]) -> Option<CsvDetectionResult> {
        let matches = count_leads_vocabulary(headers);
        if matches >= self.leads_min_matches {
            Some(CsvDetectionResult {
                csv_type: CsvType::Leads,
                confidence: matches as f64 / LEADS_VOCABULARY.len() as f64,
            })
        } else {
            None
        }
    }

    /// 规则 3: 存在正向/负向回复信号列
    pub fn leads_signal_rule(&self, headers: &[String]) -> Option<CsvDetectionResult> {
        let has_signal = POSITIVE_SIGNAL_VOCABULARY
            .iter()
            .chain(NEGATIVE_SIGNAL_VOCABULARY.iter())
            .any(|label| any_header_matches(headers, label));

        if has_signal {
            Some(CsvDetectionResult {
                csv_type: CsvType::Leads,
                confidence: self.leads_signal_confidence,
            })
        } else {
            None
        }
    }
}

/// 线索词表命中数（表头需已小写）
pub fn count_leads_vocabulary(lowered_headers: &[String]) -> usize {
    LEADS_VOCABULARY
        .iter()
        .filter(|label| lowered_headers.iter().any(|h| h.contains(*label)))
        .count()
}

/// 使用默认阈值识别文件类型
pub fn detect_csv_type(headers: &[String]) -> CsvDetectionResult {
    HeaderClassifier::default().detect_csv_type(headers)
}

// ==========================================
// 姓名列 / 公司列识别
// ==========================================

/// 识别姓名列
///
/// # 规则
/// - 优先完整姓名列（含 full + name/nome，或精确匹配 nome/name/lead/...）
/// - 无完整姓名列时，分别识别名、姓列
pub fn detect_name_columns(headers: &[String]) -> NameColumns {
    let find = |pred: &dyn Fn(&str) -> bool| -> Option<String> {
        headers
            .iter()
            .find(|h| pred(&h.trim().to_lowercase()))
            .cloned()
    };

    let has_name_marker = |h: &str| NAME_MARKERS.iter().any(|m| h.contains(m));

    let full_name = find(&|h: &str| {
        (h.contains("full") && has_name_marker(h)) || FULL_NAME_EXACT.contains(&h)
    });
    if full_name.is_some() {
        return NameColumns {
            full_name,
            first_name: None,
            last_name: None,
        };
    }

    let first_name = find(&|h: &str| {
        FIRST_NAME_MARKERS.iter().any(|m| h.contains(m)) && has_name_marker(h)
    });
    let last_name = find(&|h: &str| {
        LAST_NAME_MARKERS.iter().any(|m| h.contains(m)) && has_name_marker(h)
    });

    NameColumns {
        full_name: None,
        first_name,
        last_name,
    }
}

/// 识别公司列（按原始表头顺序，取第一个命中）
pub fn detect_company_column(headers: &[String]) -> Option<String> {
    headers
        .iter()
        .find(|h| {
            let lowered = h.trim().to_lowercase();
            COMPANY_VOCABULARY
                .iter()
                .any(|label| header_matches(&lowered, label))
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_campaign_input_any_case_and_order() {
        let result = detect_csv_type(&headers(&[
            "TOTAL COUNT",
            "profile name",
            "Event Type",
            "Campaign Name",
        ]));
        assert_eq!(result.csv_type, CsvType::CampaignInput);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_campaign_input_name_with_date_columns() {
        let result = detect_csv_type(&headers(&["Campaign Name", "2025-01-06", "2025-01-07"]));
        assert_eq!(result.csv_type, CsvType::CampaignInput);
    }

    #[test]
    fn test_campaign_input_wins_tie_break() {
        // 同时满足线索词表
        let result = detect_csv_type(&headers(&[
            "Campaign Name",
            "Event Type",
            "Profile Name",
            "Total Count",
            "Company",
            "Position",
        ]));
        assert_eq!(result.csv_type, CsvType::CampaignInput);
    }

    #[test]
    fn test_leads_vocabulary_confidence() {
        let result = detect_csv_type(&headers(&["Nome", "Empresa", "Cargo", "Email"]));
        assert_eq!(result.csv_type, CsvType::Leads);
        assert!((result.confidence - 3.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_leads_signal_only() {
        let result = detect_csv_type(&headers(&["Data Resposta Positiva", "Email"]));
        assert_eq!(result.csv_type, CsvType::Leads);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_unknown() {
        let result = detect_csv_type(&headers(&["foo", "bar"]));
        assert_eq!(result, CsvDetectionResult::unknown());
    }

    #[test]
    fn test_date_header_exact_pattern() {
        assert!(is_date_header("2025-03-01"));
        assert!(!is_date_header("2025-3-1"));
        assert!(!is_date_header("date 2025-03-01"));
    }

    #[test]
    fn test_detect_name_columns_prefers_full_name() {
        let cols = detect_name_columns(&headers(&["First Name", "Full Name", "Last Name"]));
        assert_eq!(cols.full_name.as_deref(), Some("Full Name"));
        assert_eq!(cols.first_name, None);
    }

    #[test]
    fn test_detect_name_columns_first_last() {
        let cols = detect_name_columns(&headers(&["Primeiro Nome", "Sobrenome", "Empresa"]));
        assert_eq!(cols.full_name, None);
        assert_eq!(cols.first_name.as_deref(), Some("Primeiro Nome"));
        assert_eq!(cols.last_name.as_deref(), Some("Sobrenome"));
    }

    #[test]
    fn test_detect_name_columns_exact_lead() {
        let cols = detect_name_columns(&headers(&["Lead Name", "Company"]));
        assert_eq!(cols.full_name.as_deref(), Some("Lead Name"));
    }

    #[test]
    fn test_detect_company_column() {
        assert_eq!(
            detect_company_column(&headers(&["Company Name", "Email"])),
            Some("Company Name".to_string())
        );
        assert_eq!(detect_company_column(&headers(&["Email"])), None);
    }

    #[test]
    fn test_custom_threshold() {
        let classifier = HeaderClassifier {
            leads_min_matches: 2,
            leads_signal_confidence: 0.5,
        };
        let result = classifier.detect_csv_type(&headers(&["Name", "Company"]));
        assert_eq!(result.csv_type, CsvType::Leads);
    }
}
