// ==========================================
// 营销活动数据导入 - 导入层
// ==========================================
// 职责: 文件解析、表头识别、线索与活动指标提取
// 支持: CSV, Excel (xlsx / xls)
// ==========================================

// 模块声明
pub mod campaign_metrics;
pub mod error;
pub mod field_synonyms;
pub mod file_ingestor_impl;
pub mod file_ingestor_trait;
pub mod file_parser;
pub mod header_classifier;
pub mod lead_extractor;
pub mod text_normalizer;

// 重导出核心类型
pub use campaign_metrics::{metric_for_event_type, CampaignMetricsExtractor};
pub use error::{ImportError, ImportResult};
pub use file_ingestor_impl::FileIngestorImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use header_classifier::{
    detect_company_column, detect_csv_type, detect_name_columns, HeaderClassifier,
};
pub use lead_extractor::LeadExtractor;
pub use text_normalizer::normalize;

// 重导出 Trait 接口
pub use file_ingestor_trait::{FileIngestor, FileParser};
