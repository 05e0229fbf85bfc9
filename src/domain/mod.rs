// ==========================================
// 营销活动数据导入 - 领域模型层
// ==========================================
// 职责: 定义解析结果、线索、活动指标等领域类型
// 红线: 不含文件解析逻辑，不含合并逻辑
// ==========================================

pub mod campaign;
pub mod lead;
pub mod parsed_file;
pub mod types;

// 重导出核心类型
pub use campaign::{CampaignMetricRow, CampaignMetricsReport, WeeklyTotals};
pub use lead::{LeadDetails, LeadImport, LeadRecord, NegativeDetails, PositiveDetails, SkippedLeadRow};
pub use parsed_file::{
    CellValue, CsvDetectionResult, MergedTable, NameColumns, ParsedFile, Row, UploadedFile,
};
pub use types::{CsvType, FileType, LeadStatus, MergeMode, MergeType, MetricKind};
