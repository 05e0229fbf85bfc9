// ==========================================
// 营销活动数据导入 - 应用层
// ==========================================
// 职责: 导入会话，连接导入层与合并引擎
// ==========================================

pub mod session;

// 重导出
pub use session::{FailedUpload, IngestSession};
