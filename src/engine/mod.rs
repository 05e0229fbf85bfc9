// ==========================================
// 营销活动数据导入 - 引擎层
// ==========================================
// 职责: 多文件合并（左连接 / 纵向拼接）
// 红线: 引擎只读 ParsedFile，不做文件 IO
// ==========================================

pub mod merge_engine;

// 重导出核心引擎
pub use merge_engine::{
    concatenate, extract_merge_key, get_all_headers, perform_left_join, MergeEngine,
};
