// ==========================================
// 营销活动数据导入 - 导入 Trait
// ==========================================
// 职责: 定义文件解析与批量导入接口（不包含实现）
// ==========================================

use crate::domain::parsed_file::{ParsedFile, UploadedFile};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

// ==========================================
// FileIngestor Trait
// ==========================================
// 用途: 异步导入主接口（挂起点仅在文件读取/解码处）
// 实现者: FileIngestorImpl
#[async_trait]
pub trait FileIngestor: Send + Sync {
    /// 解析单个上传文件
    ///
    /// # 返回
    /// - Ok(ParsedFile): 解析结果
    /// - Err(UnsupportedFormat): 扩展名不在 csv/xlsx/xls 之内
    /// - Err(ExcelParseError): 工作簿损坏或工作表不可读
    async fn parse_file(&self, file: UploadedFile) -> ImportResult<ParsedFile>;

    /// 从磁盘路径读取并解析
    async fn parse_path(&self, path: &Path) -> ImportResult<ParsedFile>;

    /// 批量解析（并发执行，结果顺序与输入一致）
    ///
    /// # 说明
    /// - 每个文件独立解析，单个失败不影响其他文件
    /// - 是否跳过失败文件由调用方决定
    async fn parse_batch(&self, files: Vec<UploadedFile>) -> Vec<ImportResult<ParsedFile>>;

    /// 批量解析磁盘文件
    async fn parse_paths(&self, paths: Vec<PathBuf>) -> Vec<(PathBuf, ImportResult<ParsedFile>)>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 同步解码接口
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析上传文件为统一表格结构
    fn parse(&self, file: &UploadedFile) -> ImportResult<ParsedFile>;
}
