// ==========================================
// 营销活动数据导入 - 解析文件模型
// ==========================================
// 职责: 统一表格结构（有序表头 + 行记录）
// 红线: row_count == data.len()；行记录的键 ⊆ headers
// ==========================================

use crate::domain::types::{CsvType, FileType};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

// ==========================================
// CellValue - 单元格值
// ==========================================
// CSV 行只有 Text；Excel 行保留标量类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// 取文本形式（用于合并键提取、线索字段查找）
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
        }
    }

    /// 空值或空白文本
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Text(String::new())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// 行记录: 表头 → 单元格值
pub type Row = HashMap<String, CellValue>;

/// 读取行内某列的文本（列缺失返回 None）
pub fn cell_text<'a>(row: &'a Row, header: &str) -> Option<Cow<'a, str>> {
    row.get(header).map(|v| v.as_text())
}

// ==========================================
// UploadedFile - 待解析的上传文件
// ==========================================
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// 原始文件名（含扩展名）
    pub name: String,
    /// 文件内容
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// 文件扩展名（小写，无点号）
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
    }
}

// ==========================================
// ParsedFile - 解析后的文件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedFile {
    pub name: String,
    /// 有序且唯一的表头
    pub headers: Vec<String>,
    pub data: Vec<Row>,
    pub row_count: usize,
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// CSV 解码后的原文（线索名单需按严格规则重新解析）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
}

impl ParsedFile {
    /// 创建 ParsedFile，row_count 由 data 派生
    pub fn new(name: impl Into<String>, headers: Vec<String>, data: Vec<Row>, file_type: FileType) -> Self {
        let row_count = data.len();
        Self {
            name: name.into(),
            headers,
            data,
            row_count,
            file_type,
            source_text: None,
        }
    }

    /// 附带原文
    pub fn with_source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }
}

// ==========================================
// CsvDetectionResult - 表头识别结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CsvDetectionResult {
    #[serde(rename = "type")]
    pub csv_type: CsvType,
    /// 启发式置信度 [0, 1]
    pub confidence: f64,
}

impl CsvDetectionResult {
    pub fn unknown() -> Self {
        Self {
            csv_type: CsvType::Unknown,
            confidence: 0.0,
        }
    }
}

// ==========================================
// NameColumns - 姓名列识别结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameColumns {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

// ==========================================
// MergedTable - 合并输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}
