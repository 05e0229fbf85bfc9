// ==========================================
// 营销活动数据导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 识别失败（unknown 类型 / 空合并键）不是错误，而是类型化结果
// ==========================================

use crate::i18n;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.xlsx/.xls）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 线索解析错误 =====
    #[error("表格结构错误 (行 {line}): {message}")]
    StructuralParse { line: u64, message: String },

    // ===== 会话与配置错误 =====
    #[error("会话操作失败: {0}")]
    SessionError(String),

    #[error("配置读取失败 (path: {path}): {message}")]
    ConfigReadError { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    ConfigValueError { key: String, message: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 面向用户的本地化消息
    pub fn user_message(&self) -> String {
        match self {
            ImportError::UnsupportedFormat(ext) => {
                i18n::t_with_args("import.unsupported_format", &[("ext", ext)])
            }
            ImportError::FileNotFound(path) => {
                i18n::t_with_args("import.file_not_found", &[("path", path)])
            }
            ImportError::ExcelParseError(msg) => {
                i18n::t_with_args("import.excel_parse_failed", &[("message", msg)])
            }
            ImportError::StructuralParse { line, message } => i18n::t_with_args(
                "import.structural_parse_failed",
                &[("line", &line.to_string()), ("message", message)],
            ),
            other => i18n::t_with_args("common.failed", &[("message", &other.to_string())]),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(err.to_string()),
            _ => ImportError::FileReadError(err.to_string()),
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.kind() {
            csv::ErrorKind::UnequalLengths { .. } | csv::ErrorKind::Utf8 { .. } => {
                ImportError::StructuralParse {
                    line,
                    message: err.to_string(),
                }
            }
            _ => ImportError::CsvParseError(err.to_string()),
        }
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::SessionError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_maps_to_file_not_found() {
        let err: ImportError = std::io::Error::new(std::io::ErrorKind::NotFound, "x.csv").into();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = ImportError::UnsupportedFormat("txt".to_string());
        assert!(err.to_string().contains("txt"));
    }
}
