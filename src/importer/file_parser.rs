// ==========================================
// 营销活动数据导入 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv) / Excel (.xlsx/.xls，仅第一个工作表)
// 输出: ParsedFile（有序唯一表头 + 行记录）
// 说明: 通用 CSV 路径按逗号简单切分，不处理引号内逗号
//       （线索路径使用严格解析，见 lead_extractor）
// ==========================================

use crate::domain::parsed_file::{CellValue, ParsedFile, Row, UploadedFile};
use crate::domain::types::FileType;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_ingestor_trait::FileParser;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::collections::HashSet;
use std::io::Cursor;

/// 解码文本（去 UTF-8 BOM，非法字节按替换字符处理）
pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

/// 去首尾空白，并剥掉一层首尾双引号
fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_lead = trimmed.strip_prefix('"').unwrap_or(trimmed);
    without_lead
        .strip_suffix('"')
        .unwrap_or(without_lead)
        .to_string()
}

fn split_line(line: &str) -> Vec<String> {
    line.split(',').map(clean_field).collect()
}

/// 表头去重（保留首次出现的位置）
fn unique_headers(raw: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter(|h| seen.insert(h.as_str()))
        .cloned()
        .collect()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析 CSV 文本
    ///
    /// # 规则
    /// - 按换行切分，丢弃空白行
    /// - 第一行为表头
    /// - 第 i 个值对应第 i 个表头；行过短时补空字符串，多余的值丢弃
    pub fn parse_text(&self, name: &str, text: &str) -> ParsedFile {
        let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());

        let raw_headers = match lines.next() {
            Some(line) => split_line(line),
            None => return ParsedFile::new(name, Vec::new(), Vec::new(), FileType::Csv),
        };

        let data: Vec<Row> = lines
            .map(|line| {
                let values = split_line(line);
                raw_headers
                    .iter()
                    .enumerate()
                    .map(|(idx, header)| {
                        let value = values.get(idx).cloned().unwrap_or_default();
                        (header.clone(), CellValue::Text(value))
                    })
                    .collect()
            })
            .collect();

        ParsedFile::new(name, unique_headers(&raw_headers), data, FileType::Csv)
            .with_source_text(text)
    }
}

impl FileParser for CsvParser {
    fn parse(&self, file: &UploadedFile) -> ImportResult<ParsedFile> {
        let ext = file.extension();
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }
        Ok(self.parse_text(&file.name, &decode_text(&file.bytes)))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    fn to_cell_value(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.trim().to_string()),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::Float(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            // 日期/时长/错误单元格保留显示文本
            other => CellValue::Text(other.to_string()),
        }
    }

    /// 表头命名: 空表头 → __EMPTY / __EMPTY_1 ...，重名 → name_1 / name_2 ...
    fn name_headers(header_row: &[Data]) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut headers = Vec::with_capacity(header_row.len());
        for cell in header_row {
            let base = match cell.to_string().trim() {
                "" => "__EMPTY".to_string(),
                text => text.to_string(),
            };
            let mut candidate = base.clone();
            let mut suffix = 1;
            while seen.contains(&candidate) {
                candidate = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            seen.insert(candidate.clone());
            headers.push(candidate);
        }
        headers
    }
}

impl FileParser for ExcelParser {
    fn parse(&self, file: &UploadedFile) -> ImportResult<ParsedFile> {
        let ext = file.extension();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开工作簿（xlsx / xls 自动识别）
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(file.bytes.clone()))?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）；空工作表视为无数据
        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header_row) => Self::name_headers(header_row),
            None => return Ok(ParsedFile::new(&file.name, Vec::new(), Vec::new(), FileType::Excel)),
        };

        let mut data = Vec::new();
        for data_row in rows {
            let row: Row = headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = data_row
                        .get(idx)
                        .map(Self::to_cell_value)
                        .unwrap_or(CellValue::Empty);
                    (header.clone(), value)
                })
                .collect();

            // 跳过完全空白的行
            if row.values().all(CellValue::is_blank) {
                continue;
            }
            data.push(row);
        }

        Ok(ParsedFile::new(&file.name, headers, data, FileType::Excel))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse(&self, file: &UploadedFile) -> ImportResult<ParsedFile> {
        match FileType::from_extension(&file.extension()) {
            Some(FileType::Csv) => CsvParser.parse(file),
            Some(FileType::Excel) => ExcelParser.parse(file),
            None => Err(ImportError::UnsupportedFormat(file.extension())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_file(name: &str, text: &str) -> UploadedFile {
        UploadedFile::new(name, text.as_bytes().to_vec())
    }

    #[test]
    fn test_csv_parser_basic() {
        let file = csv_file("leads.csv", "Name,Company\nAna,Acme\n\"Bruno\",\"Beta\"\n");
        let parsed = CsvParser.parse(&file).unwrap();

        assert_eq!(parsed.headers, vec!["Name", "Company"]);
        assert_eq!(parsed.row_count, 2);
        assert_eq!(parsed.data[1].get("Name"), Some(&CellValue::from("Bruno")));
        assert_eq!(parsed.file_type, FileType::Csv);
    }

    #[test]
    fn test_csv_parser_pads_short_rows_and_skips_blank_lines() {
        let file = csv_file("a.csv", "a,b,c\r\n1\r\n\r\n   \n4,5,6\n");
        let parsed = CsvParser.parse(&file).unwrap();

        assert_eq!(parsed.row_count, 2);
        assert_eq!(parsed.data[0].get("b"), Some(&CellValue::from("")));
        assert_eq!(parsed.data[0].get("c"), Some(&CellValue::from("")));
        assert_eq!(parsed.data[1].get("c"), Some(&CellValue::from("6")));
    }

    #[test]
    fn test_csv_parser_quoted_comma_is_split() {
        // 已知限制: 引号内逗号不保留
        let file = csv_file("a.csv", "name,city\n\"Souza, Ana\",Recife\n");
        let parsed = CsvParser.parse(&file).unwrap();
        assert_eq!(parsed.data[0].get("name"), Some(&CellValue::from("Souza")));
        assert_eq!(parsed.data[0].get("city"), Some(&CellValue::from("Ana")));
    }

    #[test]
    fn test_csv_parser_empty_file() {
        let parsed = CsvParser.parse(&csv_file("empty.csv", "\n\n")).unwrap();
        assert!(parsed.headers.is_empty());
        assert_eq!(parsed.row_count, 0);
    }

    #[test]
    fn test_csv_parser_duplicate_headers_are_unique() {
        let parsed = CsvParser.parse(&csv_file("d.csv", "a,a,b\n1,2,3\n")).unwrap();
        assert_eq!(parsed.headers, vec!["a", "b"]);
        assert!(parsed.data[0].keys().all(|k| parsed.headers.contains(k)));
    }

    #[test]
    fn test_universal_parser_unsupported_format() {
        let result = UniversalFileParser.parse(&csv_file("notes.txt", "x"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_excel_parser_corrupt_binary_is_error() {
        let file = UploadedFile::new("broken.xlsx", b"not a workbook".to_vec());
        assert!(UniversalFileParser.parse(&file).is_err());
    }

    #[test]
    fn test_excel_header_naming() {
        let headers = ExcelParser::name_headers(&[
            Data::String("Name".to_string()),
            Data::Empty,
            Data::String("Name".to_string()),
            Data::Empty,
        ]);
        assert_eq!(headers, vec!["Name", "__EMPTY", "Name_1", "__EMPTY_1"]);
    }
}
