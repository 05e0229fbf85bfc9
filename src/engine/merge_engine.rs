// ==========================================
// 营销活动数据导入 - 多文件合并引擎
// ==========================================
// 职责: 合并键提取 / 左连接 / 纵向拼接 / 表头并集
// 规则:
// - 合并键 = 姓名或公司字段经文本标准化后的值
// - 左连接: 主文件行保序；无匹配原样输出；多匹配按匹配数展开
// - 空合并键在主、副两侧都不参与匹配
// ==========================================

use crate::domain::parsed_file::{MergedTable, ParsedFile, Row};
use crate::domain::types::{MergeMode, MergeType};
use crate::importer::header_classifier::{detect_company_column, detect_name_columns};
use crate::importer::text_normalizer::normalize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

fn field_text<'a>(row: &'a Row, header: Option<&String>) -> Option<std::borrow::Cow<'a, str>> {
    header.and_then(|h| row.get(h)).map(|v| v.as_text())
}

/// 提取合并键
///
/// # 规则
/// - LeadName: 有完整姓名列时取该列；否则名、姓都有值时取 "名 姓"；否则仅名
/// - CompanyName: 公司列
/// - 找不到可用列或值为空时返回空字符串（只有姓不构成合并键）
pub fn extract_merge_key(row: &Row, headers: &[String], merge_type: MergeType) -> String {
    match merge_type {
        MergeType::LeadName => {
            let columns = detect_name_columns(headers);
            if columns.full_name.is_some() {
                return normalize(field_text(row, columns.full_name.as_ref()).as_deref());
            }

            let first = normalize(field_text(row, columns.first_name.as_ref()).as_deref());
            let last = normalize(field_text(row, columns.last_name.as_ref()).as_deref());
            match (first.is_empty(), last.is_empty()) {
                (false, false) => format!("{} {}", first, last),
                (false, true) => first,
                _ => String::new(),
            }
        }
        MergeType::CompanyName => {
            let company_col = detect_company_column(headers);
            normalize(field_text(row, company_col.as_ref()).as_deref())
        }
    }
}

/// 表头并集（按文件顺序，首次出现的位置）
pub fn get_all_headers(files: &[ParsedFile]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::new();
    for header in files.iter().flat_map(|f| f.headers.iter()) {
        if seen.insert(header.as_str()) {
            headers.push(header.clone());
        }
    }
    headers
}

/// 纵向拼接: 所有文件的行按文件顺序合并，缺失列保持缺失
pub fn concatenate(files: &[ParsedFile]) -> Vec<Row> {
    files.iter().flat_map(|f| f.data.iter().cloned()).collect()
}

/// 左连接
///
/// # 说明
/// - 所有副文件的行汇总到同一个查找表，不区分来源文件
/// - 匹配行 = 主行字段 + 副行字段（副行同名字段覆盖）
/// - 输出行数可能大于主文件行数
pub fn perform_left_join(
    main_file: &ParsedFile,
    secondary_files: &[ParsedFile],
    merge_type: MergeType,
) -> Vec<Row> {
    let mut lookup: HashMap<String, Vec<&Row>> = HashMap::new();
    for file in secondary_files {
        for row in &file.data {
            let key = extract_merge_key(row, &file.headers, merge_type);
            if key.is_empty() {
                continue;
            }
            lookup.entry(key).or_default().push(row);
        }
    }
    debug!(keys = lookup.len(), "副文件查找表构建完成");

    let mut merged = Vec::with_capacity(main_file.data.len());
    let mut matched_rows = 0usize;
    for main_row in &main_file.data {
        let key = extract_merge_key(main_row, &main_file.headers, merge_type);
        let matches = if key.is_empty() { None } else { lookup.get(&key) };

        match matches {
            Some(secondary_rows) => {
                matched_rows += 1;
                for secondary in secondary_rows {
                    let mut row = main_row.clone();
                    row.extend(secondary.iter().map(|(k, v)| (k.clone(), v.clone())));
                    merged.push(row);
                }
            }
            None => merged.push(main_row.clone()),
        }
    }

    info!(
        main_rows = main_file.data.len(),
        matched_rows,
        output_rows = merged.len(),
        merge_type = %merge_type,
        "左连接完成"
    );
    merged
}

// ==========================================
// MergeEngine - 合并入口
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeEngine;

impl MergeEngine {
    /// 按合并方式合并
    ///
    /// # 参数
    /// - files: 参与合并的文件
    /// - main_index: 左连接主文件下标（拼接模式忽略）
    ///
    /// # 返回
    /// - None: 文件列表为空或主文件下标越界
    pub fn merge(&self, files: &[ParsedFile], main_index: usize, mode: MergeMode) -> Option<MergedTable> {
        if files.is_empty() {
            return None;
        }

        match mode {
            MergeMode::Concatenate => Some(MergedTable {
                headers: get_all_headers(files),
                rows: concatenate(files),
            }),
            MergeMode::LeftJoin(merge_type) => {
                let main_file = files.get(main_index)?;
                let secondary: Vec<ParsedFile> = files
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != main_index)
                    .map(|(_, f)| f.clone())
                    .collect();

                // 主文件表头在前
                let mut ordered = Vec::with_capacity(files.len());
                ordered.push(main_file.clone());
                ordered.extend(secondary.iter().cloned());

                Some(MergedTable {
                    headers: get_all_headers(&ordered),
                    rows: perform_left_join(main_file, &secondary, merge_type),
                })
            }
        }
    }
}
