// ==========================================
// 营销活动数据导入 - 文本标准化
// ==========================================
// 职责: 去重音 / 去标点 / 折叠空白 / 首字母大写，用于稳定的键比较
// 例: "joão   DA-silva" → "Joao Da Silva"
// ==========================================

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 标准化可选文本（None → 空字符串）
pub fn normalize(text: Option<&str>) -> String {
    match text {
        Some(t) => normalize_str(t),
        None => String::new(),
    }
}

/// 标准化文本
///
/// # 步骤
/// 1. NFD 分解并移除组合附加符号
/// 2. 非单词、非空白字符替换为空格（单词字符: ASCII 字母数字与下划线）
/// 3. 按空白切分，每个词首字母大写、其余小写
/// 4. 单空格拼接
pub fn normalize_str(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    stripped
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}
