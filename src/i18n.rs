// ==========================================
// 营销活动数据导入 - 本地化消息
// ==========================================
// 工具: rust-i18n（宏在 lib.rs 中初始化，词条位于 locales/*.yml）
// 语言: pt-BR / en；未知语言回退到 en
// ==========================================

use tracing::warn;

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "pt-BR"];

/// 回退语言
pub const FALLBACK_LOCALE: &str = "en";

/// 当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 切换语言，返回实际生效的语言
///
/// 语言代码大小写不敏感（"pt-br" 等同 "pt-BR"）；不支持的语言回退到 en
pub fn set_locale(locale: &str) -> &'static str {
    let wanted = locale.trim();
    let effective = SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|supported| supported.eq_ignore_ascii_case(wanted))
        .unwrap_or_else(|| {
            warn!(locale = %wanted, fallback = FALLBACK_LOCALE, "不支持的语言，使用回退语言");
            FALLBACK_LOCALE
        });
    rust_i18n::set_locale(effective);
    effective
}

/// 取词条（无占位符）
pub fn t(key: &str) -> String {
    t_with_args(key, &[])
}

/// 取词条并替换 %{name} 占位符
///
/// # 示例
/// ```no_run
/// use campaign_ingest::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/leads.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(rust_i18n::t!(key).to_string(), |text, (name, value)| {
        text.replace(&format!("%{{{}}}", name), value)
    })
}
