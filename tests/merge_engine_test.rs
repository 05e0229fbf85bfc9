// ==========================================
// 多文件合并集成测试
// ==========================================
// 测试目标: 左连接 / 纵向拼接 / 合并键标准化
// ==========================================

mod test_helpers;

use campaign_ingest::domain::{CellValue, MergeMode, MergeType};
use campaign_ingest::engine::{extract_merge_key, get_all_headers, perform_left_join, MergeEngine};
use test_helpers::parsed_file;

#[test]
fn test_merge_key_ignores_case_accents_and_punctuation() {
    let a = parsed_file("a.csv", &["Nome"], &[&["JOSÉ  d'Ávila"]]);
    let b = parsed_file("b.csv", &["Full Name"], &[&["jose d avila"]]);

    let key_a = extract_merge_key(&a.data[0], &a.headers, MergeType::LeadName);
    let key_b = extract_merge_key(&b.data[0], &b.headers, MergeType::LeadName);
    assert_eq!(key_a, "Jose D Avila");
    assert_eq!(key_a, key_b);
}

#[test]
fn test_left_join_first_last_against_full_name() {
    let main = parsed_file(
        "crm.csv",
        &["First Name", "Last Name", "Stage"],
        &[&["Ana", "Souza", "new"], &["Bruno", "Lima", "won"]],
    );
    let sec = parsed_file(
        "linkedin.csv",
        &["Name", "Company"],
        &[&["ANA SOUZA", "Acme"]],
    );

    let rows = perform_left_join(&main, &[sec], MergeType::LeadName);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("Company"), Some(&CellValue::from("Acme")));
    assert_eq!(rows[0].get("Stage"), Some(&CellValue::from("new")));
    assert_eq!(rows[1], main.data[1]);
}

#[test]
fn test_left_join_preserves_main_order_and_fans_out() {
    let main = parsed_file(
        "main.csv",
        &["Company"],
        &[&["Beta"], &["Acme"], &["Gama"]],
    );
    let sec = parsed_file(
        "deals.csv",
        &["Empresa", "Deal"],
        &[&["acme", "D1"], &["beta", "D2"], &["ACME", "D3"]],
    );

    let rows = perform_left_join(&main, &[sec], MergeType::CompanyName);
    let deals: Vec<String> = rows
        .iter()
        .map(|r| r.get("Deal").map(|v| v.to_string()).unwrap_or_default())
        .collect();
    assert_eq!(deals, vec!["D2", "D1", "D3", ""]);
    assert!(rows.len() >= main.data.len());
}

#[test]
fn test_merge_modes_through_engine() {
    let a = parsed_file("a.csv", &["Name", "Email"], &[&["Ana", "ana@x"]]);
    let b = parsed_file("b.csv", &["Name", "Phone"], &[&["Ana", "1"], &["Caio", "2"]]);
    let files = vec![a, b];

    let concatenated = MergeEngine.merge(&files, 0, MergeMode::Concatenate).unwrap();
    assert_eq!(concatenated.rows.len(), 3);
    assert_eq!(concatenated.headers, get_all_headers(&files));

    let joined = MergeEngine
        .merge(&files, 0, MergeMode::LeftJoin(MergeType::LeadName))
        .unwrap();
    assert_eq!(joined.headers, vec!["Name", "Email", "Phone"]);
    assert_eq!(joined.rows.len(), 1);
    assert_eq!(joined.rows[0].get("Phone"), Some(&CellValue::from("1")));

    assert!(MergeEngine
        .merge(&files, 5, MergeMode::LeftJoin(MergeType::LeadName))
        .is_none());
}
