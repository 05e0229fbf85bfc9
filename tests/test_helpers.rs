// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的临时文件、样例数据等功能
// ==========================================

#![allow(dead_code)]

use campaign_ingest::domain::{CellValue, FileType, ParsedFile};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// 活动指标导出样例（两周日期列）
pub const CAMPAIGN_INPUT_CSV: &str = "Campaign Name,Event Type,Profile Name,Total Count,2025-02-03,2025-02-04,2025-02-10\n\
Prospeccao Q1,Profile Visits,Ana Souza,12,5,4,3\n\
Prospeccao Q1,Connection Requests Sent,Ana Souza,9,3,3,3\n\
Prospeccao Q1,Messages Sent,Ana Souza,6,2,2,2\n\
Prospeccao Q1,Follow-Ups 1,Ana Souza,3,1,1,1\n";

/// 线索名单样例（正向 / 负向 / 无信号 / 无姓名）
pub const LEADS_CSV: &str = "Campanha,LinkedIn,Nome,Cargo,Empresa,Data Resposta Positiva,Data Resposta Negativa,Telefone\n\
Outbound SP,https://linkedin.com/in/ana,Ana Souza,CTO,Acme,2025-02-05,,11999990000\n\
Outbound SP,https://linkedin.com/in/bruno,Bruno Lima,CEO,Beta,,2025-02-06,\n\
Outbound SP,https://linkedin.com/in/carla,Carla Dias,CFO,Gama,,,\n\
Outbound SP,https://linkedin.com/in/x,,Analyst,Delta,,,\n";

/// 未知类型样例
pub const UNKNOWN_CSV: &str = "foo,bar\n1,2\n";

/// 临时目录中的测试文件
pub struct TestFiles {
    pub dir: TempDir,
}

impl TestFiles {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// 写入文件并返回路径
    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("Failed to create test file");
        file.write_all(contents).expect("Failed to write test file");
        path
    }
}

/// 由字符串表格构造 ParsedFile
pub fn parsed_file(name: &str, headers: &[&str], rows: &[&[&str]]) -> ParsedFile {
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let data = rows
        .iter()
        .map(|values| {
            headers
                .iter()
                .cloned()
                .zip(values.iter().map(|v| CellValue::from(*v)))
                .collect()
        })
        .collect();
    ParsedFile::new(name, headers, data, FileType::Csv)
}
