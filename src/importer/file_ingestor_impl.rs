// ==========================================
// 营销活动数据导入 - 文件导入器实现
// ==========================================
// 流程: 扩展名校验 → 读取 → 解码（Excel 在阻塞线程池中解码）→ ParsedFile
// 批量: fan-out / fan-in，最大并发数由配置决定，结果保持输入顺序
// 说明: 不重试；解析失败作为 Err 返回给调用方
// ==========================================

use crate::config::IngestConfigReader;
use crate::domain::parsed_file::{ParsedFile, UploadedFile};
use crate::domain::types::FileType;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_ingestor_trait::{FileIngestor, FileParser};
use crate::importer::file_parser::UniversalFileParser;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// FileIngestorImpl - 文件导入器
// ==========================================
pub struct FileIngestorImpl {
    parser: Arc<dyn FileParser>,
    max_concurrent: usize,
}

impl FileIngestorImpl {
    /// 创建导入器
    ///
    /// # 参数
    /// - parser: 文件解析器
    /// - max_concurrent: 批量解析最大并发数（0 按 1 处理）
    pub fn new(parser: Arc<dyn FileParser>, max_concurrent: usize) -> Self {
        Self {
            parser,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// 使用通用解析器与配置中的并发数创建
    pub fn from_config<C: IngestConfigReader + ?Sized>(config: &C) -> Self {
        Self::new(Arc::new(UniversalFileParser), config.max_concurrent_parses())
    }

    /// 从磁盘读取上传文件
    pub async fn read_upload(path: &Path) -> ImportResult<UploadedFile> {
        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(path.display().to_string()),
            _ => ImportError::FileReadError(format!("{}: {}", path.display(), e)),
        })?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(UploadedFile::new(name, bytes))
    }
}

impl Default for FileIngestorImpl {
    fn default() -> Self {
        Self::new(Arc::new(UniversalFileParser), 4)
    }
}

#[async_trait]
impl FileIngestor for FileIngestorImpl {
    #[instrument(skip(self, file), fields(file_name = %file.name))]
    async fn parse_file(&self, file: UploadedFile) -> ImportResult<ParsedFile> {
        let start = Instant::now();
        let file_type = FileType::from_extension(&file.extension())
            .ok_or_else(|| ImportError::UnsupportedFormat(file.extension()))?;

        let parsed = match file_type {
            FileType::Csv => self.parser.parse(&file),
            FileType::Excel => {
                // 二进制解码放入阻塞线程池
                let parser = Arc::clone(&self.parser);
                tokio::task::spawn_blocking(move || parser.parse(&file))
                    .await
                    .map_err(|e| ImportError::InternalError(format!("解码任务失败: {}", e)))?
            }
        };

        match &parsed {
            Ok(p) => info!(
                rows = p.row_count,
                headers = p.headers.len(),
                file_type = %p.file_type,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "文件解析完成"
            ),
            Err(e) => error!(error = %e, "文件解析失败"),
        }
        parsed
    }

    async fn parse_path(&self, path: &Path) -> ImportResult<ParsedFile> {
        let upload = Self::read_upload(path).await?;
        self.parse_file(upload).await
    }

    #[instrument(skip(self, files), fields(batch_id))]
    async fn parse_batch(&self, files: Vec<UploadedFile>) -> Vec<ImportResult<ParsedFile>> {
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(files = files.len(), max_concurrent = self.max_concurrent, "开始批量解析");

        let results: Vec<ImportResult<ParsedFile>> = stream::iter(files)
            .map(|file| self.parse_file(file))
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!(failed, "批量解析存在失败文件");
        }
        debug!(success = results.len() - failed, "批量解析完成");
        results
    }

    async fn parse_paths(&self, paths: Vec<PathBuf>) -> Vec<(PathBuf, ImportResult<ParsedFile>)> {
        let results: Vec<ImportResult<ParsedFile>> = stream::iter(paths.clone())
            .map(|path| async move { self.parse_path(&path).await })
            .buffered(self.max_concurrent)
            .collect()
            .await;
        paths.into_iter().zip(results).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_file_csv() {
        let ingestor = FileIngestorImpl::default();
        let file = UploadedFile::new("a.csv", b"Name\nAna\n".to_vec());
        let parsed = ingestor.parse_file(file).await.unwrap();
        assert_eq!(parsed.row_count, 1);
    }

    #[tokio::test]
    async fn test_parse_file_unsupported() {
        let ingestor = FileIngestorImpl::default();
        let file = UploadedFile::new("a.pdf", Vec::new());
        let result = ingestor.parse_file(file).await;
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_parse_batch_keeps_order_and_isolates_failures() {
        let ingestor = FileIngestorImpl::new(Arc::new(UniversalFileParser), 2);
        let files = vec![
            UploadedFile::new("one.csv", b"a\n1\n".to_vec()),
            UploadedFile::new("bad.xlsx", b"garbage".to_vec()),
            UploadedFile::new("three.csv", b"a\n1\n2\n3\n".to_vec()),
        ];
        let results = ingestor.parse_batch(files).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().name, "one.csv");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().row_count, 3);
    }

    #[tokio::test]
    async fn test_parse_paths_pairs_each_path_with_its_result() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");
        std::fs::write(&first, "a\n1\n").unwrap();
        std::fs::write(&second, "b\n1\n2\n").unwrap();
        let missing = dir.path().join("missing.csv");

        let ingestor = FileIngestorImpl::new(Arc::new(UniversalFileParser), 2);
        let results = ingestor
            .parse_paths(vec![first.clone(), missing.clone(), second.clone()])
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, first);
        assert_eq!(results[0].1.as_ref().unwrap().headers, vec!["a"]);
        assert_eq!(results[1].0, missing);
        assert!(matches!(results[1].1, Err(ImportError::FileNotFound(_))));
        assert_eq!(results[2].1.as_ref().unwrap().row_count, 2);
    }

    #[tokio::test]
    async fn test_parse_path_missing_file() {
        let ingestor = FileIngestorImpl::default();
        let result = ingestor.parse_path(Path::new("/nonexistent/leads.csv")).await;
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}
