// ==========================================
// 营销活动数据导入 - 导入会话
// ==========================================
// 职责: 持有已上传文件列表的应用级数据上下文
// 说明: 启动时创建一次，显式传递给调用方；
//       持久化只通过显式 save / load 完成
// ==========================================

use crate::domain::campaign::CampaignMetricsReport;
use crate::domain::lead::LeadImport;
use crate::domain::parsed_file::{CsvDetectionResult, MergedTable, ParsedFile, UploadedFile};
use crate::domain::types::MergeMode;
use crate::engine::merge_engine::{get_all_headers, MergeEngine};
use crate::i18n;
use crate::importer::campaign_metrics::CampaignMetricsExtractor;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_ingestor_trait::FileIngestor;
use crate::importer::header_classifier::HeaderClassifier;
use crate::importer::lead_extractor::LeadExtractor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// 批量导入中失败的单个文件
#[derive(Debug)]
pub struct FailedUpload {
    pub name: String,
    pub error: ImportError,
}

// ==========================================
// IngestSession - 导入会话
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestSession {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    files: Vec<ParsedFile>,
}

impl IngestSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            files: Vec::new(),
        }
    }

    /// 已上传文件（按上传顺序）
    pub fn files(&self) -> &[ParsedFile] {
        &self.files
    }

    pub fn file(&self, index: usize) -> ImportResult<&ParsedFile> {
        self.files.get(index).ok_or_else(|| index_error(index))
    }

    /// 追加文件（上传是累加的，不替换已有文件）
    pub fn add_files(&mut self, files: Vec<ParsedFile>) -> usize {
        let added = files.len();
        self.files.extend(files);
        added
    }

    /// 按下标移除文件
    pub fn remove_file(&mut self, index: usize) -> ImportResult<ParsedFile> {
        if index >= self.files.len() {
            return Err(index_error(index));
        }
        let removed = self.files.remove(index);
        info!(index, file_name = %removed.name, "已移除上传文件");
        Ok(removed)
    }

    /// 解析一批上传文件并追加成功的结果
    ///
    /// # 返回
    /// - 失败文件列表（由调用方决定提示或中止）
    pub async fn ingest_uploads<I: FileIngestor + ?Sized>(
        &mut self,
        ingestor: &I,
        uploads: Vec<UploadedFile>,
    ) -> Vec<FailedUpload> {
        let names: Vec<String> = uploads.iter().map(|u| u.name.clone()).collect();
        let results = ingestor.parse_batch(uploads).await;
        self.absorb(names.into_iter().zip(results))
    }

    /// 从磁盘路径解析并追加
    pub async fn ingest_paths<I: FileIngestor + ?Sized>(
        &mut self,
        ingestor: &I,
        paths: Vec<PathBuf>,
    ) -> Vec<FailedUpload> {
        let results = ingestor.parse_paths(paths).await;
        self.absorb(
            results
                .into_iter()
                .map(|(path, result)| (path.display().to_string(), result)),
        )
    }

    fn absorb(
        &mut self,
        results: impl IntoIterator<Item = (String, ImportResult<ParsedFile>)>,
    ) -> Vec<FailedUpload> {
        let mut failures = Vec::new();
        for (name, result) in results {
            match result {
                Ok(parsed) => self.files.push(parsed),
                Err(error) => {
                    warn!(file_name = %name, error = %error, "文件解析失败，已跳过");
                    failures.push(FailedUpload { name, error });
                }
            }
        }
        failures
    }

    /// 所有文件表头的并集
    pub fn all_headers(&self) -> Vec<String> {
        get_all_headers(&self.files)
    }

    /// 识别文件类型
    pub fn classify(&self, index: usize, classifier: &HeaderClassifier) -> ImportResult<CsvDetectionResult> {
        Ok(classifier.detect_csv_type(&self.file(index)?.headers))
    }

    /// 合并全部文件
    pub fn merge(&self, main_index: usize, mode: MergeMode) -> ImportResult<MergedTable> {
        MergeEngine
            .merge(&self.files, main_index, mode)
            .ok_or_else(|| index_error(main_index))
    }

    /// 从线索名单文件提取线索
    ///
    /// # 返回
    /// - Err(StructuralParse): CSV 名单行长度不一致等结构错误
    pub fn extract_leads(&self, index: usize) -> ImportResult<LeadImport> {
        LeadExtractor.extract_file(self.file(index)?)
    }

    /// 从活动指标文件提取指标
    pub fn campaign_metrics(&self, index: usize) -> ImportResult<CampaignMetricsReport> {
        Ok(CampaignMetricsExtractor.extract(self.file(index)?))
    }

    /// 保存会话（JSON）
    pub async fn save(&self, path: &Path) -> ImportResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, json).await?;
        info!(path = %path.display(), files = self.files.len(), "会话已保存");
        Ok(())
    }

    /// 加载会话（JSON）
    pub async fn load(path: &Path) -> ImportResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let session: IngestSession = serde_json::from_slice(&bytes)?;
        info!(path = %path.display(), files = session.files.len(), "会话已加载");
        Ok(session)
    }
}

impl Default for IngestSession {
    fn default() -> Self {
        Self::new()
    }
}

fn index_error(index: usize) -> ImportError {
    ImportError::SessionError(i18n::t_with_args(
        "session.index_out_of_range",
        &[("index", &index.to_string())],
    ))
}
