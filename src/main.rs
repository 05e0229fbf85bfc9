// ==========================================
// 营销活动数据导入 - 命令行入口
// ==========================================
// 用法: campaign-ingest [--config <path>] [--save-session] <file>...
// 输出: 每个文件的识别结果（JSON，写入 stdout）
// ==========================================

use anyhow::{bail, Context};
use campaign_ingest::config::{ConfigManager, IngestConfigReader};
use campaign_ingest::domain::CsvType;
use campaign_ingest::importer::{FileIngestorImpl, HeaderClassifier};
use campaign_ingest::{i18n, logging, IngestSession};
use serde_json::json;
use std::path::PathBuf;

struct CliArgs {
    config: Option<PathBuf>,
    save_session: bool,
    files: Vec<PathBuf>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut cli = CliArgs {
        config: None,
        save_session: false,
        files: Vec::new(),
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config 需要文件路径")?;
                cli.config = Some(PathBuf::from(path));
            }
            "--save-session" => cli.save_session = true,
            _ => cli.files.push(PathBuf::from(arg)),
        }
    }

    if cli.files.is_empty() {
        bail!("用法: campaign-ingest [--config <path>] [--save-session] <file>...");
    }
    Ok(cli)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = parse_args()?;

    let config = ConfigManager::load(cli.config.as_deref())?;
    logging::init(&config.log_filter());
    i18n::set_locale(&config.locale());

    tracing::info!("==================================================");
    tracing::info!("营销活动数据导入 v{}", campaign_ingest::VERSION);
    if let Some(source) = config.source() {
        tracing::info!("配置文件: {}", source.display());
    }
    tracing::info!("==================================================");

    let ingestor = FileIngestorImpl::from_config(&config);
    let classifier = HeaderClassifier::from_config(&config);

    let mut session = IngestSession::new();
    let failures = session.ingest_paths(&ingestor, cli.files).await;

    let mut reports = Vec::with_capacity(session.files().len() + failures.len());
    for (index, file) in session.files().iter().enumerate() {
        let detection = session.classify(index, &classifier)?;
        let mut report = json!({
            "file": file.name,
            "type": file.file_type,
            "rows": file.row_count,
            "headers": file.headers,
            "detection": detection,
        });

        match detection.csv_type {
            CsvType::Leads => match session.extract_leads(index) {
                Ok(leads) => {
                    report["leads"] = json!({
                        "non_negative": leads.non_negative_leads.len(),
                        "negative": leads.negative_leads.len(),
                        "confirmed_positive": leads.confirmed_positive().count(),
                        "skipped": leads.skipped.len(),
                    });
                }
                Err(e) => {
                    tracing::warn!(file_name = %file.name, error = %e, "线索名单解析失败");
                    report["error"] = json!(e.user_message());
                }
            },
            CsvType::CampaignInput => {
                let metrics = session.campaign_metrics(index)?;
                report["campaigns"] = json!(metrics.campaigns());
                report["funnel"] = json!(metrics.funnel_totals());
            }
            CsvType::Unknown => {}
        }
        reports.push(report);
    }

    for failure in &failures {
        reports.push(json!({
            "file": failure.name,
            "error": failure.error.user_message(),
        }));
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);

    if cli.save_session {
        let path = config.session_file();
        session.save(&path).await?;
        tracing::info!("会话已保存: {}", path.display());
    }

    if !failures.is_empty() {
        tracing::warn!("{} 个文件解析失败", failures.len());
    }
    Ok(())
}
