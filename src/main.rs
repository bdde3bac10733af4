// ==========================================
// 组培转接周排程系统 - 命令行入口
// ==========================================
// 用法: replant-planner <records.csv|xlsx> [config.json] [output_dir]
// 输出: <output_dir>/<文件名>_planned.csv / _backlog.csv / _utilization.csv
//       stdout 打印排程摘要 (JSON)
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use replant_planner::{logging, PlannerConfig, PlanningApi};
use std::path::{Path, PathBuf};

/// 组培转接周排程: 导入批次快照, 输出下周已排 / 积压 / 利用率报表
#[derive(Parser)]
#[command(name = "replant-planner", version)]
struct Cli {
    /// 批次文件 (.csv / .xlsx / .xls)
    records_path: PathBuf,

    /// 排程配置 JSON (缺省使用内置默认值)
    config_path: Option<PathBuf>,

    /// 报表输出目录
    #[arg(default_value = ".")]
    output_dir: PathBuf,
}

fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    match path {
        Some(p) => PlannerConfig::from_json_file(p)
            .with_context(|| format!("无法加载配置文件 {}", p.display())),
        None => {
            tracing::info!("未指定配置文件, 使用默认配置");
            Ok(PlannerConfig::default())
        }
    }
}

fn report_prefix(records_path: &Path) -> String {
    records_path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("schedule")
        .to_string()
}

fn main() -> Result<()> {
    logging::init();

    let args = Cli::parse();
    tracing::info!(
        "{} v{} 启动",
        replant_planner::APP_NAME,
        replant_planner::VERSION
    );

    let config = load_config(args.config_path.as_deref())?;
    let api = PlanningApi::new();

    let outcome = api
        .plan_from_file(&args.records_path, &config)
        .with_context(|| format!("排程失败: {}", args.records_path.display()))?;

    for rejected in &outcome.import_report.rejected {
        eprintln!("拒收 行 {}: {}", rejected.row_number, rejected.message);
    }

    let paths = api
        .export_reports(
            &outcome.result,
            &args.output_dir,
            &report_prefix(&args.records_path),
        )
        .context("报表写出失败")?;

    let summary =
        serde_json::to_string_pretty(&outcome.summary()).context("摘要序列化失败")?;
    println!("{}", summary);
    eprintln!("已排: {}", paths.planned.display());
    eprintln!("积压: {}", paths.backlog.display());
    eprintln!("利用率: {}", paths.utilization.display());

    Ok(())
}
