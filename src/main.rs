use clap::Parser;
use chrono::Utc;
use dialoguer::Input;
use pneumoscan::{analyzer, cli, config, error, report, scanner};
use pneumoscan_common::{ScanResult, ViewState};
use cli::{Cli, Commands};
use config::Config;
use error::{PneumoScanError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { path, patient_id, output, recursive } => {
            println!("🩻 pneumoscan - X線解析\n");

            let patient_id = match patient_id {
                Some(id) => id,
                None => Input::<String>::new()
                    .with_prompt("Patient ID (e.g. PT-12345)")
                    .interact_text()?,
            };

            // 1. 画像スキャン
            println!("[1/3] 画像をスキャン中...");
            let images = scanner::scan_path(&path, recursive)?;
            if images.is_empty() {
                return Err(PneumoScanError::NoImagesFound(path.display().to_string()));
            }
            println!("✔ {}枚の画像を検出\n", images.len());

            // 2. AI解析
            let api_key = config.effective_api_key();
            let classifier = analyzer::build_classifier(&config, api_key)?;
            if classifier.config().is_demo_mode() {
                println!("[2/3] AI解析中... (APIキー未設定: デモモード)");
            } else {
                println!("[2/3] AI解析中... ({})", config.model);
            }

            let mut state = ViewState::new(Vec::new());
            let completed = analyzer::analyze_images(&classifier, &images, &patient_id, &mut state, cli.verbose).await?;
            println!("✔ {}件の解析完了\n", completed.len());

            // 3. 結果表示・保存
            println!("[3/3] 結果");
            if let Some(scan) = state.selected() {
                println!("{}", report::render_analysis(scan));
            }

            if let Some(output) = output {
                let json = serde_json::to_string_pretty(state.scans())?;
                std::fs::write(&output, json)?;
                println!("✔ 結果を保存: {}", output.display());
            }

            println!("\n✅ 解析完了");
        }

        Commands::Dashboard { input, scan, admin } => {
            let now = Utc::now();
            let mut state = match input {
                Some(input) => {
                    let content = std::fs::read_to_string(&input)?;
                    let scans: Vec<ScanResult> = serde_json::from_str(&content)?;
                    ViewState::new(scans)
                }
                None => ViewState::seeded(now),
            };

            if admin {
                state.toggle_role();
            }

            if let Some(id) = scan {
                let selected = state
                    .scans()
                    .iter()
                    .find(|s| s.id == id)
                    .cloned()
                    .ok_or(PneumoScanError::ScanNotFound(id))?;
                state.select_scan(selected);
            }

            print!("{}", report::render(&state, now));
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  デモ待機時間: {}ms", config.simulated_latency_ms);
                println!("  送信MIME: {}", if config.send_detected_mime_type { "実際の形式" } else { "image/png固定" });
                println!("  APIキー: {}", if config.effective_api_key().is_some() { "設定済み" } else { "未設定（デモモード）" });
            }
        }
    }

    Ok(())
}

/// 既定は warn、--verbose で info。RUST_LOG があればそちらを優先
fn init_logger(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .try_init();
}
