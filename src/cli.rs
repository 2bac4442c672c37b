use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pneumoscan")]
#[command(about = "胸部X線AIトリアージ（Normal / Bacterial Pneumonia / Viral Pneumonia）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// X線画像（ファイルまたはフォルダ）を解析
    Analyze {
        /// 画像ファイルまたはフォルダのパス
        #[arg(required = true)]
        path: PathBuf,

        /// 患者ID（省略時は対話入力）
        #[arg(short, long)]
        patient_id: Option<String>,

        /// 解析結果を保存するJSONファイル
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// ダッシュボードを表示
    Dashboard {
        /// スキャン一覧JSON（省略時はサンプル3件）
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 解析画面を表示するスキャンID
        #[arg(short, long)]
        scan: Option<String>,

        /// 管理者ビューで表示
        #[arg(long)]
        admin: bool,
    },

    /// 設定を管理
    Config {
        /// Gemini APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from(["pneumoscan", "analyze", "xray.png", "--patient-id", "PT-12345"])
            .expect("パース失敗");
        match cli.command {
            Commands::Analyze { path, patient_id, output, recursive } => {
                assert_eq!(path, PathBuf::from("xray.png"));
                assert_eq!(patient_id.as_deref(), Some("PT-12345"));
                assert!(output.is_none());
                assert!(!recursive);
            }
            _ => panic!("Expected Analyze"),
        }
    }

    #[test]
    fn test_parse_dashboard_global_verbose() {
        let cli = Cli::try_parse_from(["pneumoscan", "dashboard", "--admin", "-v"]).expect("パース失敗");
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Dashboard { admin: true, .. }));
    }

    #[test]
    fn test_analyze_requires_path() {
        assert!(Cli::try_parse_from(["pneumoscan", "analyze"]).is_err());
    }
}
