use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "geodais")]
#[command(about = "農地登録ダッシュボード（端末版）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 非対話モード（起動時の取得と地図初期化を行わない）
    #[arg(long, global = true)]
    pub batch: bool,

    /// API のベースURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub api_base: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 登録一覧を表示
    List {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 登録を1件表示（境界の中心座標と写真を含む）
    Show {
        /// internal_key
        #[arg(required = true)]
        key: String,
    },

    /// 一覧から選んで境界・写真を閲覧
    Browse,

    /// 設定を表示/編集
    Config {
        /// APIのベースURLを設定
        #[arg(long)]
        set_api_base: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
