use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeodaisError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("登録が見つかりません: {0}")]
    RegistroNotFound(String),

    #[error("{0}")]
    Common(#[from] geodais_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("対話モードは端末でのみ使用できます")]
    NotInteractive,
}

pub type Result<T> = std::result::Result<T, GeodaisError>;
