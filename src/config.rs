use crate::error::{GeodaisError, Result};
use geodais_common::DashboardConfig;
use std::path::{Path, PathBuf};

pub const API_BASE_ENV: &str = "GEODAIS_API_BASE";

/// 端末版の設定（~/.config/geodais/config.json）
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub dashboard: DashboardConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        // 環境変数を優先
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                config.dashboard.api_base = base;
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let dashboard: DashboardConfig = serde_json::from_str(&content)?;
            Ok(Self { dashboard })
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.dashboard)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GeodaisError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("geodais").join("config.json"))
    }

    pub fn set_api_base(&mut self, api_base: String) -> Result<()> {
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(GeodaisError::Config(format!(
                "API URL は http:// または https:// で始めてください: {}",
                api_base
            )));
        }
        self.dashboard.api_base = api_base;
        Ok(())
    }

    pub fn registros_url(&self) -> String {
        self.dashboard.registros_url()
    }
}
