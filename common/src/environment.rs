//! 実行環境の判定
//!
//! 地図の初期化とレコード取得は、利用者が画面を見られる環境でのみ行う。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// ブラウザ・端末など対話的な表示面がある
    Interactive,
    /// プリレンダー・バッチ実行など、誰も画面を見ない
    Prerender,
}

impl Environment {
    pub fn from_interactive(interactive: bool) -> Self {
        if interactive {
            Environment::Interactive
        } else {
            Environment::Prerender
        }
    }

    pub fn is_interactive(self) -> bool {
        matches!(self, Environment::Interactive)
    }
}
