//! 写真ライトボックスの状態
//!
//! 選択中レコードの `fotos` を循環的に送る。`None` は閉じた状態。

use crate::types::Foto;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lightbox {
    index: Option<usize>,
}

impl Lightbox {
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_open(&self) -> bool {
        self.index.is_some()
    }

    /// 範囲チェックはしない（範囲外なら `current_url` が `None` になる）
    pub fn open(&mut self, index: usize) {
        self.index = Some(index);
    }

    pub fn close(&mut self) {
        self.index = None;
    }

    pub fn next(&mut self, len: usize) {
        if let (Some(i), true) = (self.index, len > 0) {
            // open() は範囲外も受け付けるので先に丸める
            self.index = Some((i % len + 1) % len);
        }
    }

    pub fn previous(&mut self, len: usize) {
        if let (Some(i), true) = (self.index, len > 0) {
            self.index = Some((i % len + len - 1) % len);
        }
    }

    pub fn current_url<'a>(&self, fotos: &'a [Foto]) -> Option<&'a str> {
        if fotos.is_empty() {
            return None;
        }
        self.index.and_then(|i| fotos.get(i)).and_then(Foto::url)
    }
}
