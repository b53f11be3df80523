//! 登録データの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Registro: APIが返す農地登録レコード
//! - Foto: レコードに紐づく写真

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 写真エントリ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Foto {
    pub id: i64,

    #[serde(default)]
    pub tipo_foto: String,        // 写真区分

    /// 画像URL（空文字は「URLなし」扱い）
    #[serde(default)]
    pub url: String,
}

impl Foto {
    pub fn url(&self) -> Option<&str> {
        if self.url.is_empty() {
            None
        } else {
            Some(&self.url)
        }
    }
}

/// 農地登録レコード
///
/// `geojson` はGeometry / Feature / FeatureCollection のいずれか。
/// 中身は地図ライブラリにそのまま渡すため、ここでは解釈しない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registro {
    pub internal_key: String,

    #[serde(default)]
    pub dni_productor: String,    // 生産者ID

    #[serde(default)]
    pub nombre_completo: String,  // 氏名

    #[serde(default)]
    pub tipo_cultivo: String,     // 作物

    #[serde(default)]
    pub area_ha: f64,             // 面積(ha)

    #[serde(default)]
    pub geojson: Option<serde_json::Value>,

    #[serde(default)]
    pub fotos: Vec<Foto>,

    #[serde(default)]
    pub fecha_creacion: String,
}

impl Registro {
    /// 境界ジオメトリを持つか（JSON null は持たない扱い）
    pub fn geometry(&self) -> Option<&serde_json::Value> {
        self.geojson.as_ref().filter(|g| !g.is_null())
    }

    /// 一覧表示用の作成日（例: "Mar 5, 2025"）
    pub fn fecha_display(&self) -> String {
        format_fecha(&self.fecha_creacion)
    }
}

/// 作成日時文字列を表示用に整形する
///
/// RFC 3339 とタイムゾーンなしのISO形式を受け付ける。
/// 解釈できない場合は元の文字列をそのまま返す。
pub fn format_fecha(raw: &str) -> String {
    const DISPLAY: &str = "%b %-d, %Y";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}
