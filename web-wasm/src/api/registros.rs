//! 登録API（window.fetch）

use crate::js_error::js_error_message;
use geodais_common::{Error, RecordSource, Registro, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub struct HttpRecordSource {
    url: String,
}

impl HttpRecordSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl RecordSource for HttpRecordSource {
    async fn fetch_registros(&self) -> Result<Vec<Registro>> {
        let body = get_text(&self.url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn fetch_error(value: JsValue) -> Error {
    Error::Fetch(js_error_message(&value))
}

/// GET して本文を文字列で返す（認証ヘッダなし）
async fn get_text(url: &str) -> Result<String> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts).map_err(fetch_error)?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(fetch_error)?;

    let window = web_sys::window().ok_or_else(|| Error::Fetch("window is not available".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(fetch_error)?;
    let resp: Response = resp_value.dyn_into().map_err(fetch_error)?;

    if !resp.ok() {
        return Err(Error::HttpStatus(resp.status()));
    }

    let text = JsFuture::from(resp.text().map_err(fetch_error)?)
        .await
        .map_err(fetch_error)?;
    text.as_string()
        .ok_or_else(|| Error::Fetch("response body is not text".into()))
}
