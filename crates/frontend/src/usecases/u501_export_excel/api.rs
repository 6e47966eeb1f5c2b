use contracts::usecases::u501_export_excel::{ExportFilters, ExportKind, SPREADSHEET_MIME};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, Headers, Request, RequestInit, RequestMode, Response};

use super::outcome::{check_size, classify_failure, download_name, is_spreadsheet, ExportError};
use crate::shared::api_utils::{api_url, with_query};
use crate::shared::date_utils::now_utc;

/// A workbook ready to be saved
pub struct ExportDownload {
    pub blob: Blob,
    pub filename: String,
}

fn browser_error(err: wasm_bindgen::JsValue) -> ExportError {
    ExportError::Browser(format!("{:?}", err))
}

async fn response_text(response: &Response) -> String {
    let Ok(promise) = response.text() else {
        return String::new();
    };
    JsFuture::from(promise)
        .await
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

/// Requests the workbook for `kind` with the dashboard filters as query string
pub async fn export_excel(
    kind: ExportKind,
    filters: &ExportFilters,
) -> Result<ExportDownload, ExportError> {
    let window = web_sys::window().ok_or_else(|| ExportError::Browser("no window".into()))?;
    let url = with_query(&api_url(kind.path()), filters);

    let headers = Headers::new().map_err(browser_error)?;
    headers
        .set("Accept", SPREADSHEET_MIME)
        .map_err(browser_error)?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(&url, &opts).map_err(browser_error)?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ExportError::Network(format!("{:?}", e)))?;
    let response: Response = resp_value.dyn_into().map_err(browser_error)?;

    let content_type = response
        .headers()
        .get("content-type")
        .ok()
        .flatten()
        .unwrap_or_default();

    if !response.ok() {
        let body = response_text(&response).await;
        return Err(classify_failure(Some(response.status()), &body));
    }
    if !is_spreadsheet(&content_type) {
        log::warn!("Export returned {} instead of a workbook", content_type);
        let body = response_text(&response).await;
        return Err(classify_failure(None, &body));
    }

    let disposition = response.headers().get("content-disposition").ok().flatten();
    let blob_value = JsFuture::from(response.blob().map_err(browser_error)?)
        .await
        .map_err(browser_error)?;
    let blob: Blob = blob_value.dyn_into().map_err(browser_error)?;
    check_size(blob.size() as u64)?;

    Ok(ExportDownload {
        blob,
        filename: download_name(disposition.as_deref(), kind, now_utc()),
    })
}
