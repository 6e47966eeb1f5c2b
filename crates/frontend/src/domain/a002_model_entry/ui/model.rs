use contracts::domain::a002_model_entry::SUBMIT_PATH;
use contracts::shared::api_message::ApiMessage;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

use super::picked_file::PickedImage;
use crate::domain::a002_model_entry::payload::{FormPart, PartValue};
use crate::shared::api_utils::{api_url, ensure_success, error_from_body, ApiError};

fn to_form_data(parts: &[FormPart<PickedImage>]) -> Result<FormData, ApiError> {
    let form_data = FormData::new().map_err(ApiError::browser)?;
    for part in parts {
        match &part.value {
            PartValue::Text(value) => form_data.append_with_str(&part.name, value),
            PartValue::File(file) => {
                form_data.append_with_blob_and_filename(&part.name, &file.0, &file.0.name())
            }
        }
        .map_err(ApiError::browser)?;
    }
    Ok(form_data)
}

/// Posts the whole form as one multipart body; returns the server message
pub async fn submit_entries(parts: &[FormPart<PickedImage>]) -> Result<String, ApiError> {
    let form_data = to_form_data(parts)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form_data);

    let request =
        Request::new_with_str_and_init(&api_url(SUBMIT_PATH), &opts).map_err(ApiError::browser)?;

    let window = web_sys::window().ok_or_else(|| ApiError::Browser("no window".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;
    let resp: Response = resp_value.dyn_into().map_err(ApiError::browser)?;

    let text = JsFuture::from(resp.text().map_err(ApiError::browser)?)
        .await
        .map_err(ApiError::browser)?;
    let text = text.as_string().unwrap_or_default();

    if !resp.ok() {
        return Err(error_from_body(resp.status(), &text));
    }

    let reply: ApiMessage =
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;
    ensure_success(reply)
}
