//! Browser file handles for the image picker

use js_sys::Promise;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileList, FileReader};

use crate::domain::a002_model_entry::images::ImageFile;

/// A `File` chosen through the input or dropped on the zone
#[derive(Debug, Clone, PartialEq)]
pub struct PickedImage(pub File);

impl ImageFile for PickedImage {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }
}

pub fn files_from_list(list: Option<FileList>) -> Vec<PickedImage> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(PickedImage)
        .collect()
}

/// Decodes a file into a data URL for its preview thumbnail
pub async fn read_data_url(file: &File) -> Result<String, String> {
    let reader = FileReader::new().map_err(|e| format!("{e:?}"))?;

    let promise = Promise::new(&mut |resolve, reject| {
        let loaded = reader.clone();
        let on_load = Closure::once_into_js(move || {
            let result = loaded.result().unwrap_or(JsValue::NULL);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let on_error = Closure::once_into_js(move || {
            let _ = reject.call0(&JsValue::NULL);
        });
        reader.set_onload(Some(on_load.unchecked_ref()));
        reader.set_onerror(Some(on_error.unchecked_ref()));
    });

    reader
        .read_as_data_url(file)
        .map_err(|e| format!("{e:?}"))?;

    let value = JsFuture::from(promise)
        .await
        .map_err(|_| format!("Could not read {}", file.name()))?;
    value
        .as_string()
        .ok_or_else(|| format!("Could not read {}", file.name()))
}
