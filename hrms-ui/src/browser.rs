//! Small wrappers over browser dialogs and downloads

use crate::error::ApiError;
use wasm_bindgen::{JsCast, JsValue};

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// `None` when the prompt was cancelled or no window exists
pub fn prompt(message: &str) -> Option<String> {
    web_sys::window()
        .and_then(|w| w.prompt_with_message(message).ok())
        .flatten()
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn js_error(err: JsValue) -> ApiError {
    ApiError::network(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Offer `contents` to the user as a file download
pub fn download_text(file_name: &str, mime: &str, contents: &str) -> Result<(), ApiError> {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ApiError::network("no document available"))?;
    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ApiError::network("failed to create download link"))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(js_error)
}
