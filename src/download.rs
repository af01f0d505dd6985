//! Browser file transfer: saving downloaded bytes and reading picked files.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::api::UploadFile;

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// Offer `bytes` to the user as a file named `file_name` through a
/// temporary object URL and anchor element.
pub fn save_bytes(bytes: &[u8], file_name: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = Array::of1(&Uint8Array::from(bytes));
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts).map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "not an anchor element".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    if let Some(body) = document.body() {
        body.append_child(&anchor).map_err(js_error)?;
        anchor.click();
        anchor.remove();
    } else {
        anchor.click();
    }

    web_sys::Url::revoke_object_url(&url).map_err(js_error)?;
    log::info!("downloaded {} ({} bytes)", file_name, bytes.len());
    Ok(())
}

/// Read a file chosen in an `<input type="file">`
pub async fn read_file(file: web_sys::File) -> Result<UploadFile, String> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_error)?;
    Ok(UploadFile {
        file_name: file.name(),
        bytes: Uint8Array::new(&buffer).to_vec(),
    })
}

/// First file selected in a file input, if any
pub fn selected_file(input: &web_sys::HtmlInputElement) -> Option<web_sys::File> {
    input.files()?.get(0)
}
