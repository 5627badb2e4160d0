//! Leptos Dropzone
//!
//! Single-file drop target for Leptos. A file can be dropped onto the zone
//! or picked through the file dialog; the zone then shows a preview and
//! hands the file contents to a callback.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::DragEvent;

/// A file read into memory
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DroppedFile {
    /// Original file name
    pub name: String,
    /// MIME type reported by the browser (may be empty)
    pub mime: String,
    /// File contents
    pub bytes: Vec<u8>,
    /// Object URL usable as an `<img src>`
    pub preview_url: String,
}

impl DroppedFile {
    /// MIME type, falling back to `application/octet-stream`
    pub fn mime_or_default(&self) -> &str {
        if self.mime.is_empty() {
            "application/octet-stream"
        } else {
            &self.mime
        }
    }
}

/// Check a file against an `accept` attribute value
///
/// Supports `*/*`, wildcard majors like `image/*`, exact MIME types and
/// `.ext` extensions, comma separated.
pub fn accepts_file(name: &str, mime: &str, accept: &str) -> bool {
    let mut patterns = accept.split(',').map(str::trim).filter(|p| !p.is_empty()).peekable();
    if patterns.peek().is_none() {
        return true;
    }

    patterns.any(|pattern| {
        if pattern == "*/*" {
            true
        } else if let Some(ext) = pattern.strip_prefix('.') {
            name.to_ascii_lowercase().ends_with(&format!(".{}", ext.to_ascii_lowercase()))
        } else if let Some(major) = pattern.strip_suffix("/*") {
            mime.split_once('/')
                .map(|(m, _)| m.eq_ignore_ascii_case(major))
                .unwrap_or(false)
        } else {
            mime.eq_ignore_ascii_case(pattern)
        }
    })
}

/// Read a browser file into a [`DroppedFile`]
pub async fn read_file(file: web_sys::File) -> Result<DroppedFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let preview_url = web_sys::Url::create_object_url_with_blob(&file)
        .map_err(|e| format!("{:?}", e))?;

    Ok(DroppedFile {
        name: file.name(),
        mime: file.type_(),
        bytes,
        preview_url,
    })
}

/// Drop zone accepting a single file
#[component]
pub fn Dropzone(
    /// Called with every accepted file
    #[prop(into)]
    on_file_uploaded: Callback<DroppedFile>,
    /// `accept` filter, defaults to `image/*`
    #[prop(optional, into)]
    accept: Option<String>,
    /// Text shown while no file is selected
    #[prop(optional, into)]
    label: Option<String>,
) -> impl IntoView {
    let accept = accept.unwrap_or_else(|| "image/*".to_string());
    let label = label.unwrap_or_else(|| "Imagem do estabelecimento".to_string());
    let accept_attr = accept.clone();
    let accept = StoredValue::new(accept);

    let (preview, set_preview) = signal(None::<String>);
    let (is_over, set_is_over) = signal(false);

    let handle_file = move |file: web_sys::File| {
        if !accept.with_value(|a| accepts_file(&file.name(), &file.type_(), a)) {
            web_sys::console::warn_1(&format!("[DROPZONE] Ignoring {} ({})", file.name(), file.type_()).into());
            return;
        }
        spawn_local(async move {
            match read_file(file).await {
                Ok(dropped) => {
                    if let Some(old) = preview.get_untracked() {
                        let _ = web_sys::Url::revoke_object_url(&old);
                    }
                    set_preview.set(Some(dropped.preview_url.clone()));
                    on_file_uploaded.run(dropped);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[DROPZONE] Failed to read file: {}", e).into());
                }
            }
        });
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_over.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_over.set(false);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_over.set(false);

        let file = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            handle_file(file);
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            handle_file(file);
        }
    };

    view! {
        <label
            class=move || if is_over.get() { "dropzone active" } else { "dropzone" }
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <input type="file" accept=accept_attr on:change=on_change />
            {move || match preview.get() {
                Some(url) => view! { <img src=url alt="Imagem selecionada" /> }.into_any(),
                None => view! { <p>{label.clone()}</p> }.into_any(),
            }}
        </label>
    }
}
