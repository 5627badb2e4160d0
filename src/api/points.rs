//! Point Registration

use reqwest::multipart::{Form, Part};

use crate::form::PointForm;
use super::api_url;

/// Multipart body for a registration
fn registration_form(form: &PointForm) -> Result<Form, String> {
    let mut body = Form::new();
    for (key, value) in form.multipart_fields() {
        body = body.text(key, value);
    }
    if let Some(image) = form.image_part() {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.mime)
            .map_err(|e| e.to_string())?;
        body = body.part(image.field, part);
    }
    Ok(body)
}

/// Submit the form; returns the HTTP status of whatever the server answered
pub async fn create_point(form: &PointForm) -> Result<u16, String> {
    let body = registration_form(form)?;
    let response = reqwest::Client::new()
        .post(api_url("points"))
        .multipart(body)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    Ok(response.status().as_u16())
}
