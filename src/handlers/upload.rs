// handlers/upload.rs - POST /api/upload (multipart photo upload)

use std::path::Path;

use axum::{extract::Multipart, http::HeaderMap, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::config::config;
use crate::error::ApiError;

/// POST /api/upload - Store one photo from the multipart field "foto" and
/// answer with the URL it will be served under.
///
/// The stored name is `{millis}-{random}.{ext}` so concurrent uploads of the
/// same original filename never collide. The URL is rebuilt from the
/// request's observed protocol and host, not from configuration.
pub async fn upload_foto(
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut stored: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("foto") {
            continue;
        }

        let original = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        if data.is_empty() {
            continue;
        }

        let filename = generated_filename(&original);
        let dir = &config().uploads.dir;
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(Path::new(dir).join(&filename), &data).await?;

        tracing::info!("Stored upload {} ({} bytes)", filename, data.len());
        stored = Some(filename);
        break;
    }

    let filename = stored.ok_or_else(|| ApiError::bad_request("No se subió ningún archivo."))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Archivo subido exitosamente",
            "url": format!("{}/uploads/{}", observed_origin(&headers), filename)
        })),
    ))
}

/// Scheme + host as the client reached us, e.g. "http://localhost:5000".
/// Honors X-Forwarded-Proto when a proxy terminates TLS in front of us.
fn observed_origin(headers: &HeaderMap) -> String {
    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("{}://{}", proto, host)
}

/// Unique on-disk name preserving the original extension.
fn generated_filename(original: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = &uuid::Uuid::new_v4().simple().to_string()[..8];
    match Path::new(original).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-{}.{}", millis, suffix, ext),
        None => format!("{}-{}", millis, suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn filename_preserves_extension() {
        let name = generated_filename("mi foto.JPG");
        assert!(name.ends_with(".JPG"));
        assert!(!name.contains(' '));
    }

    #[test]
    fn filename_without_extension_has_no_trailing_dot() {
        let name = generated_filename("archivo");
        assert!(!name.ends_with('.'));
        assert!(!name.contains('.'));
    }

    #[test]
    fn filenames_are_unique() {
        let a = generated_filename("a.png");
        let b = generated_filename("a.png");
        assert_ne!(a, b);
    }

    #[test]
    fn origin_defaults_to_http_and_honors_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::HOST, HeaderValue::from_static("api.example.com"));
        assert_eq!(observed_origin(&headers), "http://api.example.com");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(observed_origin(&headers), "https://api.example.com");
    }
}
