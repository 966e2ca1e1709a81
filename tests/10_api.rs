mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;

    // OK with a database, SERVICE_UNAVAILABLE without one; both prove liveness
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );

    let _body = res.json::<serde_json::Value>().await?;
    Ok(())
}

#[tokio::test]
async fn root_describes_the_api() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(&server.base_url).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["name"], "coleccion-api");
    assert!(body["endpoints"]["registro"].is_string());
    Ok(())
}

#[tokio::test]
async fn upload_without_file_returns_400() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Multipart body with no "foto" field at all
    let form = reqwest::multipart::Form::new().text("otro", "valor");
    let res = client
        .post(format!("{}/api/upload", server.base_url))
        .multipart(form)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "No se subió ningún archivo.");
    Ok(())
}

#[tokio::test]
async fn upload_stores_file_and_serves_it_back() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let contents: &[u8] = b"\x89PNG fake image bytes";
    let part = reqwest::multipart::Part::bytes(contents.to_vec())
        .file_name("mi foto.png")
        .mime_str("image/png")?;
    let form = reqwest::multipart::Form::new().part("foto", part);

    let res = client
        .post(format!("{}/api/upload", server.base_url))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Archivo subido exitosamente");

    let url = body["url"].as_str().expect("url field");
    assert!(url.contains("/uploads/"), "unexpected url: {}", url);
    assert!(url.ends_with(".png"), "extension not preserved: {}", url);

    // The returned URL must be reachable on the same host
    let served = client.get(url).send().await?;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.bytes().await?.as_ref(), contents);
    Ok(())
}
