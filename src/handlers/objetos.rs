// handlers/objetos.rs - object CRUD under /api/objetos

use axum::{extract::Path, http::StatusCode, response::Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{Foto, Objeto, ObjetoConFoto};
use crate::database::DatabaseManager;
use crate::error::ApiError;

/// Full field set for both create and update; PUT is a full replace, not a
/// partial patch. `fotoUrl` is only honored on create.
#[derive(Debug, Deserialize)]
pub struct ObjetoRequest {
    pub nombre: String,
    pub tipo: Option<String>,
    pub anio: Option<i32>,
    pub precio: Option<Decimal>,
    pub estado: Option<String>,
    pub notas: Option<String>,
    pub id_catalogo_fk: i32,
    #[serde(rename = "fotoUrl")]
    pub foto_url: Option<String>,
}

/// POST /api/objetos - Insert an object and, when a photo URL is supplied,
/// its primary photo row. Both inserts share one transaction.
pub async fn crear(
    Json(payload): Json<ObjetoRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let pool = DatabaseManager::pool().await?;
    let mut tx = pool.begin().await?;

    let objeto = sqlx::query_as::<_, Objeto>(
        "INSERT INTO objetos (nombre, tipo, anio, precio, estado, notas, id_catalogo_fk)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(&payload.nombre)
    .bind(&payload.tipo)
    .bind(payload.anio)
    .bind(payload.precio)
    .bind(&payload.estado)
    .bind(&payload.notas)
    .bind(payload.id_catalogo_fk)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(url) = payload.foto_url.as_deref().filter(|u| !u.is_empty()) {
        let foto = sqlx::query_as::<_, Foto>(
            "INSERT INTO fotos (url, es_principal, id_objeto_fk)
             VALUES ($1, true, $2)
             RETURNING *",
        )
        .bind(url)
        .bind(objeto.id_objeto)
        .fetch_one(&mut *tx)
        .await?;
        tracing::debug!("Stored primary photo {} for object {}", foto.id_foto, objeto.id_objeto);
    }

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Objeto y foto agregados exitosamente",
            "objeto": objeto
        })),
    ))
}

/// GET /api/objetos/:id_catalogo - List a catalog's objects, each flattened
/// with its primary photo URL (`foto_url`, null when none).
pub async fn listar(Path(id_catalogo): Path<i32>) -> Result<Json<Vec<ObjetoConFoto>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let objetos = sqlx::query_as::<_, ObjetoConFoto>(
        "SELECT o.*, f.url AS foto_url
         FROM objetos o
         LEFT JOIN fotos f ON o.id_objeto = f.id_objeto_fk AND f.es_principal = true
         WHERE o.id_catalogo_fk = $1",
    )
    .bind(id_catalogo)
    .fetch_all(&pool)
    .await?;

    Ok(Json(objetos))
}

/// PUT /api/objetos/:id_objeto - Replace every mutable field of an object.
pub async fn actualizar(
    Path(id_objeto): Path<i32>,
    Json(payload): Json<ObjetoRequest>,
) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let objeto = sqlx::query_as::<_, Objeto>(
        "UPDATE objetos
         SET nombre = $1, tipo = $2, anio = $3, precio = $4,
             estado = $5, notas = $6, id_catalogo_fk = $7
         WHERE id_objeto = $8
         RETURNING *",
    )
    .bind(&payload.nombre)
    .bind(&payload.tipo)
    .bind(payload.anio)
    .bind(payload.precio)
    .bind(&payload.estado)
    .bind(&payload.notas)
    .bind(payload.id_catalogo_fk)
    .bind(id_objeto)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Objeto no encontrado"))?;

    Ok(Json(json!({
        "message": "Objeto modificado exitosamente",
        "objeto": objeto
    })))
}

/// DELETE /api/objetos/:id_objeto - Remove an object and its photos in one
/// transaction; answers 404 when the id does not exist.
pub async fn eliminar(Path(id_objeto): Path<i32>) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM fotos WHERE id_objeto_fk = $1")
        .bind(id_objeto)
        .execute(&mut *tx)
        .await?;

    let objeto =
        sqlx::query_as::<_, Objeto>("DELETE FROM objetos WHERE id_objeto = $1 RETURNING *")
            .bind(id_objeto)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::not_found("Objeto no encontrado"))?;

    tx.commit().await?;

    Ok(Json(json!({
        "message": "Objeto eliminado exitosamente",
        "objeto_eliminado": objeto
    })))
}
