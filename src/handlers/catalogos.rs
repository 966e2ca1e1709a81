// handlers/catalogos.rs - catalog CRUD under /api/catalogos

use axum::{extract::Path, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::verify_password;
use crate::database::models::Catalogo;
use crate::database::DatabaseManager;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CrearCatalogoRequest {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub id_coleccion_fk: i32,
}

#[derive(Debug, Deserialize)]
pub struct EliminarCatalogoRequest {
    pub id_usuario: i32,
    pub password: String,
}

/// POST /api/catalogos - Create a catalog inside a collection.
///
/// Name emptiness is enforced client-side only; the server inserts whatever
/// it receives, matching the canonical contract.
pub async fn crear(
    Json(payload): Json<CrearCatalogoRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let pool = DatabaseManager::pool().await?;

    let catalogo = sqlx::query_as::<_, Catalogo>(
        "INSERT INTO catalogos (nombre, descripcion, id_coleccion_fk)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(&payload.nombre)
    .bind(&payload.descripcion)
    .bind(payload.id_coleccion_fk)
    .fetch_one(&pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Catálogo creado exitosamente",
            "catalogo": catalogo
        })),
    ))
}

/// GET /api/catalogos/:id_coleccion - List a collection's catalogs.
///
/// No ORDER BY: the contract makes no ordering guarantee.
pub async fn listar(Path(id_coleccion): Path<i32>) -> Result<Json<Vec<Catalogo>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let catalogos =
        sqlx::query_as::<_, Catalogo>("SELECT * FROM catalogos WHERE id_coleccion_fk = $1")
            .bind(id_coleccion)
            .fetch_all(&pool)
            .await?;

    Ok(Json(catalogos))
}

/// DELETE /api/catalogos/:id_catalogo - Delete a catalog after re-checking
/// the requesting user's password.
///
/// Photos, objects and the catalog row are removed in a single transaction,
/// so a failure partway leaves nothing orphaned. The password check is not
/// bound to catalog ownership (see DESIGN.md, open question).
pub async fn eliminar(
    Path(id_catalogo): Path<i32>,
    Json(payload): Json<EliminarCatalogoRequest>,
) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let contrasena: String =
        sqlx::query_scalar("SELECT contrasena FROM usuarios WHERE id_usuario = $1")
            .bind(payload.id_usuario)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| ApiError::not_found("Usuario no encontrado"))?;

    if !verify_password(&payload.password, &contrasena) {
        return Err(ApiError::unauthorized(
            "Contraseña incorrecta. No se eliminó nada.",
        ));
    }

    let mut tx = pool.begin().await?;

    sqlx::query(
        "DELETE FROM fotos WHERE id_objeto_fk IN
           (SELECT id_objeto FROM objetos WHERE id_catalogo_fk = $1)",
    )
    .bind(id_catalogo)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM objetos WHERE id_catalogo_fk = $1")
        .bind(id_catalogo)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM catalogos WHERE id_catalogo = $1 RETURNING id_catalogo")
        .bind(id_catalogo)
        .execute(&mut *tx)
        .await?;

    if deleted.rows_affected() == 0 {
        // Dropping the uncommitted transaction rolls everything back.
        return Err(ApiError::not_found("El catálogo no existe"));
    }

    tx.commit().await?;
    tracing::info!("Deleted catalog {} for user {}", id_catalogo, payload.id_usuario);

    Ok(Json(json!({ "message": "Catálogo eliminado correctamente" })))
}
