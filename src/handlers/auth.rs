// handlers/auth.rs - POST /api/registro and POST /api/login

use axum::{http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{hash_password, verify_password};
use crate::database::models::{Coleccion, PerfilUsuario, Usuario, UsuarioPublico};
use crate::database::DatabaseManager;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegistroRequest {
    pub nombre_usuario: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/**
 * POST /api/registro - Create a user account and its primary collection
 *
 * Expected Input:
 * ```json
 * {
 *   "nombre_usuario": "string",  // Required, unique
 *   "email": "string",           // Required, unique
 *   "password": "string"         // Required, stored salted-hashed
 * }
 * ```
 *
 * Expected Output (201):
 * ```json
 * {
 *   "message": "Usuario y colección principal creados exitosamente",
 *   "usuario": { "id_usuario": 1, "nombre_usuario": "ana", "email": "ana@example.com" }
 * }
 * ```
 *
 * Both inserts run in one transaction; a duplicate username/email rolls the
 * whole registration back and surfaces as a generic 500 (the client does its
 * own constraint detection on that message).
 */
pub async fn registro(
    Json(payload): Json<RegistroRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let pool = DatabaseManager::pool().await?;
    let mut tx = pool.begin().await?;

    let usuario = sqlx::query_as::<_, UsuarioPublico>(
        "INSERT INTO usuarios (nombre_usuario, email, contrasena)
         VALUES ($1, $2, $3)
         RETURNING id_usuario, nombre_usuario, email",
    )
    .bind(&payload.nombre_usuario)
    .bind(&payload.email)
    .bind(hash_password(&payload.password))
    .fetch_one(&mut *tx)
    .await?;

    let coleccion = sqlx::query_as::<_, Coleccion>(
        "INSERT INTO colecciones (nombre, id_usuario_fk) VALUES ($1, $2) RETURNING *",
    )
    .bind(format!("Colección de {}", usuario.nombre_usuario))
    .bind(usuario.id_usuario)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!(
        "Registered user {} ({}) with collection {}",
        usuario.id_usuario,
        usuario.nombre_usuario,
        coleccion.id_coleccion
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Usuario y colección principal creados exitosamente",
            "usuario": usuario
        })),
    ))
}

/// POST /api/login - Verify credentials and return the account profile.
///
/// A missing email and a wrong password both answer the same
/// "Credenciales inválidas" 400 so the endpoint cannot be used to enumerate
/// accounts.
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| ApiError::bad_request("Credenciales inválidas"))?;

    if !verify_password(&payload.password, &usuario.contrasena) {
        return Err(ApiError::bad_request("Credenciales inválidas"));
    }

    let coleccion =
        sqlx::query_as::<_, Coleccion>("SELECT * FROM colecciones WHERE id_usuario_fk = $1")
            .bind(usuario.id_usuario)
            .fetch_optional(&pool)
            .await?;

    let perfil = PerfilUsuario {
        id_usuario: usuario.id_usuario,
        nombre_usuario: usuario.nombre_usuario,
        email: usuario.email,
        id_coleccion: coleccion.map(|c| c.id_coleccion),
        fecha_registro: usuario.fecha_registro,
    };

    Ok(Json(json!({
        "message": "Inicio de sesión exitoso",
        "usuario": perfil
    })))
}
