// handlers/usuarios.rs - PUT /api/usuarios/:id_usuario (profile update)

use axum::{extract::Path, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::verify_password;
use crate::database::models::UsuarioPublico;
use crate::database::DatabaseManager;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ActualizarPerfilRequest {
    pub nombre_usuario: String,
    pub email: String,
    #[serde(rename = "currentPassword")]
    pub current_password: String,
}

/// PUT /api/usuarios/:id_usuario - Update username/email after confirming
/// the current password.
///
/// 404 when the id does not exist, 401 on a wrong password; uniqueness
/// violations surface as a generic 500 like on registration.
pub async fn actualizar_perfil(
    Path(id_usuario): Path<i32>,
    Json(payload): Json<ActualizarPerfilRequest>,
) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let contrasena: String =
        sqlx::query_scalar("SELECT contrasena FROM usuarios WHERE id_usuario = $1")
            .bind(id_usuario)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| ApiError::not_found("Usuario no encontrado"))?;

    if !verify_password(&payload.current_password, &contrasena) {
        return Err(ApiError::unauthorized(
            "La contraseña es incorrecta. No se aplicaron cambios.",
        ));
    }

    let usuario = sqlx::query_as::<_, UsuarioPublico>(
        "UPDATE usuarios
         SET nombre_usuario = $1, email = $2
         WHERE id_usuario = $3
         RETURNING id_usuario, nombre_usuario, email",
    )
    .bind(&payload.nombre_usuario)
    .bind(&payload.email)
    .bind(id_usuario)
    .fetch_one(&pool)
    .await?;

    tracing::info!("Updated profile for user {}", id_usuario);

    Ok(Json(json!({
        "message": "Perfil actualizado exitosamente",
        "usuario": usuario
    })))
}
