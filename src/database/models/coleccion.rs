use serde::Serialize;
use sqlx::FromRow;

/// Top-level container, created automatically alongside its owning user.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Coleccion {
    pub id_coleccion: i32,
    pub nombre: String,
    pub id_usuario_fk: i32,
}
