use serde::Serialize;
use sqlx::FromRow;

/// Photo row attached to an object. Only the row flagged `es_principal` is
/// surfaced on object reads; other rows are stored but not queried.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Foto {
    pub id_foto: i32,
    pub url: String,
    pub es_principal: bool,
    pub id_objeto_fk: i32,
}
