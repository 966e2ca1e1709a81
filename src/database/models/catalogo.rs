use serde::Serialize;
use sqlx::FromRow;

/// Named grouping of objects within a collection.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Catalogo {
    pub id_catalogo: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub id_coleccion_fk: i32,
}
