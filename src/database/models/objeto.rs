use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A cataloged object. Only `nombre` and the owning catalog are required;
/// the descriptive fields are all optional.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Objeto {
    pub id_objeto: i32,
    pub nombre: String,
    pub tipo: Option<String>,
    pub anio: Option<i32>,
    pub precio: Option<Decimal>,
    pub estado: Option<String>,
    pub notas: Option<String>,
    pub id_catalogo_fk: i32,
}

/// Object row flattened with its primary photo URL, as produced by the
/// LEFT JOIN in the catalog listing. `foto_url` is null for objects with
/// no primary photo.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ObjetoConFoto {
    pub id_objeto: i32,
    pub nombre: String,
    pub tipo: Option<String>,
    pub anio: Option<i32>,
    pub precio: Option<Decimal>,
    pub estado: Option<String>,
    pub notas: Option<String>,
    pub id_catalogo_fk: i32,
    pub foto_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precio_serializes_as_decimal_string() {
        // node-postgres returns NUMERIC as a string; rust_decimal's serde
        // does the same, so the wire shape is unchanged.
        let objeto = Objeto {
            id_objeto: 1,
            nombre: "Moneda".into(),
            tipo: Some("Numismática".into()),
            anio: Some(1921),
            precio: Some(Decimal::new(1250, 2)),
            estado: None,
            notas: None,
            id_catalogo_fk: 3,
        };
        let v = serde_json::to_value(&objeto).unwrap();
        assert_eq!(v["precio"], "12.50");
        assert!(v["estado"].is_null());
    }

    #[test]
    fn missing_primary_photo_is_null_on_the_wire() {
        let objeto = ObjetoConFoto {
            id_objeto: 2,
            nombre: "Sello".into(),
            tipo: None,
            anio: None,
            precio: None,
            estado: None,
            notas: None,
            id_catalogo_fk: 3,
            foto_url: None,
        };
        let v = serde_json::to_value(&objeto).unwrap();
        assert!(v.get("foto_url").unwrap().is_null());
    }
}
