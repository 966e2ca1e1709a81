use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Full account row, including the stored credential. Never serialized;
/// handlers project into [`UsuarioPublico`] or [`PerfilUsuario`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id_usuario: i32,
    pub nombre_usuario: String,
    pub email: String,
    pub contrasena: String,
    pub fecha_registro: DateTime<Utc>,
}

/// Password-free projection returned by registration and profile updates.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UsuarioPublico {
    pub id_usuario: i32,
    pub nombre_usuario: String,
    pub email: String,
}

/// Login response profile; carries the account's collection id so the
/// client can load the dashboard without a second lookup.
#[derive(Debug, Clone, Serialize)]
pub struct PerfilUsuario {
    pub id_usuario: i32,
    pub nombre_usuario: String,
    pub email: String,
    pub id_coleccion: Option<i32>,
    pub fecha_registro: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfil_serializes_collection_id_as_null_when_absent() {
        let perfil = PerfilUsuario {
            id_usuario: 7,
            nombre_usuario: "ana".into(),
            email: "ana@example.com".into(),
            id_coleccion: None,
            fecha_registro: Utc::now(),
        };
        let v = serde_json::to_value(&perfil).unwrap();
        assert_eq!(v["id_usuario"], 7);
        assert!(v["id_coleccion"].is_null());
    }
}
