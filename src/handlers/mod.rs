// handlers/mod.rs - one module per endpoint group
//
// All endpoints are public: the contract has no token auth, only per-request
// password re-entry on destructive operations (catalog delete, profile update).

pub mod auth; // POST /api/registro, /api/login
pub mod catalogos; // /api/catalogos
pub mod objetos; // /api/objetos
pub mod upload; // POST /api/upload
pub mod usuarios; // PUT /api/usuarios/:id_usuario
