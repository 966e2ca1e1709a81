pub mod catalogo;
pub mod coleccion;
pub mod foto;
pub mod objeto;
pub mod usuario;

pub use catalogo::Catalogo;
pub use coleccion::Coleccion;
pub use foto::Foto;
pub use objeto::{Objeto, ObjetoConFoto};
pub use usuario::{PerfilUsuario, Usuario, UsuarioPublico};
