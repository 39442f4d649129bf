//! # Registro de Estudiantes
//! src/registry/mod.rs
//!
//! Este módulo implementa el almacenamiento de los estudiantes:
//!
//! - `types`: el registro (`Record`) y los criterios tipados de filtrado
//! - `store`: persistencia append-only en un archivo JSON con id
//!   autoincremental
//!
//! El store es plano: una secuencia ordenada de registros que se
//! serializa completa en cada escritura.

pub mod store;
pub mod types;

// Re-exportar para facilitar el uso
pub use store::RecordStore;
pub use types::{Criteria, CriteriaError, Record};
