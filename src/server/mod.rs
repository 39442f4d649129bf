//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes de a una
//! 3. Lee y parsea requests HTTP
//! 4. Genera y envía responses HTTP

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::Server;
