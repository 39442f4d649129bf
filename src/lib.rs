//! # Web Server
//! src/lib.rs
//!
//! Servidor web HTTP/1.1 implementado desde cero sobre sockets TCP,
//! con un registro de estudiantes persistido en disco.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests y construcción de responses HTTP/1.1
//! - `router`: Clasificación de targets, criterios de query y MIME types
//! - `registry`: Almacenamiento append-only de estudiantes (archivo JSON)
//! - `handlers`: Renderizado de las vistas dinámicas y validación del alta
//! - `server`: Bucle TCP secuencial y pipeline por conexión
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use web_server::config::Config;
//! use web_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(config).expect("Error al iniciar servidor");
//! server.run().expect("Error fatal");
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod registry;
pub mod router;
pub mod server;
