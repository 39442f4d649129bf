//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que usa el servidor,
//! sin librerías de alto nivel. Incluye:
//!
//! - Parsing de requests directamente sobre el stream de bytes
//! - Construcción de responses HTTP
//! - Manejo de status codes
//!
//! ### Formato de Request
//!
//! ```text
//! GET /app-index?first=Mick HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! content-type: text/html\r\n
//! content-length: 13\r\n
//! connection: close\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{read_body, Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
