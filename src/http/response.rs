//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! de forma programática y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta HTTP/1.1
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! content-type: text/html\r\n
//! content-length: 13\r\n
//! connection: close\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```
//!
//! Las respuestas de error fijas (400, 404, 405) y la cabecera de la
//! redirección 301 son datos inmutables a nivel de módulo, nunca estado
//! global mutable.

use super::StatusCode;
use std::collections::HashMap;

/// Respuesta 400: solo la status line, sin headers ni body
///
/// El driver la escribe tal cual y cierra la conexión.
pub const RESPONSE_400: &str = "HTTP/1.1 400 Bad Request\r\n";

/// Body fijo de la respuesta 404
pub const BODY_404: &str = "<!doctype html>\n\
<h1>404 Page not found</h1>\n\
<p>Page cannot be found.</p>\n";

/// Body fijo de la respuesta 405
pub const BODY_405: &str = "<!doctype html>\n\
<h1>405 Method Not Allowed</h1>\n\
<hr>\n\
<p>Method Not Allowed.</p>\n";

/// Construye la cabecera cruda de una redirección 301
///
/// Solo status line + header `location`, sin línea en blanco final y sin
/// body: el ciclo de respuesta continúa y el body del index se escribe a
/// continuación sobre la misma conexión.
pub fn redirect_head(location: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nlocation: {}\r\n",
        StatusCode::MovedPermanently,
        location
    )
}

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers HTTP (content-type, content-length, etc.)
    /// Usamos HashMap para evitar duplicados
    headers: HashMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene headers ni body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_header("content-type", "text/html");
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// Automáticamente calcula y agrega el header `content-length`.
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para archivos estáticos binarios (imágenes, etc.)
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self.headers
            .insert("content-length".to_string(), self.body.len().to_string());
        self
    }

    /// Respuesta 200 para contenido servido (archivo, tabla HTML o JSON)
    ///
    /// Incluye `content-type`, `content-length` y `connection: close`
    /// (el servidor no mantiene conexiones persistentes).
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::Response;
    ///
    /// let response = Response::ok("text/html", b"<h1>Hola</h1>".to_vec());
    /// assert_eq!(response.headers().get("connection"), Some(&"close".to_string()));
    /// ```
    pub fn ok(content_type: &str, body: Vec<u8>) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("content-type", content_type)
            .with_header("connection", "close")
            .with_body_bytes(body)
    }

    /// Respuesta 404 fija (archivo estático inexistente)
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
            .with_header("content-type", "text/html")
            .with_header("connection", "close")
            .with_body(BODY_404)
    }

    /// Respuesta 405 fija (método no permitido en una ruta conocida)
    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::MethodNotAllowed)
            .with_header("content-type", "text/html")
            .with_header("connection", "close")
            .with_body(BODY_405)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el formato completo HTTP/1.1:
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `header-name: value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        let status_line = format!("HTTP/1.1 {}\r\n", self.status);
        result.extend_from_slice(status_line.as_bytes());

        // 2. Headers
        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
