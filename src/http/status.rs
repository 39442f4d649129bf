//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Este módulo define los códigos de estado HTTP/1.1 que usa el servidor.
//! Solo necesitamos un subconjunto pequeño:
//!
//! - **2xx**: Éxito (200 OK)
//! - **3xx**: Redirección (301 para directorios)
//! - **4xx**: Error del cliente (400, 404, 405)

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 301 Moved Permanently - Acceso a un directorio redirige a su index.html
    MovedPermanently = 301,

    /// 400 Bad Request - Request line, headers, body o query malformados
    BadRequest = 400,

    /// 404 Not Found - Archivo estático no encontrado
    NotFound = 404,

    /// 405 Method Not Allowed - Método no permitido en la ruta
    MethodNotAllowed = 405,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }

    /// Verifica si el código indica error del cliente (4xx)
    pub fn is_client_error(&self) -> bool {
        let code = self.as_u16();
        (400..500).contains(&code)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_values() {
        assert_eq!(StatusCode::Ok.as_u16(), 200);
        assert_eq!(StatusCode::MovedPermanently.as_u16(), 301);
        assert_eq!(StatusCode::BadRequest.as_u16(), 400);
        assert_eq!(StatusCode::NotFound.as_u16(), 404);
        assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
        assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
        assert_eq!(StatusCode::MethodNotAllowed.reason_phrase(), "Method Not Allowed");
    }

    #[test]
    fn test_is_success() {
        assert!(StatusCode::Ok.is_success());
        assert!(!StatusCode::BadRequest.is_success());
        assert!(!StatusCode::MovedPermanently.is_success());
    }

    #[test]
    fn test_is_client_error() {
        assert!(!StatusCode::Ok.is_client_error());
        assert!(StatusCode::BadRequest.is_client_error());
        assert!(StatusCode::NotFound.is_client_error());
        assert!(StatusCode::MethodNotAllowed.is_client_error());
        assert!(!StatusCode::MovedPermanently.is_client_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusCode::Ok.to_string(), "200 OK");
        assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
        assert_eq!(StatusCode::MovedPermanently.to_string(), "301 Moved Permanently");
    }
}
