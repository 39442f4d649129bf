//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 desde cero, directamente
//! sobre el stream de bytes de la conexión.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! GET /app-index?first=Mick HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD TARGET VERSION` (exactamente tres tokens)
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: solo en POST; su largo lo define el header `Content-Length`
//!    y se lee aparte con [`read_body`]

use std::collections::HashMap;
use std::io::{BufRead, Read};

/// Métodos HTTP reconocidos
///
/// Un método desconocido no es un error de parseo: se conserva el token
/// y el router responde 405 al clasificar la ruta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,

    /// Cualquier otro token de método (rechazado con 405 al rutear)
    Other(String),
}

impl Method {
    /// Clasifica el token de método de la request line
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            _ => Method::Other(s.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(s) => s.as_str(),
        }
    }
}

/// Representa un request HTTP/1.1 parseado
///
/// Se construye una vez por conexión y es inmutable durante todo el
/// procesamiento de esa conexión.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, POST u otro token)
    method: Method,

    /// Request-URI crudo, puede incluir query string (ej: "/app-index?first=Mick")
    target: String,

    /// Versión HTTP tal como llegó (la valida el router, no el parser)
    version: String,

    /// Headers HTTP (ej: {"Host": "localhost:8080"})
    headers: HashMap<String, String>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// El peer cerró la conexión sin enviar nada
    EmptyRequest,

    /// El stream terminó antes de la línea vacía que cierra los headers
    IncompleteRequest,

    /// La request line no tiene exactamente tres tokens
    InvalidRequestLine,

    /// Header sin separador ':'
    InvalidHeader(String),

    /// Error de I/O leyendo del stream
    Io(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::IncompleteRequest => write!(f, "Incomplete HTTP request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::InvalidHeader(h) => write!(f, "Invalid header: {}", h),
            ParseError::Io(e) => write!(f, "I/O error while parsing: {}", e),
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea un request HTTP/1.1 desde un stream orientado a líneas
    ///
    /// Lee la request line y los headers hasta la línea vacía. NO lee el
    /// body: eso le corresponde al handler que lo necesite, usando
    /// `Content-Length` y [`read_body`].
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use std::io::BufReader;
    /// use web_server::http::Request;
    ///
    /// let raw: &[u8] = b"GET /index.html HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::read_from(&mut BufReader::new(raw)).unwrap();
    ///
    /// assert_eq!(request.target(), "/index.html");
    /// assert_eq!(request.header("Host"), Some("localhost"));
    /// ```
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ParseError> {
        let mut line = String::new();
        let n = reader
            .read_line(&mut line)
            .map_err(|e| ParseError::Io(e.to_string()))?;

        if n == 0 {
            return Err(ParseError::EmptyRequest);
        }

        // 1. Parsear la request line: exactamente METHOD TARGET VERSION
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::from_token(parts[0]);
        let target = parts[1].to_string();
        let version = parts[2].to_string();

        // 2. Parsear headers hasta la línea vacía
        let headers = Self::parse_headers(reader)?;

        Ok(Request {
            method,
            target,
            version,
            headers,
        })
    }

    /// Parsea los headers HTTP hasta encontrar la línea vacía
    ///
    /// Cada header tiene formato: "Name: Value". Nombres y valores se
    /// recortan de espacios alrededor; la capitalización se preserva.
    fn parse_headers<R: BufRead>(reader: &mut R) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        loop {
            let mut line = String::new();
            let n = reader
                .read_line(&mut line)
                .map_err(|e| ParseError::Io(e.to_string()))?;

            // EOF antes de la línea vacía: request truncado
            if n == 0 {
                return Err(ParseError::IncompleteRequest);
            }

            let line = line.trim();
            if line.is_empty() {
                return Ok(headers);
            }

            match line.find(':') {
                Some(colon_pos) => {
                    let name = line[..colon_pos].trim().to_string();
                    let value = line[colon_pos + 1..].trim().to_string();
                    headers.insert(name, value);
                }
                None => return Err(ParseError::InvalidHeader(line.to_string())),
            }
        }
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el request-URI crudo (incluye query string si la hay)
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Obtiene la versión HTTP tal como llegó
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (lookup exacto, los nombres preservan
    /// su capitalización original)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }
}

/// Lee exactamente `length` bytes del stream (el body de un POST)
///
/// El largo viene del header `Content-Length`; si el peer envía menos
/// bytes el error de I/O se propaga al caller.
pub fn read_body<R: BufRead>(reader: &mut R, length: usize) -> std::io::Result<Vec<u8>> {
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body)?;
    Ok(body)
}
