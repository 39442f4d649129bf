//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo clasifica el target de cada request contra una tabla fija
//! de rutas y lo normaliza a una ruta del filesystem.
//!
//! ## Arquitectura
//!
//! ```text
//! target → clasificación → {vista lista, vista json, alta, archivo estático}
//! ```
//!
//! Las rutas dinámicas se aceptan con y sin el prefijo del directorio de
//! assets, como alias nombrados con matching exacto de segmento (nada de
//! "contiene el substring").

use std::path::{Path, PathBuf};

/// Prefijo público del directorio de assets
pub const WWW_PREFIX: &str = "/www-data";

/// Página compartida de las vistas lista y json (contiene `{{students}}`)
pub const LIST_PAGE: &str = "/www-data/app_list.html";

/// Clasificación de un target contra la tabla fija de rutas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// GET `/app-index[?criterios]`: tabla HTML de registros
    ListView,

    /// GET `/app-json[?criterios]`: arreglo JSON de registros
    JsonView,

    /// POST `/app-add`: alta de un registro (sink con efecto, sin contenido)
    AddView,

    /// Cualquier otro target: candidato a archivo estático
    StaticFile,
}

/// Errores al descomponer la query string (error del cliente: 400)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Par sin `=`, con más de un `=`, o vacío
    MalformedPair(String),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::MalformedPair(p) => write!(f, "Malformed query pair: {}", p),
        }
    }
}

impl std::error::Error for QueryError {}

/// Separa el target en path y query string (en el primer `?`)
///
/// # Ejemplo
/// ```
/// use web_server::router::split_target;
///
/// assert_eq!(split_target("/app-index?first=Mick"), ("/app-index", Some("first=Mick")));
/// assert_eq!(split_target("/index.html"), ("/index.html", None));
/// ```
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Clasifica el path (sin query) contra la tabla de alias
///
/// Cada ruta dinámica tiene dos alias exactos: con y sin el prefijo
/// `/www-data`. Todo lo demás es candidato a archivo estático.
pub fn classify(path: &str) -> RouteClass {
    match path {
        "/app-index" | "/www-data/app-index" => RouteClass::ListView,
        "/app-json" | "/www-data/app-json" => RouteClass::JsonView,
        "/app-add" | "/www-data/app-add" => RouteClass::AddView,
        _ => RouteClass::StaticFile,
    }
}

/// Descompone la query string en pares clave/valor
///
/// Se separa en `&` y cada par en su único `=`. Un par sin `=`, con un
/// segundo `=`, o vacío, es malformado (Bad Request).
///
/// # Ejemplo
/// ```
/// use web_server::router::parse_query_pairs;
///
/// let pairs = parse_query_pairs("first=Mick&last=").unwrap();
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[0], ("first".to_string(), "Mick".to_string()));
/// assert_eq!(pairs[1], ("last".to_string(), "".to_string()));
/// ```
pub fn parse_query_pairs(query: &str) -> Result<Vec<(String, String)>, QueryError> {
    let mut pairs = Vec::new();

    for raw_pair in query.split('&') {
        match raw_pair.split_once('=') {
            Some((key, value)) if !value.contains('=') => {
                pairs.push((key.to_string(), value.to_string()));
            }
            _ => return Err(QueryError::MalformedPair(raw_pair.to_string())),
        }
    }

    Ok(pairs)
}

/// Agrega el prefijo `/www-data` si el target todavía no lo lleva
///
/// # Ejemplo
/// ```
/// use web_server::router::normalize_target;
///
/// assert_eq!(normalize_target("/index.html"), "/www-data/index.html");
/// assert_eq!(normalize_target("/www-data/index.html"), "/www-data/index.html");
/// assert_eq!(normalize_target("/"), "/www-data/");
/// ```
pub fn normalize_target(path: &str) -> String {
    if path == WWW_PREFIX || path.starts_with("/www-data/") {
        path.to_string()
    } else {
        format!("{}{}", WWW_PREFIX, path)
    }
}

/// Mapea un target normalizado (`/www-data/...`) al filesystem bajo la raíz
/// de assets configurada
///
/// # Ejemplo
/// ```
/// use web_server::router::resolve_path;
///
/// let path = resolve_path("./www-data", "/www-data/subdir/index.html");
/// assert_eq!(path.to_str().unwrap(), "./www-data/subdir/index.html");
/// ```
pub fn resolve_path(www_root: &str, target: &str) -> PathBuf {
    let relative = target
        .strip_prefix(WWW_PREFIX)
        .unwrap_or(target)
        .trim_start_matches('/');
    Path::new(www_root).join(relative)
}

/// Resuelve el MIME type por extensión de archivo
///
/// Extensión desconocida o ausente: `application/octet-stream`.
/// (La vista JSON fuerza `application/json` sin importar la extensión;
/// eso lo decide el driver, no esta tabla.)
pub fn mime_type(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("pdf") => "application/pdf",
        Some("xml") => "application/xml",
        _ => "application/octet-stream",
    }
}
