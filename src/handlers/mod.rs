//! # Handlers de las Vistas Dinámicas
//! src/handlers/mod.rs
//!
//! Funciones puras que producen los cuerpos de las vistas dinámicas y
//! validan el body del alta:
//!
//! - `render_table`: tabla HTML de registros sustituida en el placeholder
//!   `{{students}}` de la página de lista
//! - `render_json`: arreglo JSON de registros
//! - `parse_form_body`: decodificación y validación del form url-encoded
//!   del POST de alta

use crate::registry::Record;

/// Errores al validar el body del alta (errores del cliente: 400)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// El body no es UTF-8 válido
    InvalidUtf8,

    /// Par sin `=` o con más de un `=`
    MalformedPair(String),

    /// El form no trae exactamente las claves `first` y `last`
    WrongKeys,
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::InvalidUtf8 => write!(f, "Form body is not valid UTF-8"),
            FormError::MalformedPair(p) => write!(f, "Malformed form pair: {}", p),
            FormError::WrongKeys => write!(f, "Form must contain exactly 'first' and 'last'"),
        }
    }
}

impl std::error::Error for FormError {}

/// Decodifica un string url-encoded (`+` como espacio, `%XX` por byte)
///
/// Una secuencia `%` inválida se conserva literal, igual que hace
/// `unquote_plus`. Bytes decodificados que no formen UTF-8 válido se
/// reemplazan por el carácter de sustitución.
pub fn url_decode(s: &str) -> String {
    let mut decoded: Vec<u8> = Vec::with_capacity(s.len());
    let bytes = s.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                let high = (bytes[i + 1] as char).to_digit(16).unwrap_or(0) as u8;
                let low = (bytes[i + 2] as char).to_digit(16).unwrap_or(0) as u8;
                decoded.push(high * 16 + low);
                i += 3;
            }
            other => {
                decoded.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

/// Valida el body del POST de alta y extrae `(first, last)`
///
/// El body completo se url-decodifica primero y recién después se separa
/// en `&` y `=`. El resultado debe contener exactamente las dos claves
/// `first` y `last` (en cualquier orden); cualquier otra cosa es Bad
/// Request y NO debe llegar al store.
///
/// # Ejemplo
/// ```
/// use web_server::handlers::parse_form_body;
///
/// let (first, last) = parse_form_body(b"first=Ann&last=Lee").unwrap();
/// assert_eq!(first, "Ann");
/// assert_eq!(last, "Lee");
/// ```
pub fn parse_form_body(body: &[u8]) -> Result<(String, String), FormError> {
    let text = std::str::from_utf8(body).map_err(|_| FormError::InvalidUtf8)?;
    let decoded = url_decode(text.trim());

    let mut first: Option<String> = None;
    let mut last: Option<String> = None;

    for raw_pair in decoded.split('&') {
        let (key, value) = match raw_pair.split_once('=') {
            Some((key, value)) if !value.contains('=') => (key, value),
            _ => return Err(FormError::MalformedPair(raw_pair.to_string())),
        };

        match key {
            "first" => first = Some(value.to_string()),
            "last" => last = Some(value.to_string()),
            _ => return Err(FormError::WrongKeys),
        }
    }

    match (first, last) {
        (Some(first), Some(last)) => Ok((first, last)),
        _ => Err(FormError::WrongKeys),
    }
}

/// Renderiza una fila de la tabla de estudiantes
fn render_row(record: &Record) -> String {
    format!(
        "\n<tr>\n    <td>{}</td>\n    <td>{}</td>\n    <td>{}</td>\n</tr>\n",
        record.id, record.first, record.last
    )
}

/// Renderiza la página de lista sustituyendo `{{students}}` por la tabla
///
/// Con cero registros que mostrar la tabla queda vacía; la decisión de
/// "registro totalmente vacío → body vacío" la toma el driver antes de
/// llamar aquí.
pub fn render_table(template: &str, records: &[Record]) -> String {
    let mut table = String::new();
    for record in records {
        table.push_str(&render_row(record));
    }
    template.replace("{{students}}", &table)
}

/// Renderiza los registros como arreglo JSON
pub fn render_json(records: &[Record]) -> String {
    serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string())
}
