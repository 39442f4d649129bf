//! # Tipos del Registro de Estudiantes
//! src/registry/types.rs
//!
//! Define el registro (`Record`) y los criterios de filtrado (`Criteria`).
//!
//! Los criterios tienen un esquema fijo: una restricción opcional por campo
//! del registro, con el tipo correcto (el id es numérico, el resto son
//! strings). Nada de diccionarios dinámicos.

use serde::{Deserialize, Serialize};

/// Un estudiante del registro
///
/// El `id` lo asigna el store: 1 para el primer registro, `último id + 1`
/// después. Los ids nunca se reusan ni se reasignan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identificador único, estrictamente creciente en orden de inserción
    pub id: u32,

    /// Nombre
    pub first: String,

    /// Apellido
    pub last: String,
}

/// Criterios de filtrado extraídos de la query string
///
/// Un campo en `None` no restringe. Un registro matchea si TODOS los
/// criterios presentes son iguales al campo correspondiente (igualdad
/// exacta de string o de entero).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Filtro por identificador (se coerciona a entero)
    pub id: Option<u32>,

    /// Filtro por nombre
    pub first: Option<String>,

    /// Filtro por apellido
    pub last: Option<String>,
}

/// Errores al normalizar criterios (ambos son errores del cliente: 400)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    /// El valor del campo `id` no es un entero
    InvalidId(String),

    /// La query usa un campo que no existe en el registro
    UnknownField(String),
}

impl std::fmt::Display for CriteriaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CriteriaError::InvalidId(v) => write!(f, "Invalid id criterion: {}", v),
            CriteriaError::UnknownField(k) => write!(f, "Unknown filter field: {}", k),
        }
    }
}

impl std::error::Error for CriteriaError {}

impl Criteria {
    /// Criterios vacíos (sin restricciones)
    pub fn none() -> Self {
        Self::default()
    }

    /// Normaliza pares clave/valor de la query string en criterios tipados
    ///
    /// Reglas:
    /// - un valor de string vacío se descarta (sin restricción en ese campo)
    /// - el valor de `id` se coerciona a entero; si no parsea es error
    /// - una clave que no es campo del registro es error
    /// - claves repetidas: gana la última (semántica de diccionario)
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::registry::Criteria;
    ///
    /// let pairs = vec![
    ///     ("first".to_string(), "Mick".to_string()),
    ///     ("last".to_string(), "".to_string()),
    /// ];
    /// let criteria = Criteria::from_pairs(&pairs).unwrap();
    /// assert_eq!(criteria.first.as_deref(), Some("Mick"));
    /// assert_eq!(criteria.last, None);
    /// ```
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, CriteriaError> {
        let mut criteria = Criteria::none();

        for (key, value) in pairs {
            // Valor vacío: sin restricción en este campo
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                "id" => {
                    let id = value
                        .parse::<u32>()
                        .map_err(|_| CriteriaError::InvalidId(value.clone()))?;
                    criteria.id = Some(id);
                }
                "first" => criteria.first = Some(value.clone()),
                "last" => criteria.last = Some(value.clone()),
                _ => return Err(CriteriaError::UnknownField(key.clone())),
            }
        }

        Ok(criteria)
    }

    /// Verifica si no hay ninguna restricción
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.first.is_none() && self.last.is_none()
    }

    /// Verifica si un registro satisface todos los criterios presentes
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(id) = self.id {
            if record.id != id {
                return false;
            }
        }
        if let Some(ref first) = self.first {
            if &record.first != first {
                return false;
            }
        }
        if let Some(ref last) = self.last {
            if &record.last != last {
                return false;
            }
        }
        true
    }
}
