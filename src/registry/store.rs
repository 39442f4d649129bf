//! # Persistencia del Registro de Estudiantes
//! src/registry/store.rs
//!
//! Store append-only respaldado por un único archivo JSON en disco.
//! No existe camino de borrado: los ids nunca se reusan.

use crate::registry::types::{Criteria, Record};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// Store de registros con id autoincremental
///
/// Cada operación trabaja contra el archivo: `append` carga la secuencia
/// actual, agrega y persiste; `read_all` deserializa el blob completo.
/// Un archivo ausente o corrupto se trata como registro vacío (la lectura
/// nunca falla hacia el caller).
pub struct RecordStore {
    /// Ruta al archivo de persistencia
    path: PathBuf,

    /// Serializa el read-modify-write de `append` para que el invariante
    /// de unicidad del id no dependa de que el servidor sea secuencial
    append_lock: Mutex<()>,
}

impl RecordStore {
    /// Crea un store sobre la ruta dada (el archivo puede no existir aún)
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            append_lock: Mutex::new(()),
        }
    }

    /// Agrega un estudiante y le asigna el siguiente id
    ///
    /// El id es `1` si el registro está vacío, o `último id + 1` en caso
    /// contrario (la secuencia se persiste en orden de inserción, así que
    /// el último id es también el máximo). La secuencia completa se escribe
    /// de forma atómica: o la escritura completa tiene éxito o el contenido
    /// anterior del archivo se conserva.
    ///
    /// # Ejemplo
    /// ```no_run
    /// use web_server::registry::RecordStore;
    ///
    /// let store = RecordStore::new("./db.json");
    /// let record = store.append("Mick", "Jagger").unwrap();
    /// assert_eq!(record.id, 1);
    /// ```
    pub fn append(&self, first: &str, last: &str) -> std::io::Result<Record> {
        // Un lock envenenado no protege ningún estado en memoria: se recupera
        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut records = self.read_all();
        let id = match records.last() {
            Some(previous) => previous.id + 1,
            None => 1,
        };

        let record = Record {
            id,
            first: first.to_string(),
            last: last.to_string(),
        };

        records.push(record.clone());
        self.save_to_file(&records)?;

        Ok(record)
    }

    /// Retorna todos los registros en orden de inserción
    ///
    /// Archivo ausente o imposible de deserializar: registro vacío.
    /// La corrupción del store no es fatal para una lectura.
    pub fn read_all(&self) -> Vec<Record> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(records) => records,
            Err(_) => Vec::new(),
        }
    }

    /// Retorna los registros que satisfacen los criterios
    ///
    /// Con criterios vacíos equivale a [`read_all`](Self::read_all).
    pub fn read_filtered(&self, criteria: &Criteria) -> Vec<Record> {
        self.read_all()
            .into_iter()
            .filter(|record| criteria.matches(record))
            .collect()
    }

    /// Obtiene el número de registros almacenados
    pub fn count(&self) -> usize {
        self.read_all().len()
    }

    /// Guarda la secuencia completa al archivo
    fn save_to_file(&self, records: &[Record]) -> std::io::Result<()> {
        // Crear archivo temporal primero (atomic write)
        let temp_path = self.path.with_extension("tmp");
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, records)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        writer.flush()?;

        // Renombrar (atómico en sistemas Unix)
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}
