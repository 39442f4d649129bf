//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor web con soporte
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./web_server --port 8080 \
//!   --www-root ./www-data \
//!   --db-path ./db.json
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 ./web_server
//! ```

use clap::Parser;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "web_server")]
#[command(about = "Servidor web HTTP/1.1 con registro de estudiantes")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz de los archivos estáticos (debe contener app_list.html)
    #[arg(long = "www-root", default_value = "./www-data", env = "WWW_ROOT")]
    pub www_root: String,

    /// Ruta del archivo de persistencia del registro de estudiantes
    #[arg(long = "db-path", default_value = "./db.json", env = "DB_PATH")]
    pub db_path: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use web_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.www_root.trim().is_empty() {
            return Err("WWW root must not be empty".to_string());
        }
        if self.db_path.trim().is_empty() {
            return Err("DB path must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("═══════════════════════════════════════");
        println!("  Web Server HTTP/1.1 Configuration");
        println!("═══════════════════════════════════════");
        println!("   Address:   {}", self.address());
        println!("   WWW root:  {}", self.www_root);
        println!("   Database:  {}", self.db_path);
        println!("═══════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto (espejo de los defaults del CLI)
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            www_root: "./www-data".to_string(),
            db_path: "./db.json".to_string(),
        }
    }
}
