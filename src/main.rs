//! # Web Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor web HTTP/1.1.

use web_server::config::Config;
use web_server::server::Server;

fn main() {
    println!("=================================");
    println!("  Web Server HTTP/1.1");
    println!("  Redes de Computadores");
    println!("=================================\n");

    // Configuración desde CLI / variables de entorno
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("[!] Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // Bind + bucle de accept (bloquea el thread principal)
    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("[!] Error al hacer bind: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        eprintln!("[!] Error fatal: {}", e);
        std::process::exit(1);
    }
}
