//! # Servidor TCP Secuencial
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP. Las conexiones se atienden de a una:
//! se acepta, se procesa el request completo (parse → ruteo → respuesta)
//! y se cierra antes del siguiente `accept`. Sin pipelining, sin
//! keep-alive, sin timeouts.

use crate::config::Config;
use crate::handlers;
use crate::http::response::{redirect_head, RESPONSE_400};
use crate::http::{read_body, Method, ParseError, Request, Response};
use crate::registry::{Criteria, RecordStore};
use crate::router::{self, RouteClass};
use std::fs;
use std::io::{BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};

/// Vista dinámica seleccionada por el router para el request actual
enum View {
    /// Tabla HTML con los registros que matchean los criterios
    List(Criteria),

    /// Arreglo JSON con los registros que matchean los criterios
    Json(Criteria),
}

/// Servidor HTTP/1.1 secuencial
pub struct Server {
    config: Config,
    store: RecordStore,
    listener: TcpListener,
}

impl Server {
    /// Hace bind en la dirección configurada (puerto 0 = efímero, para tests)
    pub fn bind(config: Config) -> std::io::Result<Self> {
        let listener = TcpListener::bind(config.address())?;
        let store = RecordStore::new(config.db_path.clone());

        Ok(Self {
            config,
            store,
            listener,
        })
    }

    /// Dirección local real del listener
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Bucle de accept: una conexión completa a la vez
    pub fn run(self) -> std::io::Result<()> {
        println!("[+] Servidor escuchando en {}", self.local_addr()?);
        println!("[*] Modo secuencial: una conexión a la vez\n");

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let peer = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    println!("[+] {} CONECTADO", peer);

                    if let Err(e) = handle_connection(stream, &self.config, &self.store) {
                        eprintln!("[!] Error en la conexión {}: {}", peer, e);
                    }

                    println!("[-] {} DESCONECTADO\n", peer);
                }
                Err(e) => {
                    eprintln!("[!] Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }
}

/// Procesa una conexión completa: parse, ruteo, respuesta, cierre
///
/// El stream se cierra al salir (drop). Un peer que cierra sin enviar
/// nada no produce respuesta ni error.
fn handle_connection(
    mut stream: TcpStream,
    config: &Config,
    store: &RecordStore,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let request = match Request::read_from(&mut reader) {
        Ok(request) => request,
        Err(ParseError::EmptyRequest) => return Ok(()),
        Err(e) => return bad_request(&mut stream, &e.to_string()),
    };

    println!(
        "   {} {} {}",
        request.method().as_str(),
        request.target(),
        request.version()
    );

    process_request(&mut reader, &mut stream, &request, config, store)
}

/// Pipeline de ruteo y respuesta sobre un request ya parseado
fn process_request(
    reader: &mut BufReader<TcpStream>,
    stream: &mut TcpStream,
    request: &Request,
    config: &Config,
    store: &RecordStore,
) -> std::io::Result<()> {
    let (path, query) = router::split_target(request.target());
    let mut target = path.to_string();
    let mut view: Option<View> = None;

    // 1. Rutas dinámicas
    match router::classify(path) {
        RouteClass::ListView | RouteClass::JsonView => {
            if request.method() != &Method::GET {
                return method_not_allowed(stream);
            }

            let pairs = match query {
                Some(query) => match router::parse_query_pairs(query) {
                    Ok(pairs) => pairs,
                    Err(e) => return bad_request(stream, &e.to_string()),
                },
                None => Vec::new(),
            };

            let criteria = match Criteria::from_pairs(&pairs) {
                Ok(criteria) => criteria,
                Err(e) => return bad_request(stream, &e.to_string()),
            };

            view = Some(match router::classify(path) {
                RouteClass::JsonView => View::Json(criteria),
                _ => View::List(criteria),
            });

            // Ambas vistas comparten la página de lista
            target = router::LIST_PAGE.to_string();
        }
        RouteClass::AddView => {
            if request.method() != &Method::POST {
                return method_not_allowed(stream);
            }

            let length = match request
                .header("Content-Length")
                .and_then(|value| value.parse::<usize>().ok())
            {
                Some(length) => length,
                None => return bad_request(stream, "missing or invalid Content-Length"),
            };

            let body = read_body(reader, length)?;

            // Un body inválido NUNCA debe llegar al store
            let (first, last) = match handlers::parse_form_body(&body) {
                Ok(fields) => fields,
                Err(e) => return bad_request(stream, &e.to_string()),
            };

            let record = store.append(&first, &last)?;
            println!(
                "   [+] Registro #{} agregado: {} {}",
                record.id, record.first, record.last
            );

            // El alta es un sink con efecto: 200 sin body
            return write_response(stream, &Response::ok("text/html", Vec::new()));
        }
        RouteClass::StaticFile => {}
    }

    // 2. Validaciones comunes antes de servir archivos
    if !target.starts_with('/')
        || request.version() != "HTTP/1.1"
        || request.header("Host").is_none()
    {
        return bad_request(stream, "invalid target, version or missing Host");
    }

    // 3. Solo GET y POST llegan al servicio de archivos
    if !matches!(request.method(), Method::GET | Method::POST) {
        return method_not_allowed(stream);
    }

    // 4. Normalizar al directorio de assets
    target = router::normalize_target(&target);
    let mut fs_path = router::resolve_path(&config.www_root, &target);

    // 5. Acceso a un directorio: 301 hacia su index.html. El ciclo de
    //    respuesta continúa y el body del index se escribe sobre la misma
    //    conexión, a continuación de la cabecera de redirección.
    if fs_path.is_dir() && target.ends_with('/') {
        target.push_str("index.html");
        fs_path = router::resolve_path(&config.www_root, &target);

        let public = target.strip_prefix(router::WWW_PREFIX).unwrap_or(&target);
        let location = format!("http://{}:{}{}", config.host, config.port, public);

        println!("   301 -> {}", location);
        stream.write_all(redirect_head(&location).as_bytes())?;
    }

    // 6. MIME por extensión; la vista JSON lo fuerza
    let content_type = match &view {
        Some(View::Json(_)) => "application/json",
        _ => router::mime_type(&target),
    };

    // 7. Leer el archivo. Las vistas también pasan por acá: la página de
    //    lista tiene que existir en el directorio de assets.
    let file_bytes = match fs::read(&fs_path) {
        Ok(bytes) => bytes,
        Err(_) => {
            println!("   ERROR 404 ({})", fs_path.display());
            return write_response(stream, &Response::not_found());
        }
    };

    // 8. Body final: archivo, tabla renderizada o JSON. Con el registro
    //    totalmente vacío las vistas responden sin body (ni tabla ni `[]`).
    let body = match view {
        Some(View::List(criteria)) => {
            if store.count() == 0 {
                Vec::new()
            } else {
                let template = String::from_utf8_lossy(&file_bytes);
                handlers::render_table(&template, &store.read_filtered(&criteria)).into_bytes()
            }
        }
        Some(View::Json(criteria)) => {
            if store.count() == 0 {
                Vec::new()
            } else {
                handlers::render_json(&store.read_filtered(&criteria)).into_bytes()
            }
        }
        None => file_bytes,
    };

    write_response(stream, &Response::ok(content_type, body))
}

/// Escribe la 400 fija (solo status line) y termina la conexión
fn bad_request(stream: &mut TcpStream, reason: &str) -> std::io::Result<()> {
    println!("   ERROR 400 ({})", reason);
    stream.write_all(RESPONSE_400.as_bytes())?;
    stream.flush()
}

/// Escribe la 405 fija y termina la conexión
fn method_not_allowed(stream: &mut TcpStream) -> std::io::Result<()> {
    write_response(stream, &Response::method_not_allowed())
}

/// Escribe una respuesta completa y hace flush
fn write_response(stream: &mut TcpStream, response: &Response) -> std::io::Result<()> {
    println!("   {}", response.status());
    stream.write_all(&response.to_bytes())?;
    stream.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::Shutdown;
    use std::thread;
    use tempfile::TempDir;

    /// Arma un directorio de assets mínimo y la config apuntando a él
    fn test_config(dir: &TempDir) -> Config {
        let www = dir.path().join("www-data");
        fs::create_dir_all(&www).unwrap();
        fs::write(www.join("index.html"), "<h1>Bienvenido</h1>").unwrap();
        fs::write(
            www.join("app_list.html"),
            "<html><table>{{students}}</table></html>",
        )
        .unwrap();

        let mut config = Config::default();
        config.www_root = www.to_str().unwrap().to_string();
        config.db_path = dir.path().join("db.json").to_str().unwrap().to_string();
        config
    }

    /// Atiende UNA conexión en un thread y retorna la respuesta cruda
    /// que recibe el cliente al enviar `raw`
    fn roundtrip(config: &Config, raw: &[u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn({
            let config = config.clone();
            let store = RecordStore::new(config.db_path.clone());
            move || {
                let (stream, _) = listener.accept().unwrap();
                handle_connection(stream, &config, &store).unwrap();
            }
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(raw).unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        t.join().unwrap();

        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_serves_static_file() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let response = roundtrip(
            &config,
            b"GET /index.html HTTP/1.1\r\nHost: localhost\r\n\r\n",
        );

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("content-type: text/html"));
        assert!(response.contains("connection: close"));
        assert!(response.contains("<h1>Bienvenido</h1>"));
    }

    #[test]
    fn test_missing_file_is_404() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let response = roundtrip(
            &config,
            b"GET /no-such-file.html HTTP/1.1\r\nHost: localhost\r\n\r\n",
        );

        assert!(response.contains("404 Not Found"));
        assert!(response.contains("404 Page not found"));
    }

    #[test]
    fn test_garbage_request_is_400() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let response = roundtrip(&config, b"\x00\x01\x02garbage");

        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    }

    #[test]
    fn test_missing_host_header_is_400() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let response = roundtrip(&config, b"GET /index.html HTTP/1.1\r\n\r\n");

        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    }

    #[test]
    fn test_wrong_version_is_400() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let response = roundtrip(
            &config,
            b"GET /index.html HTTP/1.0\r\nHost: localhost\r\n\r\n",
        );

        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    }

    #[test]
    fn test_get_on_add_route_is_405() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let store = RecordStore::new(config.db_path.clone());

        let response = roundtrip(
            &config,
            b"GET /app-add HTTP/1.1\r\nHost: localhost\r\n\r\n",
        );

        assert!(response.contains("405 Method Not Allowed"));
        // Y nada se agregó al registro
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_unknown_method_on_static_is_405() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let response = roundtrip(
            &config,
            b"DELETE /index.html HTTP/1.1\r\nHost: localhost\r\n\r\n",
        );

        assert!(response.contains("405 Method Not Allowed"));
    }

    #[test]
    fn test_post_without_content_length_is_400() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let store = RecordStore::new(config.db_path.clone());

        let response = roundtrip(
            &config,
            b"POST /app-add HTTP/1.1\r\nHost: localhost\r\n\r\n",
        );

        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_directory_redirect_then_body_on_same_connection() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let response = roundtrip(
            &config,
            b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n",
        );

        // Cabecera 301 seguida del 200 con el index, en la misma conexión
        assert!(response.starts_with("HTTP/1.1 301 Moved Permanently\r\n"));
        assert!(response.contains("location: http://127.0.0.1:8080/index.html\r\n"));
        assert!(response.contains("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("<h1>Bienvenido</h1>"));
    }
}
