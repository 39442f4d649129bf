//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero con un
//! directorio de assets y un archivo de registro temporales, y habla
//! HTTP crudo por el socket.

use std::fs;
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;
use web_server::config::Config;
use web_server::server::Server;

/// Helper: levanta un servidor sobre un directorio temporal y retorna
/// la dirección real del listener. El TempDir debe vivir mientras
/// duren los requests.
fn start_server() -> (SocketAddr, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let www = dir.path().join("www-data");
    fs::create_dir_all(&www).expect("Failed to create www-data");
    fs::write(www.join("index.html"), "<h1>Bienvenido</h1>").expect("Failed to write index");
    fs::write(
        www.join("app_list.html"),
        "<html><table>{{students}}</table></html>",
    )
    .expect("Failed to write list page");

    let mut config = Config::default();
    config.port = 0;
    config.www_root = www.to_str().expect("utf8 path").to_string();
    config.db_path = dir
        .path()
        .join("db.json")
        .to_str()
        .expect("utf8 path")
        .to_string();

    let server = Server::bind(config).expect("Failed to bind server");
    let addr = server.local_addr().expect("Failed to get local addr");

    // El bucle de accept corre hasta que termine el proceso de test
    thread::spawn(move || {
        let _ = server.run();
    });

    (addr, dir)
}

/// Helper: envía un request HTTP crudo y retorna la response completa
fn send_request(addr: SocketAddr, raw: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut stream = TcpStream::connect(addr)?;

    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    stream.set_write_timeout(Some(Duration::from_secs(5)))?;

    stream.write_all(raw.as_bytes())?;
    stream.flush()?;
    stream.shutdown(Shutdown::Write)?;

    let mut response = String::new();
    stream.read_to_string(&mut response)?;

    Ok(response)
}

/// Helper: GET simple con Host
fn get(addr: SocketAddr, target: &str) -> String {
    let raw = format!("GET {} HTTP/1.1\r\nHost: localhost\r\n\r\n", target);
    send_request(addr, &raw).expect("Failed to send request")
}

/// Helper: POST de alta con body form-urlencoded y Content-Length
fn post_add(addr: SocketAddr, body: &str) -> String {
    let raw = format!(
        "POST /app-add HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );
    send_request(addr, &raw).expect("Failed to send request")
}

/// Helper: extrae el body de una response HTTP
fn extract_body(response: &str) -> &str {
    // Buscar la línea vacía que separa headers del body
    if let Some(pos) = response.find("\r\n\r\n") {
        &response[pos + 4..]
    } else {
        ""
    }
}

#[test]
fn test_add_then_list() {
    let (addr, _dir) = start_server();

    let response = post_add(addr, "first=Mick&last=Jagger");
    assert!(response.contains("200 OK"), "Expected 200 OK, got: {}", response);
    assert_eq!(extract_body(&response), "", "Add should respond without body");

    let response = get(addr, "/app-index");
    assert!(response.contains("200 OK"));
    let body = extract_body(&response);
    assert!(body.contains("<td>1</td>"));
    assert!(body.contains("<td>Mick</td>"));
    assert!(body.contains("<td>Jagger</td>"));
    assert!(!body.contains("{{students}}"), "Placeholder should be substituted");
}

#[test]
fn test_ids_increment_from_one() {
    let (addr, _dir) = start_server();

    post_add(addr, "first=Mick&last=Jagger");
    post_add(addr, "first=Keith&last=Richards");

    let response = get(addr, "/app-json");
    assert!(response.contains("200 OK"));
    assert!(response.contains("content-type: application/json"));

    let body = extract_body(&response);
    assert!(body.contains(r#""id":1"#), "First record should get id 1: {}", body);
    assert!(body.contains(r#""id":2"#), "Second record should get id 2: {}", body);
    assert!(body.contains(r#""first":"Keith""#));
}

#[test]
fn test_list_filters_by_exact_match() {
    let (addr, _dir) = start_server();

    post_add(addr, "first=Mick&last=Jagger");
    post_add(addr, "first=Keith&last=Richards");

    let response = get(addr, "/app-index?first=Mick");
    assert!(response.contains("200 OK"));

    let body = extract_body(&response);
    assert!(body.contains("<td>Jagger</td>"));
    assert!(!body.contains("Richards"), "Filter should exclude Keith: {}", body);
}

#[test]
fn test_json_filter_without_matches_is_empty_array() {
    let (addr, _dir) = start_server();

    post_add(addr, "first=Mick&last=Jagger");

    let response = get(addr, "/app-json?last=Nobody");
    assert!(response.contains("200 OK"));
    assert_eq!(extract_body(&response), "[]");
}

#[test]
fn test_empty_registry_views_have_empty_body() {
    let (addr, _dir) = start_server();

    // Sin registros: 200 con body vacío, ni tabla ni `[]`
    let response = get(addr, "/app-index");
    assert!(response.contains("200 OK"));
    assert_eq!(extract_body(&response), "");

    let response = get(addr, "/app-json");
    assert!(response.contains("200 OK"));
    assert_eq!(extract_body(&response), "");
}

#[test]
fn test_unknown_criteria_field_is_400() {
    let (addr, _dir) = start_server();

    let response = get(addr, "/app-index?middle=X");
    assert!(response.contains("400"), "Expected 400 for unknown field");
}

#[test]
fn test_malformed_query_pair_is_400() {
    let (addr, _dir) = start_server();

    let response = get(addr, "/app-json?first");
    assert!(response.contains("400"), "Expected 400 for pair without '='");

    let response = get(addr, "/app-json?first=a=b");
    assert!(response.contains("400"), "Expected 400 for pair with two '='");
}

#[test]
fn test_invalid_form_never_reaches_registry() {
    let (addr, _dir) = start_server();

    let response = post_add(addr, "first=Ann");
    assert!(response.contains("400"), "Expected 400 for missing 'last'");

    let response = post_add(addr, "first=Ann&last=Lee&middle=X");
    assert!(response.contains("400"), "Expected 400 for extra key");

    // El registro sigue vacío
    let response = get(addr, "/app-json");
    assert!(response.contains("200 OK"));
    assert_eq!(extract_body(&response), "");
}

#[test]
fn test_form_values_are_url_decoded() {
    let (addr, _dir) = start_server();

    post_add(addr, "first=Mary+Jane&last=O%27Brien");

    let response = get(addr, "/app-json");
    let body = extract_body(&response);
    assert!(body.contains(r#""first":"Mary Jane""#), "got: {}", body);
    assert!(body.contains(r#""last":"O'Brien""#));
}

#[test]
fn test_static_file_served_with_mime() {
    let (addr, _dir) = start_server();

    let response = get(addr, "/index.html");
    assert!(response.contains("200 OK"));
    assert!(response.contains("content-type: text/html"));
    assert!(extract_body(&response).contains("<h1>Bienvenido</h1>"));
}

#[test]
fn test_not_found() {
    let (addr, _dir) = start_server();

    let response = get(addr, "/nonexistent.html");
    assert!(response.contains("404"), "Expected 404 for missing file");
}

#[test]
fn test_registry_persists_across_connections() {
    let (addr, _dir) = start_server();

    post_add(addr, "first=Mick&last=Jagger");

    // Varias conexiones nuevas ven el mismo registro
    for _ in 0..3 {
        let response = get(addr, "/app-json?id=1");
        let body = extract_body(&response);
        assert!(body.contains(r#""first":"Mick""#), "got: {}", body);
    }
}

#[test]
fn test_multiple_requests_sequentially() {
    let (addr, _dir) = start_server();

    for i in 0..5 {
        let response = get(addr, "/index.html");
        assert!(response.contains("200 OK"), "Request {} failed", i);
    }
}
