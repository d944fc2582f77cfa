#![allow(dead_code)]

use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use rocket::http::{ContentType, Method, Status};
use rocket::http::CookieJar;
use rocket::config::TlsConfig;
use rocket::response::Redirect;
use rocket::{get, post, put, delete, routes, uri};

pub mod request_headers;
pub mod compression;

use request_headers::headers;
use compression::compression_route;

/// Number of requests that reached `/counted`.
pub static COUNTED_HITS: AtomicUsize = AtomicUsize::new(0);
/// Number of requests that reached `/slow`.
pub static SLOW_HITS: AtomicUsize = AtomicUsize::new(0);

/// `žluťoučký` in ISO-8859-2.
pub static LATIN2_BODY: &[u8] = &[0xBE, 0x6C, 0x75, 0xBB, 0x6F, 0x75, 0xE8, 0x6B, 0xFD];

static BASE_URL: OnceLock<String> = OnceLock::new();
static TLS_BASE_URL: OnceLock<String> = OnceLock::new();

#[get("/")]
fn hello() -> &'static str {
    "Hello, world!"
}

#[get("/redirect/<n>")]
fn redirect(n: usize) -> Result<&'static str, Redirect> {
    match n {
        0 => Ok("OK"),
        _ => Err(Redirect::to(uri!(redirect(n - 1)))),
    }
}

#[get("/status/<code>")]
fn status(code: u16) -> (Status, &'static str) {
    (Status::new(code), "status body")
}

#[get("/counted")]
fn counted() -> String {
    let hits = COUNTED_HITS.fetch_add(1, Ordering::SeqCst) + 1;
    hits.to_string()
}

#[get("/slow")]
async fn slow() -> &'static str {
    SLOW_HITS.fetch_add(1, Ordering::SeqCst);
    rocket::tokio::time::sleep(Duration::from_secs(2)).await;
    "finally"
}

#[get("/charset")]
fn charset() -> (ContentType, &'static [u8]) {
    (
        ContentType::new("text", "plain").with_params(("charset", "iso-8859-2")),
        LATIN2_BODY,
    )
}

#[get("/set-cookie")]
fn set_cookie(jar: &CookieJar<'_>) -> &'static str {
    jar.add(("session", "1"));
    "cookie set"
}

#[post("/echo", data = "<body>")]
fn echo(body: Vec<u8>) -> Vec<u8> {
    body
}

#[put("/method")]
fn put_method(method: Method) -> String {
    method.to_string()
}

#[delete("/method")]
fn delete_method(method: Method) -> String {
    method.to_string()
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .expect("a free local port")
}

fn wait_for(port: u16) {
    let started = Instant::now();

    while TcpStream::connect(("127.0.0.1", port)).is_err() {
        if started.elapsed() > Duration::from_secs(10) {
            panic!("test server didn't start on port {}", port);
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

fn launch(tls: Option<TlsConfig>) -> u16 {
    let port = free_port();

    std::thread::spawn(move || {
        let mut figment = rocket::Config::figment()
            .merge(("address", "127.0.0.1"))
            .merge(("port", port))
            .merge(("log_level", "off"));

        if let Some(tls) = tls {
            figment = figment.merge(("tls", tls));
        }

        let server = rocket::custom(figment)
            .mount("/", routes![
                hello,
                headers,
                compression_route,
                redirect,
                status,
                counted,
                slow,
                charset,
                set_cookie,
                echo,
                put_method,
                delete_method,
            ]);

        let _ = rocket::execute(server.launch());
    });

    wait_for(port);
    port
}

/// Starts the test server (once per test binary) and returns its base URL, without a trailing slash.
///
/// The server runs on its own thread and runtime, so it outlives the runtimes of individual `#[tokio::test]`s.
pub fn get_server() -> &'static str {
    BASE_URL.get_or_init(|| format!("http://127.0.0.1:{}", launch(None)))
}

/// Same as [`get_server`], but served over TLS with a freshly generated self-signed certificate.
pub fn get_tls_server() -> &'static str {
    TLS_BASE_URL.get_or_init(|| {
        let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string(), "127.0.0.1".to_string()])
            .expect("a self-signed certificate");

        let tls = TlsConfig::from_bytes(
            certified.cert.pem().as_bytes(),
            certified.key_pair.serialize_pem().as_bytes(),
        );

        format!("https://127.0.0.1:{}", launch(Some(tls)))
    })
}

/// A local URL nothing listens on.
pub fn refused_url() -> String {
    format!("http://127.0.0.1:{}/", free_port())
}
