//! A tiny HTTP/1.1 server standing in for the lookup services.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use tutor::lookup::Endpoints;

/// Answer `status` with `body` to any request whose request line contains `matches`.
#[derive(Clone, Copy)]
pub struct Route {
    pub matches: &'static str,
    pub status: u16,
    pub body: &'static str,
}

pub const WIKIPEDIA_HITS: &str = r#"{"batchcomplete":"","query":{"searchinfo":{"totalhits":2},"search":[
    {"ns":0,"title":"Сложение","snippet":"<span class=\"searchmatch\">Сложение</span> — арифметическая операция"},
    {"ns":0,"title":"Натуральное число","snippet":"числа, возникающие при счёте"}
]}}"#;

/// Wikipedia finds two articles, Wolfram has no short answer, and of the
/// two math domains only mathprofi.ru answers the site search.
pub fn math_routes() -> Vec<Route> {
    vec![
        route("mathprofi.ru", 200, "<html></html>"),
        route("khanacademy.org", 503, ""),
        route("/w/api.php", 200, WIKIPEDIA_HITS),
        route("/v1/result", 501, "No short answer available"),
    ]
}

pub fn route(matches: &'static str, status: u16, body: &'static str) -> Route {
    Route {
        matches,
        status,
        body,
    }
}

pub struct StubServer {
    base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Bind an ephemeral port and serve `routes` until the test ends.
    /// Unmatched requests get a 404.
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = routes.clone();
                let seen = seen.clone();
                tokio::spawn(async move { serve(stream, &routes, &seen).await });
            }
        });

        Self { base, requests }
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            wikipedia: format!("{}/w/api.php", self.base),
            wolfram: format!("{}/v1/result", self.base),
            web_search: format!("{}/html/", self.base),
        }
    }

    /// Request heads received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve(mut stream: TcpStream, routes: &[Route], seen: &Mutex<Vec<String>>) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    let head = String::from_utf8_lossy(&head).into_owned();
    let request_line = head.lines().next().unwrap_or_default().to_string();
    seen.lock().unwrap().push(head);

    let (status, body) = routes
        .iter()
        .find(|r| request_line.contains(r.matches))
        .map(|r| (r.status, r.body))
        .unwrap_or((404, ""));

    let response = format!(
        "HTTP/1.1 {status} Stub\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
