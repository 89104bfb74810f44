//! 3D map of Chungju shops: GPS <-> scene mapping, OSM building ingestion,
//! the shop REST client, and scene composition for the renderer.

pub mod config;
pub mod error;
pub mod geo;
pub mod loader;
pub mod location;
pub mod mapper;
pub mod osm;
pub mod player;
pub mod scene;
pub mod shops;
pub mod vertex;

pub use error::{Error, Result};
pub use geo::{GeoPoint, LocalPoint};
pub use mapper::MapContext;

pub(crate) fn http_client() -> reqwest::blocking::Client {
    let builder = reqwest::blocking::Client::builder();
    // Tests talk to loopback servers directly.
    #[cfg(test)]
    let builder = builder.no_proxy();
    builder.build().unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    // Nothing listens on the discard port.
    pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

    /// Answers a single HTTP request with `status` and `body`, returns the base url.
    pub fn serve_once(status: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else { return };
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            // Drain headers and body before answering.
            loop {
                let n = match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => n,
                };
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            let (k, v) = l.split_once(':')?;
                            k.eq_ignore_ascii_case("content-length").then(|| v.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        });

        format!("http://{addr}")
    }
}
