//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::HashMap;

use lopdf::{dictionary, Document, Object};
use tiny_http::{Response, Server};

/// Build a minimal PDF with `pages` blank pages.
pub fn sample_pdf(pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..pages)
        .map(|_| doc.add_object(dictionary! { "Type" => "Page", "Parent" => pages_id }).into())
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("serialize sample pdf");
    out
}

/// Start a tiny_http server on an ephemeral port serving `routes` (path -> body).
/// Unknown paths answer 404. Returns the base URL.
pub fn serve_documents(routes: HashMap<&'static str, Vec<u8>>) -> String {
    let server = Server::http("127.0.0.1:0").expect("bind test server");
    let base = format!("http://{}", server.server_addr());
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = match routes.get(request.url()) {
                Some(body) => Response::from_data(body.clone()).with_header(
                    "Content-Type: application/pdf"
                        .parse::<tiny_http::Header>()
                        .unwrap(),
                ),
                None => Response::from_data(b"Not Found".to_vec()).with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });
    base
}

/// Base URL of a port nothing listens on.
pub fn unreachable_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
