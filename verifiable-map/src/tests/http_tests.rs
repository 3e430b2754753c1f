use std::{
    io::{BufRead, BufReader, Read, Write},
    net::{SocketAddr, TcpListener},
    thread::{self, JoinHandle},
};

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

use crate::{
    http::status_error, ClientConfig, Error, HttpClient, RawDataEntry, RawDataEntryFactory,
    TreeSize,
};

#[test]
fn status_error_maps_known_statuses() {
    assert_matches!(status_error(StatusCode::BAD_REQUEST, b""), Error::InvalidRange);
    assert_matches!(status_error(StatusCode::FORBIDDEN, b""), Error::NotAuthorized);
    assert_matches!(status_error(StatusCode::NOT_FOUND, b""), Error::NotFound);
    assert_matches!(status_error(StatusCode::CONFLICT, b""), Error::ObjectConflict);
}

#[test]
fn status_error_keeps_body_of_other_statuses() {
    assert_matches!(
        status_error(StatusCode::INTERNAL_SERVER_ERROR, b"disk full"),
        Error::UnexpectedStatus { status: 500, message } if message == "disk full"
    );
    assert_matches!(
        status_error(StatusCode::UNAUTHORIZED, b"\xffno"),
        Error::UnexpectedStatus { status: 401, message } if message == "\u{fffd}no"
    );
}

/// What the loopback server saw of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Exchange {
    request_line: String,
    authorization: Option<String>,
    body: Vec<u8>,
}

/// Raw HTTP/1.1 response closing the connection after `body`.
fn raw_response(status: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut response = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n",
        body.len()
    );
    for (name, value) in headers {
        response.push_str(&format!("{name}: {value}\r\n"));
    }
    response.push_str("\r\n");
    response.push_str(body);
    response
}

/// Serve `responses` on a loopback port, one connection each, and hand back
/// what was received once all have been answered.
fn serve(responses: Vec<String>) -> (SocketAddr, JoinHandle<Vec<Exchange>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = thread::spawn(move || {
        let mut exchanges = Vec::new();
        for response in responses {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");
            let mut authorization = None;
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("header line");
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                let (name, value) = line.split_once(':').expect("header");
                let value = value.trim();
                if name.eq_ignore_ascii_case("authorization") {
                    authorization = Some(value.to_string());
                } else if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.parse().expect("content length");
                }
            }
            let mut body = vec![0; content_length];
            reader.read_exact(&mut body).expect("body");

            stream.write_all(response.as_bytes()).expect("write");
            stream.flush().expect("flush");
            exchanges.push(Exchange {
                request_line: request_line.trim_end().to_string(),
                authorization,
                body,
            });
        }
        exchanges
    });
    (addr, handle)
}

fn client(addr: SocketAddr) -> HttpClient {
    HttpClient::new(
        ClientConfig::new("acct")
            .with_api_key("k")
            .with_base_url(format!("http://{addr}")),
    )
    .expect("client")
}

#[test]
fn rejected_create_reports_conflict() {
    let (addr, server) = serve(vec![raw_response("409 Conflict", &[], "exists")]);

    let result = client(addr).verifiable_map("m").create();

    assert_matches!(result, Err(Error::ObjectConflict));
    assert_eq!(
        server.join().expect("server"),
        vec![Exchange {
            request_line: "PUT /v1/account/acct/map/m HTTP/1.1".to_string(),
            authorization: Some("Key k".to_string()),
            body: Vec::new(),
        }]
    );
}

#[test]
fn get_reads_proof_from_response_headers() {
    let (addr, server) = serve(vec![raw_response(
        "200 OK",
        &[
            ("X-Verified-Proof", "3/ab12"),
            ("X-Verified-Proof", "10/00, 255/ff"),
            ("X-Verified-TreeSize", "3"),
        ],
        "red",
    )]);

    let proof = client(addr)
        .verifiable_map("m")
        .get(b"k", TreeSize::Head, &RawDataEntryFactory)
        .expect("get");

    assert_eq!(proof.value, RawDataEntry::new("red"));
    assert_eq!(proof.tree_size, 3);
    assert_eq!(proof.audit_path.get(3), Some(&[0xab, 0x12][..]));
    assert_eq!(proof.audit_path.get(10), Some(&[0x00][..]));
    assert_eq!(proof.audit_path.get(255), Some(&[0xff][..]));
    assert_eq!(proof.audit_path.present().count(), 3);
    assert_eq!(
        server.join().expect("server")[0].request_line,
        "GET /v1/account/acct/map/m/tree/0/key/h/6b HTTP/1.1"
    );
}

#[test]
fn set_sends_body_and_surfaces_server_errors() {
    let (addr, server) = serve(vec![raw_response(
        "503 Service Unavailable",
        &[],
        "try later",
    )]);

    let result = client(addr)
        .verifiable_map("m")
        .set(b"k", &RawDataEntry::new("red"));

    assert_matches!(
        result,
        Err(Error::UnexpectedStatus { status: 503, message }) if message == "try later"
    );
    let exchanges = server.join().expect("server");
    assert_eq!(exchanges[0].request_line, "PUT /v1/account/acct/map/m/key/h/6b HTTP/1.1");
    assert_eq!(exchanges[0].body, b"red".to_vec());
}

#[test]
fn requests_without_api_key_are_unauthenticated() {
    let (addr, server) = serve(vec![raw_response("200 OK", &[], "")]);

    let client =
        HttpClient::new(ClientConfig::new("acct").with_base_url(format!("http://{addr}/")))
            .expect("client");
    client.verifiable_map("m").delete(b"k").expect("delete");

    let exchanges = server.join().expect("server");
    assert_eq!(exchanges[0].request_line, "DELETE /v1/account/acct/map/m/key/h/6b HTTP/1.1");
    assert_eq!(exchanges[0].authorization, None);
}
