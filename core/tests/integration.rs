//! Upload/remove lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises the client two
//! ways: executing the built `HttpRequest` values with ureq (host does the
//! I/O), and through the async `ReqwestTransport`. Both validate that request
//! building works end-to-end with the actual server.

use attachments_core::{
    authentication_headers, ApiError, AttachmentsClient, ClientConfig, CreateParams, Credential,
    HttpBody, HttpMethod, HttpRequest, HttpResponse, MultipartForm, QueryParams, RemoveAttachment,
    ReqwestTransport, Source, TransportError,
};

const BOUNDARY: &str = "attachments-core-test-boundary";

/// Minimal form encoder for the ureq path; ureq has no multipart support.
fn encode_form(form: &MultipartForm) -> Vec<u8> {
    let mut out = Vec::new();
    for part in form.parts() {
        out.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(file_name) = &part.file_name {
            disposition.push_str(&format!("; filename=\"{file_name}\""));
        }
        out.extend_from_slice(format!("{disposition}\r\n").as_bytes());
        if let Some(content_type) = &part.content_type {
            out.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&part.data);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    out
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    assert_eq!(req.method, HttpMethod::Post, "attachments only uses POST");
    let mut builder = agent.post(&req.url);
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let mut response = match req.body {
        Some(HttpBody::Json(value)) => builder
            .content_type("application/json")
            .send(&serde_json::to_vec(&value).unwrap()[..]),
        Some(HttpBody::Multipart(form)) => builder
            .content_type(format!("multipart/form-data; boundary={BOUNDARY}"))
            .send(&encode_form(&form)[..]),
        None => builder.send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Start the mock server on a background thread and return its base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn config(base_url: &str) -> ClientConfig {
    ClientConfig::new(
        base_url,
        authentication_headers(&Credential::Jwt("test-jwt".to_string())),
        "app",
    )
    .unwrap()
}

#[test]
fn upload_and_remove_lifecycle() {
    let base_url = spawn_server();
    let client = AttachmentsClient::new(config(&base_url), ReqwestTransport::new());

    // Step 1: upload with the access shorthand.
    let source = Source::from_bytes("some source object")
        .with_file_name("note.txt")
        .with_content_type("text/plain");
    let req = client.build_create("public", source).unwrap();
    let response = execute(req);
    assert_eq!(response.status, 201, "upload failed: {}", response.body);
    let attachment = client.parse_create(&response).unwrap();
    assert!(attachment.media_url.ends_with("/note.txt"));
    assert_eq!(attachment.media_type, "text/plain");

    // Step 2: upload in object mode with every query parameter.
    let props = QueryParams::new()
        .access("public")
        .for_target("message")
        .user_id("userId")
        .app_user_id("appUserId");
    let req = client
        .build_create(CreateParams::object(props, Source::from_bytes(vec![0u8, 1, 2])), None)
        .unwrap();
    let response = execute(req);
    assert_eq!(response.status, 201);
    let second = client.parse_create(&response).unwrap();
    assert_eq!(second.media_type, "application/octet-stream");

    // Step 3: remove the first upload.
    let req = client
        .build_delete(&RemoveAttachment::new(&attachment.media_url))
        .unwrap();
    assert_eq!(execute(req).status, 200);

    // Step 4: removing it again is a 404; the client does not deduplicate.
    let req = client
        .build_delete(&RemoveAttachment::new(&attachment.media_url))
        .unwrap();
    assert_eq!(execute(req).status, 404);

    // Step 5: the second upload is still there.
    let req = client.build_delete(&RemoveAttachment::new(&second.media_url)).unwrap();
    assert_eq!(execute(req).status, 200);
}

#[test]
fn upload_without_credentials_is_rejected_by_server() {
    let base_url = spawn_server();
    let config = ClientConfig::new(&base_url, Vec::new(), "app").unwrap();
    let client = AttachmentsClient::new(config, ReqwestTransport::new());

    let req = client.build_create("public", Source::from_bytes("x")).unwrap();
    assert_eq!(execute(req).status, 401);
}

#[tokio::test]
async fn async_transport_lifecycle() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(mock_server::run(listener));

    let client = AttachmentsClient::with_reqwest(config(&base_url));

    let response = client
        .create(
            "public",
            Source::from_bytes("%PDF-1.4")
                .with_file_name("report.pdf")
                .with_content_type("application/pdf"),
        )
        .await
        .unwrap();
    assert_eq!(response.status, 201);
    let attachment = client.parse_create(&response).unwrap();
    assert!(attachment.media_url.ends_with("/report.pdf"));
    assert_eq!(attachment.media_type, "application/pdf");

    let response = client.remove(&attachment.media_url).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "{}");

    // Non-2xx responses surface as transport errors, unmodified.
    let err = client.remove(&attachment.media_url).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Transport(TransportError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn concurrent_calls_share_one_client() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(mock_server::run(listener));

    let client = std::sync::Arc::new(AttachmentsClient::with_reqwest(config(&base_url)));
    let uploads: Vec<_> = (0..4)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .create("public", Source::from_bytes(format!("file {i}")))
                    .await
            })
        })
        .collect();

    let mut urls = Vec::new();
    for handle in uploads {
        let response = handle.await.unwrap().unwrap();
        urls.push(client.parse_create(&response).unwrap().media_url);
    }
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), 4);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = AttachmentsClient::with_reqwest(config(&base_url));
    let err = client
        .delete(&RemoveAttachment::new("http://x/doc.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(TransportError::Network(_))));
}
