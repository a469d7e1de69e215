// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use portfolio_api::Client;
use portfolio_app::{ApiError, CategoryId, Credentials, ImageFile, UserId, ValidUpload, WorkId};
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Method, Request, Response, Server};

fn mock_server() -> Result<(Server, String)> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/api", server.server_addr());
    Ok((server, addr))
}

fn json_response(status: u16, body: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body)
        .with_status_code(status)
        .with_header(
            Header::from_bytes("Content-Type", "application/json")
                .expect("valid content type header"),
        )
}

fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|header| {
            header
                .field
                .as_str()
                .as_str()
                .eq_ignore_ascii_case(name)
        })
        .map(|header| header.value.as_str().to_owned())
}

#[test]
fn unreachable_server_is_a_network_error() {
    let client = Client::new("http://127.0.0.1:1/api", Duration::from_millis(200))
        .expect("client should initialize");

    let error = client.list_works().expect_err("nothing listens on port 1");
    assert!(matches!(error, ApiError::Network(_)), "got {error:?}");
}

#[test]
fn login_posts_credentials_and_parses_grant() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        assert_eq!(*request.method(), Method::Post);
        assert_eq!(request.url(), "/api/users/login");
        let mut body = String::new();
        request
            .as_reader()
            .read_to_string(&mut body)
            .expect("readable body");
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert_eq!(parsed["email"], "sophie.bluel@test.tld");
        assert_eq!(parsed["password"], "S0phie");
        request
            .respond(json_response(200, r#"{"userId":1,"token":"abc.def"}"#))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let grant = client.login(&Credentials {
        email: "sophie.bluel@test.tld".to_owned(),
        password: "S0phie".to_owned(),
    })?;
    assert_eq!(grant.user_id, UserId::new(1));
    assert_eq!(grant.token, "abc.def");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn login_rejections_map_to_typed_errors() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        for status in [401, 404] {
            let request = server.recv().expect("request expected");
            request
                .respond(json_response(status, "{}"))
                .expect("response should succeed");
        }
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let credentials = Credentials {
        email: "a@b.c".to_owned(),
        password: "x".to_owned(),
    };
    assert_eq!(client.login(&credentials), Err(ApiError::Unauthorized));
    assert_eq!(client.login(&credentials), Err(ApiError::NotFound));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn list_works_and_categories_decode_payloads() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/api/works");
        request
            .respond(json_response(
                200,
                r#"[{"id":1,"title":"Abajour Tahina","imageUrl":"http://localhost:5678/images/abajour.png","categoryId":1,"userId":1,"category":{"id":1,"name":"Objects"}}]"#,
            ))
            .expect("response should succeed");

        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/api/categories");
        request
            .respond(json_response(
                200,
                r#"[{"id":1,"name":"Objects"},{"id":2,"name":"Flats"}]"#,
            ))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let works = client.list_works()?;
    assert_eq!(works.len(), 1);
    assert_eq!(works[0].title, "Abajour Tahina");
    assert_eq!(works[0].category.name, "Objects");

    let categories = client.list_categories()?;
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].id, CategoryId::new(2));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn non_json_body_is_a_decode_error() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(Response::from_string("<html>oops</html>").with_status_code(200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client.list_categories().expect_err("html is not json");
    assert!(matches!(error, ApiError::Decode(_)), "got {error:?}");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn delete_sends_bearer_token_and_maps_statuses() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        for status in [204, 500, 404] {
            let request = server.recv().expect("request expected");
            assert_eq!(*request.method(), Method::Delete);
            assert_eq!(request.url(), "/api/works/7");
            assert_eq!(
                header_value(&request, "Authorization").as_deref(),
                Some("Bearer secret-token")
            );
            request
                .respond(Response::empty(status))
                .expect("response should succeed");
        }
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    assert_eq!(client.delete_work("secret-token", WorkId::new(7)), Ok(()));
    assert_eq!(
        client.delete_work("secret-token", WorkId::new(7)),
        Err(ApiError::Server(500))
    );
    assert_eq!(
        client.delete_work("secret-token", WorkId::new(7)),
        Err(ApiError::NotFound)
    );

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn create_sends_multipart_fields_and_parses_record() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        assert_eq!(*request.method(), Method::Post);
        assert_eq!(request.url(), "/api/works");
        assert_eq!(
            header_value(&request, "Authorization").as_deref(),
            Some("Bearer secret-token")
        );
        let content_type = header_value(&request, "Content-Type").unwrap_or_default();
        assert!(content_type.starts_with("multipart/form-data"), "{content_type}");

        let mut body = Vec::new();
        request
            .as_reader()
            .read_to_end(&mut body)
            .expect("readable body");
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("name=\"image\"; filename=\"lamp.png\""));
        assert!(body.contains("name=\"title\""));
        assert!(body.contains("Lamp"));
        assert!(body.contains("name=\"category\""));

        request
            .respond(json_response(
                201,
                r#"{"id":12,"title":"Lamp","imageUrl":"http://localhost:5678/images/lamp.png","categoryId":1,"userId":1}"#,
            ))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let record = client.create_work(
        "secret-token",
        &ValidUpload {
            image: ImageFile::new("lamp.png", "image/png", vec![0x89, b'P', b'N', b'G']),
            title: "Lamp".to_owned(),
            category_id: CategoryId::new(1),
        },
    )?;
    assert_eq!(record.id, WorkId::new(12));
    assert!(record.category.is_none());

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn create_maps_bad_request() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        let mut sink = Vec::new();
        let _ = request.as_reader().read_to_end(&mut sink);
        request
            .respond(json_response(400, r#"{"error":"bad"}"#))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client
        .create_work(
            "secret-token",
            &ValidUpload {
                image: ImageFile::new("lamp.png", "image/png", vec![1, 2, 3]),
                title: "Lamp".to_owned(),
                category_id: CategoryId::new(1),
            },
        )
        .expect_err("server rejected the upload");
    assert_eq!(error, ApiError::BadRequest);

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn slow_server_maps_to_timeout() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        thread::sleep(Duration::from_millis(600));
        let _ = request.respond(json_response(200, "[]"));
    });

    let client = Client::new(&addr, Duration::from_millis(100))?;
    let error = client.list_works().expect_err("server is too slow");
    assert_eq!(error, ApiError::Timeout);

    handle.join().expect("server thread should join");
    Ok(())
}
