//! End-to-end: load a pattern file, bind a real port, post text over HTTP.

use std::io::Write;
use std::sync::Arc;

use extractor_core::{load_registry, Extractor};
use extractor_server::{NetworkConfig, NetworkModule};
use tokio::sync::oneshot;

const PATTERNS: &str = "\
name,[A-Z][a-z]*
email,\"[a-z0-9._%+-]+@[a-z0-9.-]+\\.[a-z]{2,}\",contact addresses
all,.*
";

async fn spawn_server() -> (u16, oneshot::Sender<()>, tokio::task::JoinHandle<anyhow::Result<()>>) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PATTERNS.as_bytes()).unwrap();
    file.flush().unwrap();
    let registry = load_registry(file.path()).unwrap();

    let config = NetworkConfig {
        host: "127.0.0.1".to_string(),
        extract_path: "/extract".to_string(),
        ..NetworkConfig::default()
    };
    let mut module = NetworkModule::new(config, Arc::new(Extractor::new(registry)));
    let port = module.start().await.unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    let server = tokio::spawn(module.serve(async move {
        let _ = rx.await;
    }));

    (port, tx, server)
}

#[tokio::test]
async fn posts_text_and_receives_labeled_matches() {
    let (port, stop, server) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://127.0.0.1:{port}/extract"))
        .body("Bill Gates bill@ms.com")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"all":["Bill Gates bill@ms.com"],"email":["bill@ms.com"],"name":["Bill","Gates"]}"#
    );

    let response = client
        .post(format!("http://127.0.0.1:{port}/extract"))
        .body("")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "{}");

    let ready = client
        .get(format!("http://127.0.0.1:{port}/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(ready.status().as_u16(), 200);

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn large_bodies_are_accepted_without_a_configured_limit() {
    let (port, stop, server) = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("http://127.0.0.1:{port}/extract"))
        .body("Ada ".repeat(786_432))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains(r#""name":["Ada","Ada""#));

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn parallel_clients_see_only_their_own_matches() {
    let (port, stop, server) = spawn_server().await;
    let client = reqwest::Client::new();

    let mut requests = Vec::new();
    for i in 0..16 {
        let client = client.clone();
        requests.push(tokio::spawn(async move {
            let body = format!("user{i}@host{i}.org");
            let text = client
                .post(format!("http://127.0.0.1:{port}/extract"))
                .body(body.clone())
                .send()
                .await
                .unwrap()
                .text()
                .await
                .unwrap();
            (body, text)
        }));
    }

    for request in requests {
        let (body, text) = request.await.unwrap();
        assert_eq!(text, format!(r#"{{"all":["{body}"],"email":["{body}"]}}"#));
    }

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}
