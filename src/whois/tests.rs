use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use super::{WhoisClient, WhoisError, WhoisLookup, WhoisOptions, WhoisResponse, domain_age_years};

/// Serves one canned answer per incoming connection, in order, and records
/// the queries received.
async fn spawn_server(
    answers: Vec<&'static str>,
) -> (u16, tokio::task::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("addr").port();
    let handle = tokio::spawn(async move {
        let mut queries = Vec::new();
        for answer in answers {
            let (stream, _) = listener.accept().await.expect("accept");
            let (read_half, mut write_half) = stream.into_split();
            let mut line = String::new();
            BufReader::new(read_half)
                .read_line(&mut line)
                .await
                .expect("query");
            queries.push(line.trim_end().to_string());
            write_half.write_all(answer.as_bytes()).await.expect("answer");
            write_half.shutdown().await.ok();
        }
        queries
    });
    (port, handle)
}

fn options(root: &str, port: u16) -> WhoisOptions {
    WhoisOptions {
        root_server: root.to_string(),
        port,
        timeout: Duration::from_millis(500),
        ..WhoisOptions::default()
    }
}

#[tokio::test]
async fn single_server_answer() {
    let (port, server) = spawn_server(vec![
        "% comment\r\ndomain: example.test\r\ncreated: 2001-02-03\r\n",
    ])
    .await;
    let client = WhoisClient::new(options("127.0.0.1", port));

    let response = client.lookup("Example.TEST.").await.expect("lookup");
    match &response {
        WhoisResponse::Single(record) => {
            assert_eq!(record.server, "127.0.0.1");
            assert_eq!(record.get("created"), Some("2001-02-03"));
        }
        other => panic!("expected a single record, got {other:?}"),
    }
    assert_eq!(server.await.expect("server"), vec!["example.test".to_string()]);
}

#[tokio::test]
async fn follows_refer_to_the_registry() {
    let (port, server) = spawn_server(vec![
        "refer: localhost\r\n",
        "Domain Name: EXAMPLE.TEST\r\nCreation Date: 1999-05-01T00:00:00Z\r\n",
    ])
    .await;
    let client = WhoisClient::new(options("127.0.0.1", port));

    let response = client.lookup("example.test").await.expect("lookup");
    let records = response.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].server, "127.0.0.1");
    assert_eq!(records[1].server, "localhost");
    assert_eq!(records[1].get("creation date"), Some("1999-05-01T00:00:00Z"));
    assert_eq!(server.await.expect("server").len(), 2);
}

#[tokio::test]
async fn referrals_can_be_disabled() {
    let (port, server) = spawn_server(vec!["refer: localhost\r\n"]).await;
    let client = WhoisClient::new(WhoisOptions {
        follow_referrals: false,
        ..options("127.0.0.1", port)
    });

    let response = client.lookup("example.test").await.expect("lookup");
    assert!(matches!(response, WhoisResponse::Single(_)));
    server.await.expect("server");
}

#[tokio::test]
async fn silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("addr").port();
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        tokio::time::sleep(Duration::from_secs(2)).await;
        drop(stream);
    });

    let client = WhoisClient::new(options("127.0.0.1", port));
    let err = client.lookup("example.test").await.expect_err("timeout");
    assert!(matches!(err, WhoisError::Timeout { .. }), "{err}");
    server.abort();
}

#[tokio::test]
async fn empty_domain_is_rejected() {
    let client = WhoisClient::new(options("127.0.0.1", 43));
    let err = client.lookup("  ").await.expect_err("empty");
    assert!(matches!(err, WhoisError::EmptyDomain));
}

#[tokio::test]
async fn age_from_live_exchange() {
    let (port, _server) = spawn_server(vec!["Creation Date: 2016-03-01T00:00:00Z\r\n"]).await;
    let client: Arc<dyn WhoisLookup> = Arc::new(WhoisClient::new(options("127.0.0.1", port)));
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).single().expect("date");

    assert_eq!(domain_age_years(client.as_ref(), "example.test", now).await, 10);
}

#[tokio::test]
async fn age_is_zero_when_lookup_fails() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);

    let client = WhoisClient::new(options("127.0.0.1", port));
    let now = Utc::now();
    assert_eq!(domain_age_years(&client, "example.test", now).await, 0);
}

#[tokio::test]
async fn age_ignores_the_tld_record_from_the_root() {
    let (port, server) = spawn_server(vec![
        "% IANA WHOIS server\r\ndomain: TEST\r\nrefer: localhost\r\ncreated: 1985-01-01\r\n",
        "Domain Name: FRESH.TEST\r\nCreation Date: 2024-03-01T00:00:00Z\r\n",
    ])
    .await;
    let client = WhoisClient::new(options("127.0.0.1", port));
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).single().expect("date");

    assert_eq!(domain_age_years(&client, "fresh.test", now).await, 2);
    assert_eq!(server.await.expect("server").len(), 2);
}

#[tokio::test]
async fn age_is_zero_when_only_the_root_answers() {
    let (port, server) = spawn_server(vec!["domain: TEST\r\ncreated: 1985-01-01\r\n"]).await;
    let client = WhoisClient::new(options("127.0.0.1", port));
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).single().expect("date");

    assert_eq!(domain_age_years(&client, "fresh.test", now).await, 0);
    server.await.expect("server");
}
