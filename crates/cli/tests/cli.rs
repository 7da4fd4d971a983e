use assert_cmd::prelude::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::process::Command;
use std::thread;

// --help exercises the whole clap definition without touching settings or the network.
#[test]
fn check_clap_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("isbn-cli")?;

    cmd.arg("--help");
    cmd.assert().success();

    Ok(())
}

/// Serve exactly one HTTP response with `body`, returning the upstream base URL.
fn one_shot_upstream(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    format!("http://{}/api/books", addr)
}

fn lookup_cmd(base_url: &str, isbn: &str) -> Command {
    let mut cmd = Command::cargo_bin("isbn-cli").unwrap();
    cmd.env("ISBN_CONFIG_DIR", std::env::temp_dir().join("isbn-cli-no-config"))
        .env("ISBN_OPENLIBRARY__BASE_URL", base_url)
        .env("ISBN_OPENLIBRARY__TIMEOUT_MS", "2000")
        .env("RUST_LOG", "off")
        .args(["lookup", isbn]);
    cmd
}

#[test]
fn lookup_prints_record_as_json() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = one_shot_upstream(
        r#"{"ISBN:0451526538": {"title": "Animal Farm", "authors": [{"name": "George Orwell"}]}}"#,
    );

    let output = lookup_cmd(&base_url, "0451526538").output()?;

    assert!(output.status.success(), "{:?}", output);
    let record: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(record["title"], "Animal Farm");
    assert_eq!(record["authors"], serde_json::json!(["George Orwell"]));
    assert_eq!(record["cover"], "");

    Ok(())
}

#[test]
fn lookup_reports_missing_book() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = one_shot_upstream("{}");

    let output = lookup_cmd(&base_url, "0000000000").output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Book not found"));

    Ok(())
}
