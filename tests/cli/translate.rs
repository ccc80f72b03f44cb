use std::{
    io::{BufRead, BufReader, Read, Write},
    net::TcpListener,
    thread::{self, JoinHandle},
};

use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, stderr, stdout};

/// Answer a single chat completion request with `content`.
fn fake_model(content: &str) -> Result<(String, JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let url = format!("http://{}", listener.local_addr()?);
    let body = serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
    .to_string();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut request = vec![0; content_length];
        reader.read_exact(&mut request).unwrap();

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        reader.get_mut().write_all(response.as_bytes()).unwrap();
    });

    Ok((url, handle))
}

#[test]
fn test_translate_without_api_key_copies_source() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("messages.properties", "save=保存\ncancel=取消\n")?;
    test.write_file("messages_en.properties", "cancel=Cancel\nstale=Stale\n")?;

    let output = test
        .command()
        .args(["translate", "messages.properties", "messages_en.properties"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Wrote 2 entries to messages_en.properties\n  - translated: 0, kept: 1, copied from source: 1, dropped: 1\n"
    );
    assert_eq!(
        stderr(&output),
        "warning: 1 warning(s) (use -v for details)\n"
    );

    assert_snapshot!(test.read_file("messages_en.properties")?, @r"
    # 自动生成的国际化配置文件
    # Auto-generated i18n configuration file

    save=保存
    cancel=Cancel
    ");

    Ok(())
}

#[test]
fn test_translate_with_model() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("messages.properties", "save=保存\n")?;
    let (url, server) = fake_model("Translation: Save")?;

    let output = test
        .command()
        .args(["translate", "messages.properties", "out/messages_en.properties"])
        .args(["--api-key", "sk-test", "--api-base-url", &url])
        .output()?;
    server.join().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stderr(&output), "");
    assert!(
        test.read_file("out/messages_en.properties")?
            .ends_with("\nsave=Save\n")
    );

    Ok(())
}

#[test]
fn test_translate_missing_source() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .command()
        .args(["translate", "absent.properties", "en.properties"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "Error: source file absent.properties does not exist\n"
    );

    Ok(())
}
