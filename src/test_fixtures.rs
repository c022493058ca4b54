//! 测试夹具模块（仅在测试构建中编译）
//!
//! 提供一个最小化的本地HTTP服务器，返回固定的资源内容，
//! 让下载相关的测试无需访问真实网络。

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// 固定资源表：路径 -> 响应体
pub const FIXTURE_STYLESHEET: &[u8] = b"body { margin: 0; }";
pub const FIXTURE_SCRIPT: &[u8] = b"console.log('ok');";
pub const FIXTURE_LOGO: &[u8] = b"\x89PNG-fixture-logo";
pub const FIXTURE_HERO: &[u8] = b"\xff\xd8JPG-fixture-hero";

/// 启动本地夹具服务器，返回监听地址
/// 服务器随测试运行时结束而销毁
pub async fn spawn_fixture_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("绑定测试端口失败");
    let addr = listener.local_addr().expect("读取监听地址失败");

    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(handle_connection(socket));
        }
    });

    addr
}

async fn handle_connection(mut socket: tokio::net::TcpStream) {
    let mut buf = vec![0u8; 4096];
    let mut read_total = 0;

    // 读到请求头结束为止（GET请求没有请求体）
    loop {
        match socket.read(&mut buf[read_total..]).await {
            Ok(0) => break,
            Ok(n) => {
                read_total += n;
                if buf[..read_total].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
                if read_total == buf.len() {
                    break;
                }
            }
            Err(_) => return,
        }
    }

    let request = String::from_utf8_lossy(&buf[..read_total]).into_owned();
    let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

    let (status, body): (&str, Vec<u8>) = match path.as_str() {
        "/style.css" => ("200 OK", FIXTURE_STYLESHEET.to_vec()),
        "/app.js" => ("200 OK", FIXTURE_SCRIPT.to_vec()),
        "/logo.png" => ("200 OK", FIXTURE_LOGO.to_vec()),
        "/hero.jpg" => ("200 OK", FIXTURE_HERO.to_vec()),
        _ => ("404 Not Found", b"not found".to_vec()),
    };

    let header = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );

    let _ = socket.write_all(header.as_bytes()).await;
    let _ = socket.write_all(&body).await;
    let _ = socket.shutdown().await;
}
