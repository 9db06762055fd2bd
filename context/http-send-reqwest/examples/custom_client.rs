use adcallback_core::Context;
use adcallback_http_send_reqwest::ReqwestHttpSend;
use anyhow::Result;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // The context never retries and adds no timeout, so configure both on the client.
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(3))
        .user_agent("adcallback-example/0.1")
        .build()?;
    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://httpbin.org/post".to_string());
    println!("POST {url}");

    let req = http::Request::builder()
        .method(http::Method::POST)
        .uri(&url)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Bytes::from_static(br#"{"tid":"<demo>&"}"#))?;

    match ctx.http_send(req).await {
        Ok(resp) => {
            println!("status: {}", resp.status());
            println!("{}", String::from_utf8_lossy(resp.body()));
        }
        Err(e) => eprintln!("request failed: {e}"),
    }

    Ok(())
}
