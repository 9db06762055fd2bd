use adcallback_core::{Context, OsEnv};
use adcallback_http_send_reqwest::ReqwestHttpSend;
use adcallback_oppo_clue::{
    Client, Config, ItemType, PageType, SendDataItem, SendDataParams, TransformType,
};
use anyhow::Result;
use reqwest::Client as HttpClient;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    // The clue api applies no timeout of its own.
    let http = HttpClient::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::new(http))
        .with_env(OsEnv);

    // OPPO_AD_OWNER_ID, OPPO_AD_API_ID and OPPO_AD_API_KEY fill whatever is left unset here.
    let client = match Client::from_config(ctx, Config::new()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("credential not configured: {e}");
            eprintln!("set OPPO_AD_OWNER_ID, OPPO_AD_API_ID and OPPO_AD_API_KEY to run this example");
            return Ok(());
        }
    };

    let params = SendDataParams {
        page_id: 1001,
        ip: "127.0.0.1".to_string(),
        tid: std::env::var("OPPO_AD_TID").unwrap_or_default(),
        lb_id: std::env::var("OPPO_AD_LBID").unwrap_or_default(),
        items: vec![SendDataItem {
            column: 1,
            item_type: Some(ItemType::Phone),
            if_need: true,
            desc: "phone".to_string(),
            ..Default::default()
        }],
        transform_type: Some(TransformType::NewSubmit),
        page_type: Some(PageType::H5Api),
        ..Default::default()
    };

    println!("sending clue to {}", client.endpoint());
    let resp = client.send_data(params).await?;
    println!("code={} msg={}", resp.code, resp.msg);

    Ok(())
}
