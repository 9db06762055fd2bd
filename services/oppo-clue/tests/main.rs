// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::env;

use adcallback_core::{Context, ErrorKind, OsEnv, Result, StaticEnv};
use adcallback_http_send_reqwest::ReqwestHttpSend;
use adcallback_oppo_clue::token::TokenParts;
use adcallback_oppo_clue::{
    Client, Config, ItemType, PageType, SendDataItem, SendDataParams, StaticCredentialProvider,
    Timestamp, TransformType,
};
use log::warn;
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(StaticEnv::default())
}

fn sample_params() -> SendDataParams {
    SendDataParams {
        page_id: 1001,
        owner_id: 1,
        ip: "10.0.0.1".to_string(),
        tid: "tid-<x>&y".to_string(),
        lb_id: "lbid-1".to_string(),
        items: vec![SendDataItem {
            column: 1,
            item_type: Some(ItemType::Phone),
            if_need: true,
            desc: "phone".to_string(),
            ..Default::default()
        }],
        transform_type: Some(TransformType::NewSubmit),
        page_type: Some(PageType::H5Api),
    }
}

#[tokio::test]
async fn test_send_data_against_mock_server() -> Result<()> {
    init_logger();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/clue/sendData"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "pageId": 1001,
            "ownerId": 1000123,
            "ip": "10.0.0.1",
            "tid": "tid-<x>&y",
            "lbid": "lbid-1",
            "items": [{"column": 1, "type": "3", "ifNeed": true, "desc": "phone"}],
            "transformType": 101,
            "pageType": 7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code":0,"msg":"ok"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(context())
        .with_credential_provider(StaticCredentialProvider::new(1000123, "api_id", "api_key"))
        .with_endpoint(format!("{}/v1/clue/sendData", server.uri()));

    let resp = client
        .send_data_with_timestamp(sample_params(), Timestamp::from_secs(1_700_000_000))
        .await?;
    assert_eq!(resp.code, 0);
    assert_eq!(resp.msg, "ok");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8(requests[0].body.clone()).expect("body must be utf-8");
    assert!(body.contains("tid-<x>&y"), "body: {body}");

    let authorization = requests[0]
        .headers
        .get("authorization")
        .expect("authorization must be set")
        .to_str()
        .expect("authorization must be ascii");
    let parts = TokenParts::parse(authorization)?;
    assert_eq!(parts.owner_id, 1000123);
    assert_eq!(parts.api_id, "api_id");
    assert_eq!(parts.timestamp, Timestamp::from_secs(1_700_000_000));
    assert!(parts.verify("api_key"));

    Ok(())
}

#[tokio::test]
async fn test_send_data_ignores_http_status() -> Result<()> {
    init_logger();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"code":4001,"msg":"bad param"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(context())
        .with_credential_provider(StaticCredentialProvider::new(1, "api_id", "api_key"))
        .with_endpoint(server.uri());

    let resp = client.send_data(SendDataParams::default()).await?;
    assert_eq!(resp.code, 4001);
    assert_eq!(resp.msg, "bad param");

    Ok(())
}

#[tokio::test]
async fn test_send_data_decode_error() {
    init_logger();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(context())
        .with_credential_provider(StaticCredentialProvider::new(1, "api_id", "api_key"))
        .with_endpoint(server.uri());

    let err = client
        .send_data(SendDataParams::default())
        .await
        .expect_err("html body must not decode");
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_send_data_unreachable_endpoint() {
    init_logger();

    let client = Client::new(context())
        .with_credential_provider(StaticCredentialProvider::new(1, "api_id", "api_key"))
        .with_endpoint("http://127.0.0.1:1/v1/clue/sendData");

    let err = client
        .send_data(SendDataParams::default())
        .await
        .expect_err("nothing listens on port 1");
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_send_data_malformed_endpoint() {
    init_logger();

    let client = Client::new(context())
        .with_credential_provider(StaticCredentialProvider::new(1, "api_id", "api_key"))
        .with_endpoint("not a valid endpoint");

    let err = client
        .send_data(SendDataParams::default())
        .await
        .expect_err("endpoint must be rejected");
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
}

/// Talks to the real platform. Enable with `ADCALLBACK_OPPO_TEST=on` and
/// `OPPO_AD_OWNER_ID`, `OPPO_AD_API_ID`, `OPPO_AD_API_KEY` set.
#[tokio::test]
async fn test_send_data_live() -> Result<()> {
    init_logger();
    let _ = dotenv::dotenv();

    if env::var("ADCALLBACK_OPPO_TEST").as_deref() != Ok("on") {
        warn!("ADCALLBACK_OPPO_TEST is not set, skipped");
        return Ok(());
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = Client::from_config(ctx, Config::new())?;

    let resp = client
        .send_data(SendDataParams {
            transform_type: Some(TransformType::NewSubmit),
            ..Default::default()
        })
        .await?;
    log::info!("sendData response: {resp:?}");

    Ok(())
}
