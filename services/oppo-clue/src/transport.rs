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

use adcallback_core::{Context, Error, Result};
use bytes::Bytes;
use http::{HeaderMap, Method, Request};
use serde::Serialize;

/// Build a JSON `POST` request.
///
/// The payload is encoded with `serde_json`, which never escapes HTML
/// characters, so `<`, `>` and `&` reach the platform as is. Only the first
/// value of every header name in `headers` is applied.
pub fn build_json_request<T: Serialize + ?Sized>(
    endpoint: &str,
    payload: &T,
    headers: &HeaderMap,
) -> Result<Request<Bytes>> {
    let body = serde_json::to_vec(payload)
        .map_err(|e| Error::serialization("failed to encode payload as json").with_source(e))?;

    let mut req = Request::builder().method(Method::POST).uri(endpoint);
    for name in headers.keys() {
        if let Some(value) = headers.get(name) {
            req = req.header(name, value);
        }
    }

    Ok(req.body(Bytes::from(body))?)
}

/// Post `payload` as JSON to `endpoint` and return the raw response body.
///
/// The HTTP status is not inspected: a non-2xx reply still returns its body.
/// A single attempt is made; any failure is returned to the caller.
pub async fn post_json<T: Serialize + ?Sized>(
    ctx: &Context,
    endpoint: &str,
    payload: &T,
    headers: &HeaderMap,
) -> Result<Bytes> {
    let req = build_json_request(endpoint, payload, headers)?;
    log::debug!("post json to {endpoint}");

    let resp = ctx.http_send(req).await?;
    if !resp.status().is_success() {
        log::debug!("{endpoint} replied with status {}", resp.status());
    }

    Ok(resp.into_body())
}
