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

use std::sync::Arc;

use adcallback_core::{Context, Error, ProvideCredential, Result, SigningCredential};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};

use crate::constants::SEND_DATA_URL;
use crate::token::{Timestamp, TokenBuilder};
use crate::transport::post_json;
use crate::{
    Config, Credential, DefaultCredentialProvider, SendDataParams, SendDataResponse,
    StaticCredentialProvider,
};

/// Client reports clues to the OPPO marketing platform.
///
/// Every call loads the credential, signs with a freshly captured timestamp
/// and performs exactly one request. Clones share the same context and
/// credential provider.
#[derive(Clone, Debug)]
pub struct Client {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = Credential>>,
    endpoint: String,
}

impl Client {
    /// Create a client that loads credentials through [`DefaultCredentialProvider`].
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            provider: Arc::new(DefaultCredentialProvider::new()),
            endpoint: SEND_DATA_URL.to_string(),
        }
    }

    /// Create a client out of a fully populated [`Config`].
    ///
    /// Unset fields are loaded from the environment of `ctx`.
    pub fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let config = config.from_env(&ctx)?;
        let credential = config
            .credential()?
            .ok_or_else(|| Error::config_invalid("owner_id, api_id and api_key are required"))?;
        let endpoint = config.endpoint().to_string();

        Ok(Self::new(ctx)
            .with_credential_provider(StaticCredentialProvider::from(credential))
            .with_endpoint(endpoint))
    }

    /// Replace the credential provider.
    pub fn with_credential_provider(
        mut self,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        self.provider = Arc::new(provider);
        self
    }

    /// Replace the endpoint, mostly useful for testing against a local server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Report one clue, signed with the current time.
    pub async fn send_data(&self, params: SendDataParams) -> Result<SendDataResponse> {
        self.send_data_with_timestamp(params, Timestamp::now()).await
    }

    /// Report one clue, signed with the given timestamp.
    ///
    /// The owner id of `params` is always replaced by the configured one.
    pub async fn send_data_with_timestamp(
        &self,
        params: SendDataParams,
        timestamp: Timestamp,
    ) -> Result<SendDataResponse> {
        let credential = self.load_credential().await?;
        let params = params.with_owner_id(credential.owner_id);

        let builder = TokenBuilder::with_timestamp(&credential, timestamp);
        let headers = build_headers(&builder)?;

        let body = post_json(&self.ctx, &self.endpoint, &params, &headers).await?;
        let resp: SendDataResponse = serde_json::from_slice(&body).map_err(|e| {
            Error::decode(format!(
                "failed to decode sendData response: {}",
                body_excerpt(&body)
            ))
            .with_source(e)
        })?;
        log::debug!("sendData replied code={} msg={}", resp.code, resp.msg);

        Ok(resp)
    }

    async fn load_credential(&self) -> Result<Credential> {
        let credential = self
            .provider
            .provide_credential(&self.ctx)
            .await?
            .ok_or_else(|| Error::credential_invalid("no credential found for oppo clue"))?;
        if !credential.is_valid() {
            return Err(Error::credential_invalid(
                "api_id and api_key must not be empty",
            ));
        }

        Ok(credential)
    }
}

/// Longest response excerpt carried in an error message, in chars.
const BODY_EXCERPT_CHARS: usize = 256;

fn body_excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    }
}

fn build_headers(builder: &TokenBuilder<'_>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let mut authorization: HeaderValue = builder.authorization().parse()?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    Ok(headers)
}
