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

use std::fmt::{Debug, Formatter};

use adcallback_core::utils::Redact;
use adcallback_core::{Context, Error, Result};

use crate::constants::*;
use crate::Credential;

/// Config carries all the configuration for the OPPO clue callback.
#[derive(Clone, Default)]
pub struct Config {
    /// `owner_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OPPO_AD_OWNER_ID`]
    pub owner_id: Option<i64>,
    /// `api_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OPPO_AD_API_ID`]
    pub api_id: Option<String>,
    /// `api_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OPPO_AD_API_KEY`]
    pub api_key: Option<String>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OPPO_AD_ENDPOINT`]
    /// - falls back to [`SEND_DATA_URL`]
    pub endpoint: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set owner_id
    pub fn with_owner_id(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Set api_id
    pub fn with_api_id(mut self, api_id: impl Into<String>) -> Self {
        self.api_id = Some(api_id.into());
        self
    }

    /// Set api_key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Load config from env. Values already set are kept.
    ///
    /// Fails if [`OPPO_AD_OWNER_ID`] is needed but is not an integer.
    pub fn from_env(mut self, ctx: &Context) -> Result<Self> {
        if self.owner_id.is_none() {
            if let Some(v) = ctx.env_var(OPPO_AD_OWNER_ID) {
                let id = v.trim().parse::<i64>().map_err(|e| {
                    Error::config_invalid(format!(
                        "{OPPO_AD_OWNER_ID} must be an integer, got {v:?}"
                    ))
                    .with_source(e)
                })?;
                self.owner_id = Some(id);
            }
        }
        if let Some(v) = ctx.env_var(OPPO_AD_API_ID) {
            self.api_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OPPO_AD_API_KEY) {
            self.api_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OPPO_AD_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }

        Ok(self)
    }

    /// Endpoint to post clues to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(SEND_DATA_URL)
    }

    /// Build the credential out of this config.
    ///
    /// Returns `Ok(None)` if none of the credential fields is set, and an
    /// error if only some of them are.
    pub fn credential(&self) -> Result<Option<Credential>> {
        match (self.owner_id, &self.api_id, &self.api_key) {
            (Some(owner_id), Some(api_id), Some(api_key)) => Ok(Some(Credential::new(
                owner_id,
                api_id.clone(),
                api_key.clone(),
            ))),
            (None, None, None) => Ok(None),
            _ => Err(Error::config_invalid(
                "owner_id, api_id and api_key must be set together",
            )),
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("owner_id", &self.owner_id)
            .field("api_id", &self.api_id.as_ref().map(Redact::from))
            .field("api_key", &self.api_key.as_ref().map(Redact::from))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
