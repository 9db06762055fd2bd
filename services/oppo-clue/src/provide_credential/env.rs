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

use crate::{constants::*, Credential};
use adcallback_core::{Context, Error, ProvideCredential, Result};
use async_trait::async_trait;

/// EnvCredentialProvider loads OPPO credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `OPPO_AD_OWNER_ID`: The advertiser account id
/// - `OPPO_AD_API_ID`: The api client identity
/// - `OPPO_AD_API_KEY`: The api client secret
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let owner_id = envs.get(OPPO_AD_OWNER_ID);
        let api_id = envs.get(OPPO_AD_API_ID);
        let api_key = envs.get(OPPO_AD_API_KEY);

        match (owner_id, api_id, api_key) {
            (Some(owner_id), Some(api_id), Some(api_key)) => {
                let owner_id = owner_id.trim().parse::<i64>().map_err(|e| {
                    Error::credential_invalid(format!("{OPPO_AD_OWNER_ID} must be an integer"))
                        .with_source(e)
                })?;
                Ok(Some(Credential::new(owner_id, api_id, api_key)))
            }
            _ => Ok(None),
        }
    }
}
