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

use crate::{Config, Credential};
use adcallback_core::{Context, ProvideCredential, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// ConfigCredentialProvider loads credential from [`Config`].
///
/// Fields missing from the config are filled from the environment first.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new provider via config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.config.as_ref().clone().from_env(ctx)?.credential()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use adcallback_core::StaticEnv;

    #[tokio::test]
    async fn test_config_credential_provider_merges_env() -> anyhow::Result<()> {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (OPPO_AD_API_ID, "env_api_id"),
            (OPPO_AD_API_KEY, "env_api_key"),
        ]));
        let config = Arc::new(Config::new().with_owner_id(99).with_api_id("cfg_api_id"));

        let provider = ConfigCredentialProvider::new(config);
        let cred = provider.provide_credential(&ctx).await?.unwrap();
        assert_eq!(cred.owner_id, 99);
        assert_eq!(cred.api_id, "cfg_api_id");
        assert_eq!(cred.api_key, "env_api_key");

        Ok(())
    }

    #[tokio::test]
    async fn test_config_credential_provider_invalid_owner_id() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (OPPO_AD_OWNER_ID, "abc"),
            (OPPO_AD_API_ID, "env_api_id"),
            (OPPO_AD_API_KEY, "env_api_key"),
        ]));

        let provider = ConfigCredentialProvider::new(Arc::new(Config::default()));
        let err = provider.provide_credential(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), adcallback_core::ErrorKind::ConfigInvalid);
    }

    #[tokio::test]
    async fn test_config_credential_provider_empty() -> anyhow::Result<()> {
        let provider = ConfigCredentialProvider::new(Arc::new(Config::default()));
        assert!(provider.provide_credential(&Context::new()).await?.is_none());

        Ok(())
    }
}
