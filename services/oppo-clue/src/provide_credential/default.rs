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

use adcallback_core::{Context, ProvideCredential, ProvideCredentialChain, Result};
use async_trait::async_trait;

use crate::credential::Credential;
use crate::provide_credential::EnvCredentialProvider;

/// DefaultCredentialProvider will try to load credential from different sources.
///
/// Resolution order:
///
/// 1. Environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new().push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use adcallback_oppo_clue::{DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// let provider = DefaultCredentialProvider::new()
    ///     .push_front(StaticCredentialProvider::new(1000123, "api_id", "api_key"));
    /// ```
    pub fn push_front(mut self, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::StaticCredentialProvider;
    use adcallback_core::{ErrorKind, StaticEnv};

    #[tokio::test]
    async fn test_default_loader_without_env() {
        let ctx = Context::new().with_env(StaticEnv::default());

        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&ctx).await.unwrap();

        assert!(credential.is_none());
    }

    #[tokio::test]
    async fn test_default_loader_with_env() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (OPPO_AD_OWNER_ID, "1000123"),
            (OPPO_AD_API_ID, "api_id"),
            (OPPO_AD_API_KEY, "api_key"),
        ]));

        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&ctx).await.unwrap().unwrap();

        assert_eq!(1000123, credential.owner_id);
        assert_eq!("api_id", credential.api_id);
        assert_eq!("api_key", credential.api_key);
    }

    #[tokio::test]
    async fn test_default_loader_invalid_owner_id() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (OPPO_AD_OWNER_ID, "abc"),
            (OPPO_AD_API_ID, "api_id"),
            (OPPO_AD_API_KEY, "api_key"),
        ]));

        let loader = DefaultCredentialProvider::new();
        let err = loader.provide_credential(&ctx).await.unwrap_err();

        assert_eq!(ErrorKind::CredentialInvalid, err.kind());
        assert!(err.message().contains(OPPO_AD_OWNER_ID), "{err}");
    }

    #[tokio::test]
    async fn test_default_loader_push_front_wins() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (OPPO_AD_OWNER_ID, "1000123"),
            (OPPO_AD_API_ID, "api_id"),
            (OPPO_AD_API_KEY, "api_key"),
        ]));

        let loader = DefaultCredentialProvider::new()
            .push_front(StaticCredentialProvider::new(1, "static_id", "static_key"));
        let credential = loader.provide_credential(&ctx).await.unwrap().unwrap();

        assert_eq!(1, credential.owner_id);
        assert_eq!("static_id", credential.api_id);
    }
}
