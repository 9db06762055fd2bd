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

use adcallback_core::{utils::Redact, SigningCredential};

/// Credential for the OPPO marketing api.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Advertiser account id on the marketing platform.
    pub owner_id: i64,
    /// Unique identity of the authorized api client.
    pub api_id: String,
    /// Secret key of the authorized api client.
    pub api_key: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(owner_id: i64, api_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            owner_id,
            api_id: api_id.into(),
            api_key: api_key.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("owner_id", &self.owner_id)
            .field("api_id", &Redact::from(&self.api_id))
            .field("api_key", &Redact::from(&self.api_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.api_id.is_empty() && !self.api_key.is_empty()
    }
}
