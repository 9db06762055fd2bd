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

//! Bearer token of the OPPO marketing api.
//!
//! ```text
//! sign  = hex(sha1(api_id + api_key + timestamp))
//! token = base64(owner_id + "," + api_id + "," + timestamp + "," + sign)
//! ```

use std::fmt::{Display, Formatter};

use adcallback_core::hash::{base64_decode, base64_encode, hex_sha1};
use adcallback_core::time::now_unix;
use adcallback_core::{Error, Result};

use crate::constants::BEARER;
use crate::Credential;

/// Unix timestamp in seconds used to sign one request.
///
/// The same value must feed both the signature and the token, otherwise the
/// platform rejects the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Capture the current time.
    pub fn now() -> Self {
        Self(now_unix())
    }

    /// Use the given unix seconds.
    pub fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Unix seconds of this timestamp.
    pub fn as_secs(&self) -> i64 {
        self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Timestamp {
    fn from(secs: i64) -> Self {
        Self(secs)
    }
}

/// TokenBuilder derives the `Authorization` header for one request.
///
/// A builder is bound to one credential and one [`Timestamp`] for its whole
/// life. Build a new one for every outgoing call.
#[derive(Debug, Clone, Copy)]
pub struct TokenBuilder<'a> {
    credential: &'a Credential,
    timestamp: Timestamp,
}

impl<'a> TokenBuilder<'a> {
    /// Create a builder that captures the current time.
    pub fn new(credential: &'a Credential) -> Self {
        Self::with_timestamp(credential, Timestamp::now())
    }

    /// Create a builder for a fixed timestamp.
    pub fn with_timestamp(credential: &'a Credential, timestamp: Timestamp) -> Self {
        Self {
            credential,
            timestamp,
        }
    }

    /// Timestamp this builder signs with.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Lowercase hex sha1 of `api_id + api_key + timestamp`.
    pub fn signature(&self) -> String {
        signature(
            &self.credential.api_id,
            &self.credential.api_key,
            self.timestamp,
        )
    }

    /// Base64 of `owner_id,api_id,timestamp,signature`.
    pub fn token(&self) -> String {
        token(
            self.credential.owner_id,
            &self.credential.api_id,
            self.timestamp,
            &self.signature(),
        )
    }

    /// Value of the `Authorization` header: `Bearer <token>`.
    pub fn authorization(&self) -> String {
        format!("{BEARER} {}", self.token())
    }
}

/// Compute the signature for the given fields.
pub fn signature(api_id: &str, api_key: &str, timestamp: Timestamp) -> String {
    let content = format!("{api_id}{api_key}{timestamp}");
    hex_sha1(content.as_bytes())
}

/// Assemble the token out of an already computed signature.
pub fn token(owner_id: i64, api_id: &str, timestamp: Timestamp, signature: &str) -> String {
    let content = format!("{owner_id},{api_id},{timestamp},{signature}");
    base64_encode(content.as_bytes())
}

/// Fields carried in cleartext inside a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParts {
    /// Advertiser account id.
    pub owner_id: i64,
    /// Api client identity.
    pub api_id: String,
    /// Signing timestamp.
    pub timestamp: Timestamp,
    /// Hex signature.
    pub signature: String,
}

impl TokenParts {
    /// Decode a token (with or without the `Bearer ` prefix).
    pub fn parse(token: &str) -> Result<Self> {
        let token = token
            .strip_prefix(BEARER)
            .map(str::trim_start)
            .unwrap_or(token);
        let content = String::from_utf8(base64_decode(token)?)?;

        let fields: Vec<&str> = content.split(',').collect();
        let [owner_id, api_id, timestamp, signature] = fields.as_slice() else {
            return Err(Error::decode(format!(
                "token must carry 4 fields, got {}",
                fields.len()
            )));
        };

        let owner_id = owner_id
            .parse::<i64>()
            .map_err(|e| Error::decode("token owner_id is not an integer").with_source(e))?;
        let timestamp = timestamp
            .parse::<i64>()
            .map_err(|e| Error::decode("token timestamp is not an integer").with_source(e))?;

        Ok(Self {
            owner_id,
            api_id: api_id.to_string(),
            timestamp: Timestamp::from_secs(timestamp),
            signature: signature.to_string(),
        })
    }

    /// Check the signature against the given api key.
    pub fn verify(&self, api_key: &str) -> bool {
        signature(&self.api_id, api_key, self.timestamp) == self.signature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcallback_core::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_signature() {
        let ts = Timestamp::from_secs(1000);
        assert_eq!(signature("A", "B", ts), hex_sha1(b"AB1000"));
        assert_eq!(
            signature("A", "B", ts),
            "06f3d724a48761a56fa9d3f64e93944d09b46c8a"
        );
    }

    #[test]
    fn test_token() {
        let ts = Timestamp::from_secs(1000);
        assert_eq!(token(7, "A", ts, "deadbeef"), "NyxBLDEwMDAsZGVhZGJlZWY=");
    }

    #[test]
    fn test_builder_uses_one_timestamp() {
        let cred = Credential::new(7, "A", "B");
        let builder = TokenBuilder::with_timestamp(&cred, Timestamp::from_secs(1000));

        assert_eq!(builder.signature(), signature("A", "B", builder.timestamp()));
        assert_eq!(
            builder.token(),
            base64_encode(b"7,A,1000,06f3d724a48761a56fa9d3f64e93944d09b46c8a")
        );
        assert_eq!(
            builder.authorization(),
            format!("Bearer {}", builder.token())
        );
    }

    #[test]
    fn test_builder_is_deterministic() {
        let cred = Credential::new(1000123, "api_id", "api_key");
        let ts = Timestamp::from_secs(1_700_000_000);

        let a = TokenBuilder::with_timestamp(&cred, ts);
        let b = TokenBuilder::with_timestamp(&cred, ts);
        assert_eq!(a.signature(), b.signature());
        assert_eq!(a.token(), b.token());
    }

    #[test]
    fn test_every_input_changes_token() {
        let ts = Timestamp::from_secs(1000);
        let base = Credential::new(7, "A", "B");
        let base_builder = TokenBuilder::with_timestamp(&base, ts);
        let base_sign = base_builder.signature();
        let base_token = base_builder.token();

        let owner = Credential::new(8, "A", "B");
        let owner = TokenBuilder::with_timestamp(&owner, ts);
        assert_eq!(owner.signature(), base_sign);
        assert_ne!(owner.token(), base_token);

        let api_id = Credential::new(7, "C", "B");
        let api_id = TokenBuilder::with_timestamp(&api_id, ts);
        assert_ne!(api_id.signature(), base_sign);
        assert_ne!(api_id.token(), base_token);

        let api_key = Credential::new(7, "A", "C");
        let api_key = TokenBuilder::with_timestamp(&api_key, ts);
        assert_ne!(api_key.signature(), base_sign);
        assert_ne!(api_key.token(), base_token);

        let later = TokenBuilder::with_timestamp(&base, Timestamp::from_secs(1001));
        assert_ne!(later.signature(), base_sign);
        assert_ne!(later.token(), base_token);
    }

    #[test]
    fn test_token_parts_round_trip() {
        let cred = Credential::new(1000123, "api-id", "api-key");
        let builder = TokenBuilder::with_timestamp(&cred, Timestamp::from_secs(1_700_000_000));

        let parts = TokenParts::parse(&builder.authorization()).unwrap();
        assert_eq!(
            parts,
            TokenParts {
                owner_id: 1000123,
                api_id: "api-id".to_string(),
                timestamp: Timestamp::from_secs(1_700_000_000),
                signature: builder.signature(),
            }
        );
        assert!(parts.verify("api-key"));
        assert!(!parts.verify("other-key"));

        assert_eq!(TokenParts::parse(&builder.token()).unwrap(), parts);
    }

    #[test]
    fn test_token_parts_invalid() {
        let cases = vec![
            "%%%not-base64%%%".to_string(),
            base64_encode(b"1,2,3"),
            base64_encode(b"x,A,1000,sig"),
            base64_encode(b"7,A,soon,sig"),
        ];

        for input in cases {
            let err = TokenParts::parse(&input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Decode, "input: {input}");
        }
    }
}
