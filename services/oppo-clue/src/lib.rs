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

//! Clue callback client for the OPPO marketing platform.
//!
//! ## Example
//!
//! ```no_run
//! use adcallback_core::{Context, OsEnv, Result};
//! use adcallback_http_send_reqwest::ReqwestHttpSend;
//! use adcallback_oppo_clue::{Client, SendDataParams, StaticCredentialProvider, TransformType};
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let client = Client::new(ctx)
//!     .with_credential_provider(StaticCredentialProvider::new(1000123, "api_id", "api_key"));
//!
//! let resp = client
//!     .send_data(SendDataParams {
//!         page_id: 1,
//!         tid: "tid".to_string(),
//!         transform_type: Some(TransformType::NewSubmit),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("code={} msg={}", resp.code, resp.msg);
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::SEND_DATA_URL;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

pub mod token;
pub use token::{Timestamp, TokenBuilder};

mod types;
pub use types::{ItemType, PageType, SendDataItem, SendDataParams, SendDataResponse, TransformType};

pub mod transport;

mod client;
pub use client::Client;
