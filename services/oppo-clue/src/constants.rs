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

/// Clue callback endpoint of the OPPO marketing platform.
pub const SEND_DATA_URL: &str = "https://sapi.ads.oppomobile.com/v1/clue/sendData";

/// Scheme prefix of the `Authorization` header value.
pub const BEARER: &str = "Bearer";

// Env values used by the oppo clue service.
pub const OPPO_AD_OWNER_ID: &str = "OPPO_AD_OWNER_ID";
pub const OPPO_AD_API_ID: &str = "OPPO_AD_API_ID";
pub const OPPO_AD_API_KEY: &str = "OPPO_AD_API_KEY";
pub const OPPO_AD_ENDPOINT: &str = "OPPO_AD_ENDPOINT";
