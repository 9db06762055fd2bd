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

//! Wire types of the clue `sendData` api.

use std::fmt::{Display, Formatter};

use adcallback_core::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declares a closed set of numeric codes with a lossless mapping in both
/// directions.
macro_rules! wire_codes {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// All known codes in ascending order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Numeric code sent on the wire.
            pub fn code(self) -> i32 {
                match self {
                    $( $name::$variant => $code, )+
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = Error;

            fn try_from(code: i32) -> Result<Self, Self::Error> {
                match code {
                    $( $code => Ok($name::$variant), )+
                    _ => Err(Error::decode(format!(
                        "unknown {} code: {code}",
                        stringify!($name)
                    ))),
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }
    };
}

wire_codes! {
    /// Kind of conversion being reported (`transformType`).
    pub enum TransformType {
        /// Form submission (or clue submission).
        Submit = 1,
        /// Phone call.
        Call = 3,
        /// Online consultation.
        Chat = 4,
        /// Goods purchase.
        Buy = 5,
        /// Page visit.
        Visit = 6,
        /// WeChat id copied.
        Copy = 7,
        /// Payment.
        Pay = 8,
        /// Anything else.
        Other = 9,
        /// Payment inside an H5 page.
        H5Pay = 10,
        /// Pre-credit inside an H5 page.
        H5PreCredit = 11,
        /// Quick app payment.
        QuickAppPay = 12,
        /// Quick app added to desktop.
        QuickAppAddToDesktop = 13,
        /// One-yuan claim.
        OneYuanClaim = 14,
        /// Free claim.
        FreeClaim = 15,
        /// WeChat moments launched.
        MomentsLaunch = 16,
        /// Form submission, new definition.
        NewSubmit = 101,
        /// Key form action, new definition.
        NewKeyAction = 102,
        /// Valid consultation, new definition.
        NewValidChat = 103,
        /// WeChat follow, new definition.
        NewWechatFollow = 104,
        /// Web purchase, new definition.
        NewWebPurchase = 105,
        /// Phone call, new definition.
        NewCall = 106,
    }
}

wire_codes! {
    /// Landing page mechanism (`pageType`).
    pub enum PageType {
        /// Server rendered page integrated through the api.
        H5Api = 7,
    }
}

wire_codes! {
    /// Kind of a form field (`items[].type`).
    ///
    /// Sent on the wire as the decimal code in a JSON string.
    pub enum ItemType {
        /// Text input.
        Text = 1,
        /// Number input.
        Number = 2,
        /// Phone number.
        Phone = 3,
        /// Email address.
        Email = 4,
        /// Single choice.
        Radio = 5,
        /// Multiple choice.
        Checkbox = 6,
        /// Person name.
        Name = 7,
        /// Gender.
        Sex = 8,
        /// City.
        City = 9,
        /// Date.
        Date = 10,
        /// Drop-down single choice.
        Select = 11,
        /// Drop-down multiple choice.
        MultiSelect = 12,
    }
}

impl Serialize for TransformType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl Serialize for PageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl Serialize for ItemType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.code())
    }
}

fn is_zero_i64(v: &i64) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Treat an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One form field of a clue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendDataItem {
    /// Column index of the field.
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub column: i64,
    /// Field kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    /// Whether the field is required.
    #[serde(skip_serializing_if = "is_false")]
    pub if_need: bool,
    /// Field description, usually the label shown to the user.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub desc: String,
    /// Field value.
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub value: i64,
    /// Choices of a radio, checkbox or select field.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Payload of the `sendData` call. Zero-valued fields are omitted.
///
/// No field is validated locally; the platform does that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendDataParams {
    /// Landing page id.
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub page_id: i64,
    /// Advertiser account id, always overwritten by the client.
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub owner_id: i64,
    /// Ip of the user that converted.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ip: String,
    /// Tracking id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tid: String,
    /// Landing page business id.
    #[serde(rename = "lbid", skip_serializing_if = "String::is_empty")]
    pub lb_id: String,
    /// Form fields.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SendDataItem>,
    /// Conversion kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_type: Option<TransformType>,
    /// Landing page kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_type: Option<PageType>,
}

impl SendDataParams {
    /// Replace whatever owner id the caller put in with the configured one.
    ///
    /// The platform attributes the clue to the account in the token, so the
    /// payload must agree with it.
    pub fn with_owner_id(mut self, owner_id: i64) -> Self {
        if self.owner_id != 0 && self.owner_id != owner_id {
            log::debug!(
                "replace payload owner_id {} with configured {owner_id}",
                self.owner_id
            );
        }
        self.owner_id = owner_id;
        self
    }
}

/// Response of the `sendData` call.
///
/// `code` and `msg` are passed through untouched; interpreting business
/// failures is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SendDataResponse {
    /// Platform status code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i64,
    /// Platform message.
    #[serde(default, deserialize_with = "null_as_default")]
    pub msg: String,
}
