use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Panaccess account user name.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Form field name used by the `login` function (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated user name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Panaccess account password, kept exactly as provided.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
/// The raw value never leaves the process; only its salted digest is sent.
pub struct Password(String);

impl Password {
    /// Form field name used by the `login` function (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// API token issued by Panaccess for a reseller integration (`apiToken`).
///
/// Invariant: non-empty after trimming.
pub struct ApiToken(String);

impl ApiToken {
    /// Form field name used by the `login` function (`apiToken`).
    pub const FIELD: &'static str = "apiToken";

    /// Create a validated [`ApiToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Opaque session identifier returned by `login`.
///
/// Invariant: non-empty after trimming.
pub struct SessionId(String);

impl SessionId {
    /// Form field name attached to authenticated calls (`sessionId`).
    pub const FIELD: &'static str = "sessionId";

    /// Create a validated [`SessionId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the session identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionId(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Base URL of one Panaccess API node.
///
/// Invariant: parses as an absolute `http`/`https` URL.
pub struct ServerUrl(url::Url);

impl ServerUrl {
    /// Create a validated [`ServerUrl`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let input = value.as_ref().trim();
        let parsed = url::Url::parse(input).map_err(|_| ValidationError::InvalidUrl {
            input: input.to_owned(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidUrl {
                input: input.to_owned(),
            });
        }
        Ok(Self(parsed))
    }

    /// URL for invoking `function` on this node:
    /// `<base>?f=<function>&requestMode=function`.
    pub fn function_url(&self, function: &str) -> String {
        let mut url = self.0.clone();
        url.query_pairs_mut()
            .append_pair("f", function)
            .append_pair("requestMode", "function");
        url.into()
    }

    /// Borrow the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Subscriber code (`subscriberCode`).
///
/// Invariant: non-empty after trimming.
pub struct SubscriberCode(String);

impl SubscriberCode {
    /// Form field name used by Panaccess (`subscriberCode`).
    pub const FIELD: &'static str = "subscriberCode";

    /// Create a validated [`SubscriberCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated subscriber code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Smartcard serial number.
///
/// Panaccess calls this `sn` in listings and `smartcardId` in requests.
pub struct SmartcardSn(String);

impl SmartcardSn {
    /// Form field name used by smartcard functions (`smartcardId`).
    pub const FIELD: &'static str = "smartcardId";

    /// Create a validated [`SmartcardSn`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the serial number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Numeric product identifier (`productId`).
pub struct ProductId(i64);

impl ProductId {
    /// Form field name used by Panaccess (`productId`).
    pub const FIELD: &'static str = "productId";

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Numeric order identifier (`orderId`).
pub struct OrderId(i64);

impl OrderId {
    /// Form field name used by Panaccess (`orderId`).
    pub const FIELD: &'static str = "orderId";

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
