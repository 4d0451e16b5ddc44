use serde::Deserialize;
use serde::de::Error as DeError;

/// Integer returned by Panaccess as either a JSON number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportInt(i64);

impl TransportInt {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                parsed
                    .trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| D::Error::custom(format!("expected integer, got {parsed:?}")))
            }
            Some(b'-' | b'0'..=b'9') => token
                .parse::<i64>()
                .map(Self)
                .map_err(|_| D::Error::custom(format!("expected integer, got {token}"))),
            _ => Err(D::Error::custom(
                "expected integer field to be JSON number or string",
            )),
        }
    }
}
