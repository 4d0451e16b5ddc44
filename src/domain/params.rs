/// Default page size applied to every listing call.
pub const DEFAULT_LIMIT: u32 = 1000;

/// Ordered form parameters for one remote call.
///
/// Keys may repeat (`smartcards[]`); [`Params::set`] replaces every entry
/// of a key while [`Params::add`] appends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Form field name for the page size (`limit`).
    pub const LIMIT: &'static str = "limit";

    pub fn new() -> Self {
        Self::default()
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value stored under `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Append a value, keeping existing entries of the same key.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.push((key.into(), value.into()));
        self
    }

    /// Replace all values of `key` with a single one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        self.0.retain(|(k, _)| *k != key);
        self.0.push((key, value.into()));
        self
    }

    /// Set `key` only when it is absent or empty.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        if self.get(&key).is_none_or(str::is_empty) {
            self.set(key, value);
        }
        self
    }

    /// Builder-style `add`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    /// Apply `limit=1000` unless the caller chose a limit.
    pub fn with_default_limit(mut self) -> Self {
        self.set_default(Self::LIMIT, DEFAULT_LIMIT.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_vec(self) -> Vec<(String, String)> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_is_added_when_missing() {
        let params = Params::new().with("productId", "42").with_default_limit();
        assert_eq!(params.get(Params::LIMIT), Some("1000"));
        assert_eq!(params.get("productId"), Some("42"));
    }

    #[test]
    fn default_limit_never_overwrites_caller_limit() {
        let params = Params::new().with("limit", "25").with_default_limit();
        assert_eq!(params.get_all(Params::LIMIT).collect::<Vec<_>>(), vec!["25"]);
    }

    #[test]
    fn empty_limit_counts_as_missing() {
        let params = Params::new().with("limit", "").with_default_limit();
        assert_eq!(params.get_all(Params::LIMIT).collect::<Vec<_>>(), vec!["1000"]);
    }

    #[test]
    fn set_replaces_and_add_appends() {
        let mut params = Params::new();
        params.add("smartcards[]", "A").add("smartcards[]", "B");
        assert_eq!(
            params.get_all("smartcards[]").collect::<Vec<_>>(),
            vec!["A", "B"]
        );

        params.set("smartcards[]", "C");
        assert_eq!(params.get_all("smartcards[]").collect::<Vec<_>>(), vec!["C"]);
        assert_eq!(params.len(), 1);
    }
}
