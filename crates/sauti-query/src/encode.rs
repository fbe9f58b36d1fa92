//! The canonical query encoder.

/// Ordered `(key, value)` pairs. Order is preserved exactly on encode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs(Vec<(&'static str, String)>);

impl QueryPairs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.push((key, value.into()));
    }

    /// Push one pair per value, all under the same key.
    pub fn extend_key<'a>(
        &mut self,
        key: &'static str,
        values: impl IntoIterator<Item = &'a String>,
    ) {
        for value in values {
            self.push(key, value.as_str());
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `k1=v1&k2=v2`, without the leading `?`.
    #[must_use]
    pub fn encode_body(&self) -> String {
        let mut out = String::new();
        for (index, (key, value)) in self.0.iter().enumerate() {
            if index > 0 {
                out.push('&');
            }
            out.push_str(&encode_component(key));
            out.push('=');
            out.push_str(&encode_component(value));
        }
        out
    }

    /// `?k1=v1&k2=v2`, or an empty string when there are no pairs.
    #[must_use]
    pub fn encode(&self) -> String {
        if self.0.is_empty() {
            String::new()
        } else {
            format!("?{}", self.encode_body())
        }
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
#[must_use]
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_values_pass_through() {
        assert_eq!(encode_component("KEN"), "KEN");
        assert_eq!(encode_component("EAGC-RATIN_1.0~x"), "EAGC-RATIN_1.0~x");
    }

    #[test]
    fn reserved_and_non_ascii_are_escaped() {
        assert_eq!(encode_component("yellow beans"), "yellow%20beans");
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_component("Amasaka+"), "Amasaka%2B");
        assert_eq!(encode_component("Mbalé"), "Mbal%C3%A9");
    }

    #[test]
    fn pairs_keep_insertion_order() {
        let mut pairs = QueryPairs::new();
        pairs.push("currency", "USD");
        pairs.push("c", "UGA");
        pairs.push("c", "KEN");
        assert_eq!(pairs.encode(), "?currency=USD&c=UGA&c=KEN");
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn empty_pairs_encode_to_nothing() {
        assert_eq!(QueryPairs::new().encode(), "");
    }
}
