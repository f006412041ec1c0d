use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use url::Url;

use crate::error::Result;

/// A source of query-string parameters, standing in for the current page location
pub trait QuerySource {
    /// First value of `name`, if present
    fn query_value(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl QuerySource for HashMap<String, String> {
    fn query_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl QuerySource for BTreeMap<String, String> {
    fn query_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl QuerySource for Url {
    fn query_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// A raw search string such as `?orderId=123&tab=items`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryString(String);

impl QueryString {
    pub fn new(search: impl Into<String>) -> Self {
        let search = search.into();
        match search.strip_prefix('?') {
            Some(stripped) => Self(stripped.to_string()),
            None => Self(search),
        }
    }

    /// The search part of an absolute URL
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = Url::parse(url)?;
        Ok(Self::new(parsed.query().unwrap_or_default()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl QuerySource for QueryString {
    fn query_value(&self, name: &str) -> Option<Cow<'_, str>> {
        url::form_urlencoded::parse(self.0.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// Read a query parameter as an identifier string; absent or empty yields `None`
pub fn query_param_as_id<Q: QuerySource + ?Sized>(query: &Q, name: &str) -> Option<String> {
    query
        .query_value(name)
        .filter(|value| !value.is_empty())
        .map(Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_from_url_keeps_all_digits() {
        let url = Url::parse("https://shop.example/order.html?orderId=1207279389033627649").unwrap();
        assert_eq!(
            query_param_as_id(&url, "orderId").as_deref(),
            Some("1207279389033627649")
        );
    }

    #[test]
    fn test_param_absent_or_empty() {
        let url = Url::parse("https://shop.example/?orderId=&tab=items").unwrap();
        assert_eq!(query_param_as_id(&url, "orderId"), None);
        assert_eq!(query_param_as_id(&url, "storeId"), None);
    }

    #[test]
    fn test_param_first_occurrence_wins() {
        let query = QueryString::new("?id=1&id=2");
        assert_eq!(query_param_as_id(&query, "id").as_deref(), Some("1"));
    }

    #[test]
    fn test_param_is_percent_decoded() {
        let query = QueryString::new("couponId=A%2FB+1");
        assert_eq!(query_param_as_id(&query, "couponId").as_deref(), Some("A/B 1"));
    }

    #[test]
    fn test_param_from_maps() {
        let mut hash = HashMap::new();
        hash.insert("userId".to_string(), "9007199254740993".to_string());
        hash.insert("blank".to_string(), String::new());
        assert_eq!(query_param_as_id(&hash, "userId").as_deref(), Some("9007199254740993"));
        assert_eq!(query_param_as_id(&hash, "blank"), None);

        let btree: BTreeMap<String, String> = hash.into_iter().collect();
        assert_eq!(query_param_as_id(&btree, "userId").as_deref(), Some("9007199254740993"));
    }

    #[test]
    fn test_query_string_from_url() {
        let query = QueryString::from_url("https://shop.example/pay?orderId=42#top").unwrap();
        assert_eq!(query.as_str(), "orderId=42");
        assert!(QueryString::from_url("not a url").is_err());
        assert_eq!(QueryString::from_url("https://shop.example/").unwrap().as_str(), "");
    }

    #[test]
    fn test_query_string_strips_question_mark() {
        assert_eq!(QueryString::new("?a=1").as_str(), "a=1");
        assert_eq!(QueryString::new("a=1").as_str(), "a=1");
    }
}
