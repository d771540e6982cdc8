use serde::Deserialize;

/// Ordered query parameters for a SonarCloud request.
///
/// Optional values that are `None` or blank are never emitted, lists are
/// comma-joined in input order and booleans render as `true`/`false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.push(key, value);
        }
        self
    }

    pub fn push_opt_num<T: ToString>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Joins the elements as given; only an absent or empty list is omitted.
    pub fn push_list(&mut self, key: &str, values: Option<&[String]>) -> &mut Self {
        if let Some(values) = values.filter(|v| !v.is_empty()) {
            self.push(key, values.join(","));
        }
        self
    }

    pub fn push_bool(&mut self, key: &str, value: Option<bool>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, if value { "true" } else { "false" });
        }
        self
    }

    /// Appends `key=value` unless `key` is already present.
    pub fn set_default(&mut self, key: &str, value: &str) -> &mut Self {
        if !self.contains(key) {
            self.push(key, value);
        }
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Tool argument accepted either as `"a,b"` or `["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    pub fn joined(&self) -> String {
        match self {
            StringOrList::One(value) => value.clone(),
            StringOrList::Many(values) => values.join(","),
        }
    }
}
