//! Message search queries.

use super::{Entity, EntityKind};
use crate::types::Params;
use serde_json::Value;

/// Search over sent messages
///
/// The `by_*` helpers write a Lucene style `query` such as
/// `email:example.com AND email:example.org`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageQuery {
    data: Params,
    time_series: bool,
}

impl MessageQuery {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Request hourly aggregated stats instead of individual messages
    pub fn use_time_series(&mut self) {
        self.time_series = true;
    }

    /// Whether the query targets the time series endpoint
    pub fn is_time_series(&self) -> bool {
        self.time_series
    }

    /// Restrict to messages with these tags
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_list("tags", tags);
    }

    /// Restrict to messages from these senders
    pub fn set_senders<I, S>(&mut self, senders: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_list("senders", senders);
    }

    /// Restrict to messages sent with these API keys
    pub fn set_api_keys<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_list("api_keys", keys);
    }

    /// Match on subject
    pub fn by_subject<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_query("subject", terms);
    }

    /// Match on sender address
    pub fn by_sender<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_query("sender", terms);
    }

    /// Match on recipient domain
    pub fn by_email_domain<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_query("email", terms);
    }

    /// Match on full recipient address
    pub fn by_email<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_query("full_email", terms);
    }

    /// Match on tags
    pub fn by_tags<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_query("tags", terms);
    }

    /// The query string, when set
    pub fn query(&self) -> Option<&str> {
        self.get_str("query")
    }

    fn set_list<I, S>(&mut self, field: &str, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = items.into_iter().map(|s| Value::String(s.into())).collect();
        self.data.insert(field.to_string(), Value::Array(list));
    }

    fn set_query<I, S>(&mut self, prefix: &str, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let query = terms
            .into_iter()
            .map(|t| format!("{}:{}", prefix, t.as_ref()))
            .collect::<Vec<_>>()
            .join(" AND ");
        self.data.insert("query".to_string(), Value::String(query));
    }
}

impl Entity for MessageQuery {
    const KIND: EntityKind = EntityKind::MessageQuery;

    fn from_data(data: Params) -> Self {
        Self {
            data,
            time_series: false,
        }
    }

    fn data(&self) -> &Params {
        &self.data
    }

    fn data_mut(&mut self) -> &mut Params {
        &mut self.data
    }
}
