//! Stored templates.

use super::entity::entity;
use super::Entity;
use crate::errors::MandrillResult;
use serde_json::{json, Value};

entity! {
    /// A stored template, also used to select the template of a send
    Template => Template
}

impl Template {
    /// Create a template reference by name
    pub fn named(name: impl Into<String>) -> Self {
        let mut template = Self::new();
        template
            .data
            .insert("name".to_string(), Value::String(name.into()));
        template
    }

    /// Template name
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// Fill an editable region (`mc:edit="name"`)
    pub fn add_content(&mut self, name: &str, content: impl Into<Value>) -> MandrillResult<()> {
        let content: Value = content.into();
        self.append_to_list("content", json!({"name": name, "content": content}))
    }

    /// Add a merge variable used when rendering
    pub fn add_merge_var(&mut self, name: &str, content: impl Into<Value>) -> MandrillResult<()> {
        let content: Value = content.into();
        self.append_to_list("merge_vars", json!({"name": name, "content": content}))
    }

    /// Editable region contents, an empty list when none were added
    pub fn content(&self) -> Value {
        self.data
            .get("content")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    /// Merge variables, `null` when none were added
    pub fn merge_vars(&self) -> Value {
        self.data.get("merge_vars").cloned().unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_content() {
        let mut template = Template::named("welcome");
        template.add_content("header", "<h1>Hi</h1>").unwrap();
        template.add_content("footer", "bye").unwrap();

        assert_eq!(template.name(), Some("welcome"));
        assert_eq!(
            template.content(),
            json!([
                {"name": "header", "content": "<h1>Hi</h1>"},
                {"name": "footer", "content": "bye"}
            ])
        );
        assert_eq!(template.merge_vars(), Value::Null);
    }

    #[test]
    fn test_publish_is_coerced() {
        let raw = json!({"name": "t", "publish": "1", "labels": ["a"]});
        let template = Template::from_fields(raw.as_object().unwrap().clone());
        assert_eq!(template.get("publish").unwrap(), Some(&json!(true)));
        assert_eq!(template.get("labels").unwrap(), Some(&json!(["a"])));
    }
}
