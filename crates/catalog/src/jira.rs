//! Issue tracker capability: `jira/list`.
//!
//! Builds list tasks and decodes their output into [`ListReturns`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use engine::{Argument, ServiceBinding, TaskDescriptor};

pub const SERVICE: &str = "jira";
pub const VERSION: &str = "0.1.0";
pub const ENDPOINT_LIST: &str = "list";

/// Field specifier asking the tracker for every field.
pub const ALL_FIELDS: &str = "*all";

pub fn binding() -> ServiceBinding {
    ServiceBinding::new(SERVICE, VERSION, SERVICE)
}

// ---------------------------------------------------------------------------
// list arguments
// ---------------------------------------------------------------------------

/// Arguments of a `list` call.
#[derive(Debug, Clone)]
pub struct ListArgs<'a> {
    pub token: &'a str,
    pub endpoint: &'a str,
    pub user: &'a str,
    /// Query-language filter.
    pub jql: &'a str,
    /// Requested-fields specifier, usually [`ALL_FIELDS`].
    pub query_fields: &'a str,
}

/// Argument list of a `list` call, in contract order.
pub fn list_arguments(args: &ListArgs<'_>) -> Vec<Argument> {
    vec![
        Argument::new("API_Token", args.token),
        Argument::new("Endpoint", args.endpoint),
        Argument::new("User", args.user),
        Argument::new("JQL", args.jql),
        Argument::new("QueryFields", args.query_fields),
    ]
}

/// Build a `jira/list` task.
pub fn list_task(name: impl Into<String>, args: &ListArgs<'_>) -> TaskDescriptor {
    TaskDescriptor::new(name, SERVICE, ENDPOINT_LIST).with_arguments(list_arguments(args))
}

// ---------------------------------------------------------------------------
// list output
// ---------------------------------------------------------------------------

/// Decoded output of a `list` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListReturns {
    #[serde(default, alias = "Issues", deserialize_with = "nullable_vec")]
    pub issues: Vec<Issue>,
}

/// One issue-like record. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default, alias = "ID")]
    pub id: Option<String>,
    #[serde(default, alias = "Key")]
    pub key: Option<String>,
    #[serde(default, rename = "self", alias = "Self")]
    pub self_link: Option<String>,
    #[serde(default, alias = "Fields", deserialize_with = "nullable_map")]
    pub fields: Map<String, Value>,
}

impl Issue {
    /// The issue key, if present and non-empty.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }

    /// The issue identifier, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// A string-typed field. Missing fields and non-string values are both
    /// `None`.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.field_str("description")
    }
}

/// Permalink of an issue: `<endpoint>/browse/<key>`.
pub fn browse_url(endpoint: &str, key: &str) -> String {
    format!("{endpoint}/browse/{key}")
}

fn nullable_vec<'de, D>(deserializer: D) -> Result<Vec<Issue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Issue>>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_task_uses_contract_keys_in_order() {
        let task = list_task(
            "fetch",
            &ListArgs {
                token: "t",
                endpoint: "https://x.atlassian.net",
                user: "me",
                jql: "watcher = currentUser()",
                query_fields: ALL_FIELDS,
            },
        );
        let keys: Vec<&str> = task.arguments.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["API_Token", "Endpoint", "User", "JQL", "QueryFields"]);
        assert_eq!(task.capability.to_string(), "jira/list");
        assert_eq!(task.text_argument("QueryFields"), Some("*all"));
    }

    #[test]
    fn decodes_partial_issues() {
        let out: ListReturns = serde_json::from_value(json!({
            "issues": [
                { "id": "1", "key": "AB-1", "self": "https://x/rest/1",
                  "fields": { "description": "hello", "priority": 3 } },
                { "id": "2", "key": null, "fields": null },
                { }
            ]
        }))
        .unwrap();

        assert_eq!(out.issues.len(), 3);
        assert_eq!(out.issues[0].key(), Some("AB-1"));
        assert_eq!(out.issues[0].self_link.as_deref(), Some("https://x/rest/1"));
        assert_eq!(out.issues[0].description(), Some("hello"));
        assert_eq!(out.issues[0].field_str("priority"), None);
        assert_eq!(out.issues[1].key(), None);
        assert!(out.issues[1].fields.is_empty());
        assert_eq!(out.issues[2].id(), None);
    }

    #[test]
    fn accepts_capitalised_field_names() {
        let out: ListReturns = serde_json::from_value(json!({
            "Issues": [{ "ID": "9", "Key": "ZZ-9", "Self": "s", "Fields": {} }]
        }))
        .unwrap();
        assert_eq!(out.issues[0].id(), Some("9"));
        assert_eq!(out.issues[0].key(), Some("ZZ-9"));
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let issue = Issue {
            key: Some(String::new()),
            ..Issue::default()
        };
        assert_eq!(issue.key(), None);
    }

    #[test]
    fn wrong_shape_fails_to_decode() {
        assert!(serde_json::from_str::<ListReturns>("[1, 2]").is_err());
        assert!(serde_json::from_str::<ListReturns>(r#"{"issues": "nope"}"#).is_err());
    }

    #[test]
    fn browse_url_is_verbatim() {
        assert_eq!(browse_url("https://x.atlassian.net", "AB-1"), "https://x.atlassian.net/browse/AB-1");
    }
}
