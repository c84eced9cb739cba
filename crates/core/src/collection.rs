//! Endpoint collection model and validated import/export.
//!
//! Two wire shapes are accepted: the native format (a `Collection` as
//! serialized below) and Postman v2.1 exports, whose folders are flattened
//! into `folder/name` endpoint names. Parsing never panics; every rejection
//! is an enumerated [`CollectionError`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "DELETE")]
    Delete,
    #[serde(rename = "PATCH")]
    Patch,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Methods that carry the endpoint body on the wire.
    pub fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            "PATCH" => Some(Self::Patch),
            _ => None,
        }
    }
}

/// One endpoint to test: one room in the mansion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub name: String,
    pub method: HttpMethod,
    /// URL template; `{{var}}` placeholders are substituted by the gateway.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthConfig {
    None,
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        password: String,
    },
    #[serde(rename = "apikey")]
    ApiKey {
        #[serde(rename = "apiKey")]
        api_key: String,
        #[serde(rename = "apiKeyHeader")]
        header: String,
    },
}

/// Ordered endpoints plus the shared auth and variable substitutions every
/// gateway call references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    #[serde(rename = "baseUrl", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub endpoints: Vec<Endpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("collection is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("JSON matches neither the native collection format nor Postman v2.1")]
    UnrecognizedFormat,
    #[error("collection '{name}' has no endpoints")]
    NoEndpoints { name: String },
}

/// Parse either supported format, rejecting anything that could not seed a
/// playable mansion.
pub fn parse_collection(raw: &str) -> Result<Collection, CollectionError> {
    let value: Value = serde_json::from_str(raw)?;

    let collection = if value.get("info").is_some() && value.get("item").is_some() {
        parse_postman(&value)?
    } else if value.get("endpoints").is_some() {
        serde_json::from_value(value)?
    } else {
        return Err(CollectionError::UnrecognizedFormat);
    };

    if collection.endpoints.is_empty() {
        return Err(CollectionError::NoEndpoints { name: collection.name });
    }
    Ok(collection)
}

pub fn export_collection(collection: &Collection) -> serde_json::Result<String> {
    serde_json::to_string_pretty(collection)
}

fn parse_postman(value: &Value) -> Result<Collection, CollectionError> {
    let name = value["info"]["name"].as_str().unwrap_or("Imported collection").to_string();
    let items = value["item"].as_array().ok_or(CollectionError::UnrecognizedFormat)?;

    let mut endpoints = Vec::new();
    collect_postman_items(items, "", &mut endpoints);

    Ok(Collection { name, base_url: None, endpoints, auth: None, variables: None })
}

fn collect_postman_items(items: &[Value], prefix: &str, out: &mut Vec<Endpoint>) {
    for item in items {
        let item_name = item["name"].as_str().unwrap_or("unnamed");
        if let Some(children) = item["item"].as_array() {
            collect_postman_items(children, &format!("{prefix}{item_name}/"), out);
            continue;
        }
        let Some(request) = item.get("request") else { continue };

        let method =
            request["method"].as_str().and_then(HttpMethod::parse).unwrap_or(HttpMethod::Get);
        let url = match &request["url"] {
            Value::String(raw) => raw.clone(),
            other => other["raw"].as_str().unwrap_or_default().to_string(),
        };
        let headers = request["header"].as_array().map(|entries| {
            entries
                .iter()
                .filter_map(|h| {
                    Some((h["key"].as_str()?.to_string(), h["value"].as_str()?.to_string()))
                })
                .collect::<BTreeMap<_, _>>()
        });
        // Postman items often lack ids; synthesize stable ones from position.
        let id = item["id"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| format!("ep-{}", out.len() + 1));

        out.push(Endpoint {
            id,
            name: format!("{prefix}{item_name}"),
            method,
            url,
            headers,
            body: request["body"]["raw"].as_str().map(str::to_string),
            description: item["description"].as_str().map(str::to_string),
        });
    }
}

/// Built-in collection used when the player starts without importing one.
pub fn sample_collection() -> Collection {
    let endpoints = vec![
        Endpoint {
            id: "1".to_string(),
            name: "Get Users".to_string(),
            method: HttpMethod::Get,
            url: "https://jsonplaceholder.typicode.com/users".to_string(),
            headers: None,
            body: None,
            description: Some("Fetch all users from the haunted database".to_string()),
        },
        Endpoint {
            id: "2".to_string(),
            name: "Get User by ID".to_string(),
            method: HttpMethod::Get,
            url: "https://jsonplaceholder.typicode.com/users/1".to_string(),
            headers: None,
            body: None,
            description: Some("Summon a specific user spirit".to_string()),
        },
        Endpoint {
            id: "3".to_string(),
            name: "Create Post".to_string(),
            method: HttpMethod::Post,
            url: "https://jsonplaceholder.typicode.com/posts".to_string(),
            headers: None,
            body: Some(
                "{\n  \"title\": \"Haunted Message\",\n  \"body\": \"From beyond the grave...\",\n  \"userId\": 1\n}"
                    .to_string(),
            ),
            description: Some("Send a message to the spirit realm".to_string()),
        },
        Endpoint {
            id: "4".to_string(),
            name: "Get Posts".to_string(),
            method: HttpMethod::Get,
            url: "https://jsonplaceholder.typicode.com/posts".to_string(),
            headers: None,
            body: None,
            description: Some("Read messages from the dead".to_string()),
        },
        Endpoint {
            id: "5".to_string(),
            name: "Trigger 404".to_string(),
            method: HttpMethod::Get,
            url: "https://jsonplaceholder.typicode.com/nonexistent".to_string(),
            headers: None,
            body: None,
            description: Some("Summon the 404 Ghost".to_string()),
        },
    ];

    Collection {
        name: "Sample Haunted APIs".to_string(),
        base_url: Some("https://jsonplaceholder.typicode.com".to_string()),
        endpoints,
        auth: None,
        variables: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_native_format() {
        let raw = r#"{
            "name": "Native",
            "endpoints": [
                {"id": "a", "name": "First", "method": "GET", "url": "https://example.com/{{path}}"}
            ],
            "auth": {"type": "bearer", "token": "t0ken"},
            "variables": {"path": "users"}
        }"#;
        let collection = parse_collection(raw).expect("native format should parse");
        assert_eq!(collection.name, "Native");
        assert_eq!(collection.endpoints.len(), 1);
        assert_eq!(collection.endpoints[0].method, HttpMethod::Get);
        assert_eq!(collection.auth, Some(AuthConfig::Bearer { token: "t0ken".to_string() }));
        assert_eq!(
            collection.variables.as_ref().and_then(|vars| vars.get("path")).map(String::as_str),
            Some("users")
        );
    }

    #[test]
    fn parses_postman_format_and_flattens_folders() {
        let raw = r#"{
            "info": {"name": "PM"},
            "item": [
                {"name": "Folder", "item": [
                    {"name": "Inner", "request": {"method": "post", "url": {"raw": "https://example.com/x"}, "body": {"raw": "{}"}}}
                ]},
                {"name": "Top", "request": {"method": "GET", "url": "https://example.com/y",
                    "header": [{"key": "X-Probe", "value": "1"}]}}
            ]
        }"#;
        let collection = parse_collection(raw).expect("postman format should parse");
        assert_eq!(collection.name, "PM");
        assert_eq!(collection.endpoints.len(), 2);
        assert_eq!(collection.endpoints[0].name, "Folder/Inner");
        assert_eq!(collection.endpoints[0].method, HttpMethod::Post);
        assert_eq!(collection.endpoints[0].body.as_deref(), Some("{}"));
        assert_eq!(collection.endpoints[1].url, "https://example.com/y");
        assert_eq!(
            collection.endpoints[1]
                .headers
                .as_ref()
                .and_then(|headers| headers.get("X-Probe"))
                .map(String::as_str),
            Some("1")
        );
    }

    #[test]
    fn postman_items_without_ids_get_stable_positional_ids() {
        let raw = r#"{
            "info": {"name": "PM"},
            "item": [
                {"name": "A", "request": {"method": "GET", "url": "https://example.com/a"}},
                {"name": "B", "request": {"method": "GET", "url": "https://example.com/b"}}
            ]
        }"#;
        let first = parse_collection(raw).expect("parse");
        let second = parse_collection(raw).expect("parse again");
        assert_eq!(first.endpoints[0].id, "ep-1");
        assert_eq!(first.endpoints[1].id, "ep-2");
        assert_eq!(first, second, "synthesized ids must be deterministic");
    }

    #[test]
    fn rejects_invalid_json() {
        let err = parse_collection("not json").expect_err("garbage should be rejected");
        assert!(matches!(err, CollectionError::InvalidJson(_)));
    }

    #[test]
    fn rejects_unrecognized_shape() {
        let err = parse_collection(r#"{"rooms": []}"#).expect_err("unknown shape");
        assert!(matches!(err, CollectionError::UnrecognizedFormat));
    }

    #[test]
    fn rejects_empty_endpoint_list() {
        let err = parse_collection(r#"{"name": "Empty", "endpoints": []}"#)
            .expect_err("empty collections cannot seed a mansion");
        assert!(matches!(err, CollectionError::NoEndpoints { name } if name == "Empty"));
    }

    #[test]
    fn export_round_trips_through_parse() {
        let original = sample_collection();
        let raw = export_collection(&original).expect("export");
        let parsed = parse_collection(&raw).expect("reimport");
        assert_eq!(parsed, original);
    }

    #[test]
    fn body_methods_are_exactly_post_put_patch() {
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(HttpMethod::Patch.has_body());
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
    }
}
