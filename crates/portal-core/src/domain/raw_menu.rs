//! Conversion of server-provided menu trees.
//!
//! The backend sends `{ id, name, icon, link, children }` with numeric ids.
//! Trees echoed back from saved preferences use the converted field names,
//! so `title` and `route` are accepted as well.

use serde::Deserialize;
use serde_json::Value;

use super::ids::string_or_number;
use super::menu_node::MenuNode;
use crate::error::DomainError;
use portal_shared::constants::DEFAULT_MENU_ICON;
use portal_shared::utils::trim_trailing_slash;

#[derive(Debug, Deserialize)]
struct RawMenuNode {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(alias = "title")]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default, alias = "route")]
    link: Option<String>,
    #[serde(default)]
    children: Option<Vec<RawMenuNode>>,
}

impl From<RawMenuNode> for MenuNode {
    fn from(raw: RawMenuNode) -> Self {
        // "" and "#" are placeholders for group nodes without a page
        let route = raw
            .link
            .map(|l| trim_trailing_slash(l.trim()).to_string())
            .filter(|l| !l.is_empty() && l != "#");

        MenuNode {
            id: raw.id,
            title: raw.name,
            description: raw.description.filter(|d| !d.is_empty()),
            icon: raw
                .icon
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| DEFAULT_MENU_ICON.to_string()),
            route,
            children: raw.children.unwrap_or_default().into_iter().map(MenuNode::from).collect(),
        }
    }
}

/// Shape check on an untyped tree.
///
/// Every node must be an object with a string or number `id`, a string
/// `title`/`name`, an optional string `route`/`link`, and an optional array
/// `children`.
pub fn check_raw_shape(value: &Value) -> Result<(), DomainError> {
    let nodes = value
        .as_array()
        .ok_or_else(|| DomainError::MalformedMenu("menu tree is not an array".into()))?;
    check_nodes(nodes, "menus")
}

fn check_nodes(nodes: &[Value], path: &str) -> Result<(), DomainError> {
    for (index, node) in nodes.iter().enumerate() {
        let here = format!("{}[{}]", path, index);
        let object = node
            .as_object()
            .ok_or_else(|| DomainError::MalformedMenu(format!("{}: not an object", here)))?;

        match object.get("id") {
            Some(Value::String(_)) | Some(Value::Number(_)) => {}
            _ => return Err(DomainError::MalformedMenu(format!("{}: id must be a string or number", here))),
        }

        if !matches!(object.get("title").or_else(|| object.get("name")), Some(Value::String(_))) {
            return Err(DomainError::MalformedMenu(format!("{}: missing string title", here)));
        }

        for key in ["route", "link"] {
            if !matches!(object.get(key), None | Some(Value::Null) | Some(Value::String(_))) {
                return Err(DomainError::MalformedMenu(format!("{}: {} must be a string", here, key)));
            }
        }

        match object.get("children") {
            None | Some(Value::Null) => {}
            Some(Value::Array(children)) => check_nodes(children, &format!("{}.children", here))?,
            Some(_) => return Err(DomainError::MalformedMenu(format!("{}: children must be an array", here))),
        }
    }
    Ok(())
}

/// Shape-checks and converts a raw tree into `MenuNode`s.
pub fn convert_raw_menus(value: &Value) -> Result<Vec<MenuNode>, DomainError> {
    check_raw_shape(value)?;
    let raw: Vec<RawMenuNode> = serde_json::from_value(value.clone())?;
    Ok(raw.into_iter().map(MenuNode::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_server_shape() {
        let raw = json!([
            { "id": 1, "name": "Home", "icon": "home", "link": "/dashboard" },
            { "id": 10, "name": "Configuration", "icon": "settings", "link": "#", "children": [
                { "id": 2, "name": "Users", "icon": "people", "link": "/configuration/users" }
            ]}
        ]);

        let menus = convert_raw_menus(&raw).unwrap();
        assert_eq!(menus.len(), 2);
        assert_eq!(menus[0].id, "1");
        assert_eq!(menus[0].title, "Home");
        assert_eq!(menus[0].route.as_deref(), Some("/dashboard"));
        assert_eq!(menus[1].route, None);
        assert_eq!(menus[1].children[0].id, "2");
        assert_eq!(menus[1].children[0].route.as_deref(), Some("/configuration/users"));
    }

    #[test]
    fn test_convert_round_trips_converted_shape() {
        let raw = json!([{ "id": "2", "title": "Users", "route": "/configuration/users" }]);
        let menus = convert_raw_menus(&raw).unwrap();
        assert_eq!(menus[0].title, "Users");
        assert_eq!(menus[0].icon, "circle");
    }

    #[test]
    fn test_routes_lose_trailing_slash() {
        let raw = json!([
            { "id": 1, "name": "Reports", "link": "/reports/" },
            { "id": 2, "name": "Root", "link": "/" }
        ]);
        let menus = convert_raw_menus(&raw).unwrap();
        assert_eq!(menus[0].route.as_deref(), Some("/reports"));
        assert_eq!(menus[1].route.as_deref(), Some("/"));
    }

    #[test]
    fn test_shape_check_rejects_bad_nodes() {
        assert!(check_raw_shape(&json!({ "id": 1 })).is_err());
        assert!(check_raw_shape(&json!([{ "id": true, "name": "x" }])).is_err());
        assert!(check_raw_shape(&json!([{ "id": 1 }])).is_err());
        assert!(check_raw_shape(&json!([{ "id": 1, "name": "x", "link": 5 }])).is_err());
        assert!(check_raw_shape(&json!([{ "id": 1, "name": "x", "children": {} }])).is_err());
    }

    #[test]
    fn test_shape_check_reports_nested_path() {
        let raw = json!([{ "id": 1, "name": "x", "children": [{ "id": 2 }] }]);
        let err = check_raw_shape(&raw).unwrap_err().to_string();
        assert!(err.contains("menus[0].children[0]"), "{}", err);
    }

    #[test]
    fn test_null_children_and_links_are_absent() {
        let raw = json!([{ "id": 1, "name": "x", "link": null, "children": null }]);
        let menus = convert_raw_menus(&raw).unwrap();
        assert!(menus[0].route.is_none());
        assert!(menus[0].children.is_empty());
    }
}
