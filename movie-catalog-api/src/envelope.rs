/* This file is part of the Movie Catalog project - https://github.com/movie-catalog/movie-catalog
*
*  Copyright (C) 2025 Movie Catalog contributors
*
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

//! Detection of the different response envelopes used by the server.
//!
//! Lists come as `{"items": [...]}`, `{"data": [...]}`, `{"data": {"items": [...]}}`
//! or as bare arrays. Single objects come bare or wrapped in `data`/`item`/`movie`.

use serde_json::Value;

use crate::types::{Page, Pagination};

const LIST_KEYS: &[&str] = &["items", "data", "results", "movies"];
const OBJECT_KEYS: &[&str] = &["data", "item", "movie"];

/// Extracts the list of entries from a list response
///
/// Unknown shapes yield an empty slice
pub fn unwrap_list(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        Value::Object(map) => LIST_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .map(unwrap_list)
            .find(|items| !items.is_empty())
            .unwrap_or(&[]),
        _ => &[],
    }
}

/// Extracts a single entity from an object response
pub fn unwrap_object(value: &Value) -> &Value {
    let Value::Object(map) = value else {
        return value;
    };
    OBJECT_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|inner| inner.is_object())
        .map_or(value, unwrap_object)
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn pagination_from(map: &serde_json::Map<String, Value>) -> Option<Pagination> {
    let pick = |keys: &[&str]| keys.iter().find_map(|key| map.get(*key).and_then(as_u64));
    let total_items = pick(&["totalItems", "total_items", "total"]);
    let total_pages = pick(&["totalPages", "total_pages", "pages"]);
    let current_page = pick(&["currentPage", "current_page", "page"]);
    let per_page = pick(&["totalItemsPerPage", "per_page", "perPage", "limit"]);
    if total_items.is_none() && total_pages.is_none() {
        return None;
    }
    let per_page = per_page.unwrap_or(0);
    let total_items = total_items.unwrap_or(0);
    Some(Pagination {
        total_items,
        total_pages: total_pages.unwrap_or_else(|| if per_page == 0 { 1 } else { total_items.div_ceil(per_page) }),
        current_page: current_page.unwrap_or(1),
        per_page,
    })
}

/// Looks for pagination info in the places the server is known to put it
pub fn pagination(value: &Value) -> Option<Pagination> {
    let Value::Object(map) = value else {
        return None;
    };
    if let Some(Value::Object(inner)) = map.get("pagination") {
        if let Some(p) = pagination_from(inner) {
            return Some(p);
        }
    }
    if let Some(Value::Object(params)) = map.get("params") {
        if let Some(p) = pagination(&Value::Object(params.clone())) {
            return Some(p);
        }
    }
    if let Some(data @ Value::Object(_)) = map.get("data") {
        if let Some(p) = pagination(data) {
            return Some(p);
        }
    }
    pagination_from(map)
}

/// Unwraps a list response and converts every entry, dropping the ones that fail to convert
pub fn page_of<T, F>(value: &Value, convert: F) -> Page<T>
where
    F: Fn(&Value) -> Option<T>,
{
    Page {
        items: unwrap_list(value).iter().filter_map(convert).collect(),
        pagination: pagination(value),
    }
}

/// Pulls a human-readable message out of an error response body
pub fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => ["message", "error", "detail", "msg"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(error_message),
        Value::Array(items) => items.iter().find_map(error_message),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn list_envelopes() {
        let bare = json!([{"id": 1}, {"id": 2}]);
        let items = json!({"items": [{"id": 1}]});
        let data = json!({"status": true, "data": [{"id": 1}, {"id": 2}, {"id": 3}]});
        let nested = json!({"data": {"items": [{"id": 1}], "params": {}}});
        assert_eq!(unwrap_list(&bare).len(), 2);
        assert_eq!(unwrap_list(&items).len(), 1);
        assert_eq!(unwrap_list(&data).len(), 3);
        assert_eq!(unwrap_list(&nested).len(), 1);
        assert!(unwrap_list(&json!({"message": "nope"})).is_empty());
        assert!(unwrap_list(&json!(null)).is_empty());
    }

    #[test]
    fn object_envelopes() {
        let bare = json!({"name": "Heat"});
        assert_eq!(unwrap_object(&bare)["name"], "Heat");
        let wrapped = json!({"status": "success", "data": {"name": "Heat"}});
        assert_eq!(unwrap_object(&wrapped)["name"], "Heat");
        let movie = json!({"status": true, "movie": {"name": "Heat"}, "episodes": []});
        assert_eq!(unwrap_object(&movie)["name"], "Heat");
        let double = json!({"data": {"item": {"name": "Heat"}}});
        assert_eq!(unwrap_object(&double)["name"], "Heat");
    }

    #[test]
    fn pagination_locations() {
        let top = json!({"items": [], "pagination": {"totalItems": 50, "totalItemsPerPage": 24, "currentPage": 2}});
        assert_eq!(
            pagination(&top),
            Some(Pagination { total_items: 50, total_pages: 3, current_page: 2, per_page: 24 })
        );
        let nested = json!({"data": {"items": [], "params": {"pagination": {"totalItems": "10", "totalPages": 1}}}});
        assert_eq!(pagination(&nested).map(|p| p.total_pages), Some(1));
        assert_eq!(pagination(&json!([1, 2])), None);
    }

    #[test]
    fn error_messages() {
        assert_eq!(error_message(&json!({"message": "Invalid credentials"})).as_deref(), Some("Invalid credentials"));
        assert_eq!(error_message(&json!({"error": {"message": "Token expired"}})).as_deref(), Some("Token expired"));
        assert_eq!(error_message(&json!({"errors": []})), None);
        assert_eq!(error_message(&json!({"message": ""})), None);
    }
}
