use serde::{Deserialize, Deserializer, Serialize};

/// A single dish as stored by the menu backend.
///
/// `id` is assigned by the server and is absent until the item is persisted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MenuItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,

    /// Either an absolute URL or a path relative to the backend origin.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// The signed-in user. Exactly one per browser profile.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Session {
    pub token: String,
    pub username: String,
}

// The backend serializes unset columns as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_contract_deserialize() {
        let json = r#"{
            "id": 5,
            "name": "Pad Thai",
            "description": "Rice noodles",
            "price": 12.5,
            "category": "Main Course",
            "imageUrl": "/uploads/abc_pad.jpg"
        }"#;
        let item: MenuItem = serde_json::from_str(json).expect("menu item should parse");
        assert_eq!(item.id, Some(5));
        assert_eq!(item.category, "Main Course");
        assert_eq!(item.image_url.as_deref(), Some("/uploads/abc_pad.jpg"));
    }

    #[test]
    fn test_menu_item_tolerates_null_columns() {
        let json = r#"{"id": 1, "name": "Tea", "description": null, "price": 2, "category": null, "imageUrl": null}"#;
        let item: MenuItem = serde_json::from_str(json).expect("nulls should map to defaults");
        assert_eq!(item.description, "");
        assert_eq!(item.category, "");
        assert!(item.image_url.is_none());
    }

    #[test]
    fn test_menu_item_without_id_omits_id_key() {
        let item = MenuItem {
            id: None,
            name: "Soup".to_string(),
            description: String::new(),
            price: 4.0,
            category: "Appetizers".to_string(),
            image_url: None,
        };
        let v = serde_json::to_value(&item).expect("should serialize");
        assert!(v.get("id").is_none());
        assert_eq!(v["imageUrl"], serde_json::Value::Null);
        assert_eq!(v["category"], "Appetizers");
    }
}
