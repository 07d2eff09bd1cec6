use crate::api::ApiError;
use crate::menu::filter::MENU_CATEGORIES;
use crate::models::MenuItem;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum FormError {
    #[error("Name is required")]
    MissingName,
    #[error("Price must be a number")]
    InvalidPrice,
    #[error("Price cannot be negative")]
    NegativePrice,
    #[error("Category is required")]
    MissingCategory,
}

/// Editable fields of the item editor, kept as typed text until submit.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ItemForm {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image_url: String,
}

impl Default for ItemForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: MENU_CATEGORIES[1].to_string(),
            image_url: String::new(),
        }
    }
}

impl ItemForm {
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            category: item.category.clone(),
            image_url: item.image_url.clone().unwrap_or_default(),
        }
    }

    pub fn title(&self) -> &'static str {
        if self.id.is_some() {
            "Edit Menu Item"
        } else {
            "Add Menu Item"
        }
    }

    /// Validates the fields and builds the JSON payload for create/update.
    pub fn to_payload(&self) -> Result<MenuItem, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or(FormError::InvalidPrice)?;
        if price < 0.0 {
            return Err(FormError::NegativePrice);
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(FormError::MissingCategory);
        }

        let image_url = self.image_url.trim();

        Ok(MenuItem {
            id: self.id,
            name: name.to_string(),
            description: self.description.trim().to_string(),
            price,
            category: category.to_string(),
            image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
        })
    }
}

/// A failed upload keeps the previous image instead of aborting the save.
pub(crate) fn image_after_upload(
    previous: Option<String>,
    upload: Result<String, ApiError>,
) -> Option<String> {
    match upload {
        Ok(url) if !url.trim().is_empty() => Some(url.trim().to_string()),
        _ => previous,
    }
}
