use crate::models::MenuItem;

pub(crate) const ALL_CATEGORIES: &str = "All";

/// Category tabs shown above the grid, in display order.
pub(crate) const MENU_CATEGORIES: [&str; 5] =
    ["All", "Appetizers", "Main Course", "Desserts", "Beverages"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FilterState {
    pub category: String,

    /// Text of the last issued search. Matching happens server-side.
    pub search_text: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search_text: String::new(),
        }
    }
}

impl FilterState {
    pub fn shows_all(&self) -> bool {
        self.category == ALL_CATEGORIES
    }
}

/// Visible subset of `items` for the active category tab, in fetch order.
pub(crate) fn apply_filter(items: &[MenuItem], filter: &FilterState) -> Vec<MenuItem> {
    if filter.shows_all() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| item.category == filter.category)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, category: &str) -> MenuItem {
        MenuItem {
            id: Some(id),
            name: format!("item-{id}"),
            description: String::new(),
            price: 1.0,
            category: category.to_string(),
            image_url: None,
        }
    }

    fn sample() -> Vec<MenuItem> {
        vec![
            item(3, "Desserts"),
            item(1, "Appetizers"),
            item(7, "Desserts"),
            item(2, "Beverages"),
            item(5, "Desserts"),
        ]
    }

    fn filter_for(category: &str) -> FilterState {
        FilterState {
            category: category.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_filter_is_all() {
        let f = FilterState::default();
        assert_eq!(f.category, "All");
        assert_eq!(f.search_text, "");
        assert!(f.shows_all());
    }

    #[test]
    fn test_all_returns_everything_in_order() {
        let items = sample();
        assert_eq!(apply_filter(&items, &FilterState::default()), items);
    }

    #[test]
    fn test_category_keeps_matching_items_in_order() {
        let items = sample();
        let ids: Vec<_> = apply_filter(&items, &filter_for("Desserts"))
            .into_iter()
            .filter_map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![3, 7, 5]);
    }

    #[test]
    fn test_every_present_category_partitions_the_set() {
        let items = sample();
        let mut total = 0;
        for category in &MENU_CATEGORIES[1..] {
            let visible = apply_filter(&items, &filter_for(category));
            assert!(visible.iter().all(|i| i.category == *category));
            total += visible.len();
        }
        assert_eq!(total, items.len());
    }

    #[test]
    fn test_category_match_is_exact() {
        let items = vec![item(1, "desserts"), item(2, "Desserts ")];
        assert!(apply_filter(&items, &filter_for("Desserts")).is_empty());
    }

    #[test]
    fn test_unknown_category_yields_empty() {
        assert!(apply_filter(&sample(), &filter_for("Specials")).is_empty());
    }
}
