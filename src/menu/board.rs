use crate::menu::filter::{apply_filter, FilterState};
use crate::models::MenuItem;

/// Cached menu for the dashboard plus the UI-only filter state.
///
/// Every fetch takes a sequence number from [`MenuBoard::begin_fetch`]. A response is
/// applied only when it is newer than the last applied one, so a slow search that
/// resolves after a faster, later one cannot overwrite the grid.
#[derive(Clone, Debug, Default)]
pub(crate) struct MenuBoard {
    items: Vec<MenuItem>,
    filter: FilterState,
    issued_seq: u64,
    applied_seq: u64,
}

impl MenuBoard {
    #[cfg(test)]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn search_text(&self) -> &str {
        &self.filter.search_text
    }

    pub fn begin_fetch(&mut self, search: &str) -> u64 {
        self.filter.search_text = search.to_string();
        self.issued_seq = self.issued_seq.saturating_add(1);
        self.issued_seq
    }

    /// Replaces the cached items wholesale. Returns `false` for a stale response.
    pub fn accept(&mut self, seq: u64, items: Vec<MenuItem>) -> bool {
        if seq <= self.applied_seq {
            return false;
        }
        self.applied_seq = seq;
        self.items = items;
        true
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.issued_seq
    }

    pub fn set_category(&mut self, category: &str) {
        self.filter.category = category.to_string();
    }

    pub fn visible(&self) -> Vec<MenuItem> {
        apply_filter(&self.items, &self.filter)
    }

    pub fn find(&self, id: i64) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, category: &str) -> MenuItem {
        MenuItem {
            id: Some(id),
            name: format!("item-{id}"),
            description: String::new(),
            price: 2.0,
            category: category.to_string(),
            image_url: None,
        }
    }

    fn ids(items: &[MenuItem]) -> Vec<i64> {
        items.iter().filter_map(|i| i.id).collect()
    }

    #[test]
    fn test_accept_replaces_items_wholesale() {
        let mut board = MenuBoard::default();
        let seq = board.begin_fetch("");
        assert!(board.accept(seq, vec![item(1, "Desserts"), item(2, "Beverages")]));

        let seq = board.begin_fetch("");
        assert!(board.accept(seq, vec![item(3, "Desserts")]));
        assert_eq!(ids(board.items()), vec![3]);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut board = MenuBoard::default();
        let slow = board.begin_fetch("p");
        let fast = board.begin_fetch("pizza");

        assert!(board.accept(fast, vec![item(2, "Main Course")]));
        assert!(!board.accept(slow, vec![item(1, "Main Course"), item(9, "Desserts")]));
        assert_eq!(ids(board.items()), vec![2]);
        assert_eq!(board.search_text(), "pizza");
    }

    #[test]
    fn test_in_order_responses_are_both_applied() {
        let mut board = MenuBoard::default();
        let first = board.begin_fetch("p");
        let second = board.begin_fetch("pi");

        assert!(board.accept(first, vec![item(1, "Desserts")]));
        assert!(board.accept(second, vec![item(2, "Desserts")]));
        assert_eq!(ids(board.items()), vec![2]);
    }

    #[test]
    fn test_duplicate_response_is_ignored() {
        let mut board = MenuBoard::default();
        let seq = board.begin_fetch("");
        assert!(board.accept(seq, vec![item(1, "Desserts")]));
        assert!(!board.accept(seq, vec![]));
        assert_eq!(ids(board.items()), vec![1]);
    }

    #[test]
    fn test_is_latest_tracks_issued_sequence() {
        let mut board = MenuBoard::default();
        let a = board.begin_fetch("");
        assert!(board.is_latest(a));
        let b = board.begin_fetch("x");
        assert!(!board.is_latest(a));
        assert!(board.is_latest(b));
    }

    #[test]
    fn test_category_change_refilters_cached_items() {
        let mut board = MenuBoard::default();
        let seq = board.begin_fetch("");
        board.accept(
            seq,
            vec![item(1, "Desserts"), item(2, "Beverages"), item(3, "Desserts")],
        );

        board.set_category("Desserts");
        assert_eq!(ids(&board.visible()), vec![1, 3]);

        board.set_category("All");
        assert_eq!(ids(&board.visible()), vec![1, 2, 3]);
    }

    #[test]
    fn test_category_survives_refetch() {
        let mut board = MenuBoard::default();
        board.set_category("Beverages");
        let seq = board.begin_fetch("tea");
        board.accept(seq, vec![item(1, "Desserts"), item(2, "Beverages")]);
        assert_eq!(ids(&board.visible()), vec![2]);
    }

    #[test]
    fn test_find_by_id() {
        let mut board = MenuBoard::default();
        let seq = board.begin_fetch("");
        board.accept(seq, vec![item(4, "Desserts")]);
        assert_eq!(board.find(4).map(|i| i.name.as_str()), Some("item-4"));
        assert!(board.find(5).is_none());
    }
}
