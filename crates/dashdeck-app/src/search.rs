//! Dashboard search bar: results grouped by category.

use dashdeck_core::{Category, Storage, Widget, WidgetStore};
use std::collections::HashSet;

/// Search hits belonging to one category.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchGroup<'s> {
    pub category: &'s Category,
    /// Hits in the order the search returned them.
    pub widgets: Vec<&'s Widget>,
}

/// Run a search and group the hits by category.
///
/// Groups follow category order; categories without hits are left out. A
/// widget in several categories shows up in each of them. A blank query
/// yields no groups, since the dashboard then shows its normal view.
pub fn group_by_category<'s, S: Storage>(store: &'s WidgetStore<S>, query: &str) -> Vec<SearchGroup<'s>> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let results = store.search_widgets(query);
    store
        .categories()
        .iter()
        .filter_map(|category| {
            let members: HashSet<&str> = category.widget_ids.iter().map(String::as_str).collect();
            let widgets: Vec<&Widget> = results
                .iter()
                .copied()
                .filter(|w| members.contains(w.id.as_str()))
                .collect();
            (!widgets.is_empty()).then_some(SearchGroup { category, widgets })
        })
        .collect()
}
