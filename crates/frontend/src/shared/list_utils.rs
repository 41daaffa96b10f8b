/// Generic list helpers (search, sort) and the debounced search box
use crate::shared::config::{SEARCH_DEBOUNCE_MS, SEARCH_MIN_CHARS};
use crate::shared::utils::Debouncer;
use leptos::prelude::*;
use std::cmp::Ordering;

/// Types that can be matched against a free-text search
pub trait Searchable {
    /// Whether the item matches the (already lowercased) query
    fn matches_filter(&self, filter_lower: &str) -> bool;
}

/// Types that can be sorted by a named column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Whether a query is long enough to be applied
pub fn is_active_filter(filter: &str) -> bool {
    filter.trim().chars().count() >= SEARCH_MIN_CHARS
}

/// Sorts a list by the given field
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Filters a list by a search query; short queries return the list unchanged
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if !is_active_filter(filter) {
        return items;
    }
    let filter_lower = filter.trim().to_lowercase();
    items
        .into_iter()
        .filter(|item| item.matches_filter(&filter_lower))
        .collect()
}

/// Sort indicator shown next to a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Search box that reports its value after a pause in typing
#[component]
pub fn SearchInput(
    /// Called with the debounced value
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
    /// Owned by the caller when it needs to reset the box
    #[prop(optional)]
    value: Option<RwSignal<String>>,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        format!("Pesquisar (mín. {} caracteres)...", SEARCH_MIN_CHARS)
    } else {
        placeholder
    };

    let input_value = value.unwrap_or_else(|| RwSignal::new(String::new()));
    let debouncer = StoredValue::new_local(Debouncer::new(SEARCH_DEBOUNCE_MS));

    let handle_input = move |value: String| {
        input_value.set(value.clone());
        debouncer.update_value(|d| d.call(move || on_change.run(value)));
    };

    let clear = move |_| {
        debouncer.update_value(|d| d.cancel());
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class=move || {
                    if is_active_filter(&input_value.get()) {
                        "search-input__field search-input__field--active"
                    } else {
                        "search-input__field"
                    }
                }
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Limpar pesquisa">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: &'static str,
        value: i32,
    }

    impl Searchable for Item {
        fn matches_filter(&self, filter_lower: &str) -> bool {
            self.name.to_lowercase().contains(filter_lower)
        }
    }

    impl Sortable for Item {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "value" => self.value.cmp(&other.value),
                _ => self.name.cmp(other.name),
            }
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "Receita Corrente", value: 3 },
            Item { name: "Receita de Capital", value: 1 },
            Item { name: "Deduções", value: 2 },
        ]
    }

    #[test]
    fn test_filter_list_ignores_short_queries() {
        assert_eq!(filter_list(items(), "re").len(), 3);
        assert_eq!(filter_list(items(), "  ").len(), 3);
    }

    #[test]
    fn test_filter_list_case_insensitive() {
        let found = filter_list(items(), "RECEITA");
        assert_eq!(found.len(), 2);
        assert_eq!(filter_list(items(), "capital")[0].value, 1);
    }

    #[test]
    fn test_sort_list() {
        let mut list = items();
        sort_list(&mut list, "value", true);
        assert_eq!(list.iter().map(|i| i.value).collect::<Vec<_>>(), vec![1, 2, 3]);
        sort_list(&mut list, "value", false);
        assert_eq!(list[0].value, 3);
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("valor", "valor", true), " ▲");
        assert_eq!(get_sort_indicator("valor", "valor", false), " ▼");
        assert_eq!(get_sort_indicator("valor", "coug", true), " ⇅");
    }
}
