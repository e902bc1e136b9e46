//! Selection sets and the guards that decide when a multi-select may be
//! cleared.

use serde::{Deserialize, Serialize};

/// Maximum number of SKUs a widget may select at once.
pub const MAX_SKU_SELECTION: usize = 4;

/// One entry of a select input. Option lists use the raw identifier as both
/// value and label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Ordered identifiers selected for one filter dimension.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet(Vec<String>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(value: impl Into<String>) -> Self {
        Self(vec![value.into()])
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|selected| selected == value)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Replace the whole selection, dropping repeated identifiers.
    pub fn replace(&mut self, values: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        self.0 = unique;
    }

    pub fn retain(&mut self, keep: impl FnMut(&String) -> bool) {
        self.0.retain(keep);
    }

    pub fn to_options(&self) -> Vec<SelectOption> {
        self.0.iter().map(SelectOption::new).collect()
    }
}

impl From<Vec<String>> for SelectionSet {
    fn from(values: Vec<String>) -> Self {
        let mut set = Self::new();
        set.replace(values);
        set
    }
}

/// Whether the input may offer removing the last remaining item.
pub fn is_clearable(selected: &[String], allow_clear_all: bool) -> bool {
    allow_clear_all || selected.len() > 1
}

/// Whether `option` must be disabled because the selection reached `cap`.
pub fn is_option_disabled(selected: &[String], option: &str, cap: usize) -> bool {
    selected.len() >= cap && !selected.iter().any(|value| value == option)
}

/// Decide the next selection for a multi-select change event.
///
/// `change` is `None` (or empty) when the user cleared the input. Returns
/// `None` when the selection must stay as it is.
pub fn resolve_deletion(
    selected: &[String],
    change: Option<&[SelectOption]>,
    allow_clear_all: bool,
) -> Option<Vec<String>> {
    let options = match change {
        Some(options) if !options.is_empty() => options,
        _ => return allow_clear_all.then(Vec::new),
    };

    if options.iter().all(|option| option.value.trim().is_empty()) {
        if allow_clear_all {
            return Some(Vec::new());
        }
        // Undo the clear attempt by restoring the first previous value.
        return selected.first().map(|first| vec![first.clone()]);
    }

    Some(options.iter().map(|option| option.value.clone()).collect())
}

/// Build the change handler for a multi-select input.
///
/// The handler forwards the resolved selection to `set_selected` and refuses
/// to clear the last item unless `allow_clear_all` is set.
pub fn prevent_deletion<'a, F>(
    selected: &'a [String],
    mut set_selected: F,
    allow_clear_all: bool,
) -> impl FnMut(Option<&[SelectOption]>) + 'a
where
    F: FnMut(Vec<String>) + 'a,
{
    move |change| {
        if let Some(next) = resolve_deletion(selected, change, allow_clear_all) {
            set_selected(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn options(values: &[&str]) -> Vec<SelectOption> {
        values.iter().map(|value| SelectOption::new(*value)).collect()
    }

    #[test]
    fn clearable_truth_table() {
        for size in 0..6 {
            let selected = (0..size).map(|i| format!("SKU-{i}")).collect::<Vec<_>>();
            assert!(is_clearable(&selected, true));
            assert_eq!(is_clearable(&selected, false), size > 1, "size {size}");
        }
    }

    #[test]
    fn empty_change_keeps_sole_item() {
        let selected = strings(&["X"]);
        let mut result = None;
        prevent_deletion(&selected, |next| result = Some(next), false)(None);
        assert_eq!(result, None);

        let mut result = None;
        prevent_deletion(&selected, |next| result = Some(next), false)(Some(&[]));
        assert_eq!(result, None);
    }

    #[test]
    fn empty_change_clears_when_allowed() {
        let selected = strings(&["X"]);
        let mut result = None;
        prevent_deletion(&selected, |next| result = Some(next), true)(None);
        assert_eq!(result, Some(Vec::new()));
    }

    #[test]
    fn empty_change_with_many_items_is_refused() {
        let selected = strings(&["X", "Y"]);
        assert_eq!(resolve_deletion(&selected, None, false), None);
    }

    #[test]
    fn blank_values_restore_first_previous() {
        let selected = strings(&["X", "Y"]);
        let change = options(&["", "  "]);
        assert_eq!(
            resolve_deletion(&selected, Some(&change), false),
            Some(strings(&["X"]))
        );
        assert_eq!(
            resolve_deletion(&selected, Some(&change), true),
            Some(Vec::new())
        );
    }

    #[test]
    fn mixed_blank_values_pass_through() {
        let selected = strings(&["X"]);
        let change = options(&["", "S1"]);
        assert_eq!(
            resolve_deletion(&selected, Some(&change), false),
            Some(strings(&["", "S1"]))
        );
    }

    #[test]
    fn change_replaces_in_order() {
        let selected = strings(&["A"]);
        let change = options(&["C", "A", "B"]);
        assert_eq!(
            resolve_deletion(&selected, Some(&change), false),
            Some(strings(&["C", "A", "B"]))
        );
    }

    #[test]
    fn options_disabled_at_cap_unless_selected() {
        let selected = strings(&["A", "B", "C", "D"]);
        assert!(is_option_disabled(&selected, "E", MAX_SKU_SELECTION));
        assert!(!is_option_disabled(&selected, "B", MAX_SKU_SELECTION));
        assert!(!is_option_disabled(&selected[..3], "E", MAX_SKU_SELECTION));
    }

    #[test]
    fn selection_set_drops_duplicates() {
        let set = SelectionSet::from(strings(&["A", "B", "A"]));
        assert_eq!(set.values(), strings(&["A", "B"]).as_slice());
        assert_eq!(set.first(), Some("A"));
    }
}
