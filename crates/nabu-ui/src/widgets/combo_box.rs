/// A drop-down list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComboBox {
    pub items: Vec<String>,
    pub selected: Option<usize>,
    pub on_change: Option<String>,
}

impl ComboBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Select by index; anything outside the item range clears the
    /// selection, matching native list controls.
    pub fn select(&mut self, index: i32) {
        self.selected = usize::try_from(index).ok().filter(|&i| i < self.items.len());
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected.map(|i| self.items[i].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_selection_clears() {
        let mut combo = ComboBox::new();
        combo.add_item("a");
        combo.add_item("b");
        combo.select(1);
        assert_eq!(combo.selected_text(), Some("b"));
        combo.select(5);
        assert_eq!(combo.selected, None);
        combo.select(-1);
        assert_eq!(combo.selected, None);
    }
}
