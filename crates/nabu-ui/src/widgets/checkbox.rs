/// A two-state checkbox with a text label.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkbox {
    pub label: String,
    pub checked: bool,
    pub on_change: Option<String>,
}

impl Checkbox {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), checked: false, on_change: None }
    }
}
