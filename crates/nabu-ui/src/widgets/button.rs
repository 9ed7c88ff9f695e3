/// A push button.
///
/// `on_click` holds the named event [`crate::Ui::click`] fires into the
/// shared queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub is_default: bool,
    pub on_click: Option<String>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), is_default: false, on_click: None }
    }
}
