/// A single- or multi-line edit field.
///
/// The placeholder is fixed at creation; `value` is what the user (or a
/// `text(...)` call) typed. `on_change` holds the named event
/// [`crate::Ui::set_input_value`] fires.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    pub placeholder: String,
    pub value: String,
    pub multiline: bool,
    pub password: bool,
    pub readonly: bool,
    pub on_change: Option<String>,
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            value: String::new(),
            multiline: false,
            password: false,
            readonly: false,
            on_change: None,
        }
    }
}
