/// Static text.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Point size; 9 matches the stock UI font.
    pub font_size: i32,
    pub bold: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), font_size: 9, bold: false }
    }
}
