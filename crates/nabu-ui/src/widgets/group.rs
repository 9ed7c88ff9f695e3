/// A titled frame that hosts child controls. The children themselves are
/// tracked by the [`crate::Ui`] tree, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupBox {
    pub title: String,
}

impl GroupBox {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}
