/// The top-level frame window. There is at most one per script run; the
/// interpreter creates it lazily on first reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub title: String,
    pub centered: bool,
}

impl Window {
    pub fn new() -> Self {
        Self { title: "Nabu Application".to_string(), centered: true }
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}
