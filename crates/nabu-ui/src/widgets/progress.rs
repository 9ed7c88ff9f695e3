/// A horizontal progress bar. `value` always stays inside `min..=max`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    pub min: i32,
    pub max: i32,
    pub value: i32,
}

impl ProgressBar {
    pub fn new() -> Self {
        Self { min: 0, max: 100, value: 0 }
    }

    pub fn set_range(&mut self, min: i32, max: i32) {
        self.min = min;
        self.max = max.max(min);
        self.value = self.value.clamp(self.min, self.max);
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}
