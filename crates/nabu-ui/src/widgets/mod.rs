pub mod button;
pub mod checkbox;
pub mod combo_box;
pub mod group;
pub mod label;
pub mod progress;
pub mod text_input;
pub mod window;

pub use button::Button;
pub use checkbox::Checkbox;
pub use combo_box::ComboBox;
pub use group::GroupBox;
pub use label::Label;
pub use progress::ProgressBar;
pub use text_input::TextInput;
pub use window::Window;
