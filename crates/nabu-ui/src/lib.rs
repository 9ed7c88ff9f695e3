//! Headless widget model for the Nabu scripting language.
//!
//! [`Ui`] implements `nabu_script::UiFactory`: every operation a script
//! issues is recorded as plain state on an arena of controls: geometry,
//! text, checked flags, drop-down items, event bindings. There is no
//! rendering, layout, or message loop; the point is to give scripts a real
//! object model to drive and applications a tree they can inspect.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use nabu_ui::Ui;
//!
//! let mut ui = Ui::new();
//! let root = nabu_script::run_script(src, &mut ui)?;
//!
//! println!("{}", ui.dump_tree());
//!
//! // Simulate a click on a scripted button and see what it fired.
//! ui.click(button_id);
//! for event in ui.take_events() {
//!     match event.as_str() {
//!         "submit" => submit(),
//!         _ => {}
//!     }
//! }
//! ```

pub mod event;
pub mod logging;
pub mod notify;
pub mod ui;
pub mod widgets;

pub use event::EventQueue;
pub use logging::{init_logging, LoggingConfig};
pub use notify::NotificationCenter;
pub use ui::{Control, ControlBody, ControlId, Ui};
