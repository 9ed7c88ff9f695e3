//! Lexer, parser, and interpreter for the **Nabu UI scripting language**
//! (`.nabu`).
//!
//! A script builds a user interface by chaining method calls on a window
//! factory, previously created controls, and a notification service:
//!
//! ```text
//! win = Window.title("Greeter").size(600, 400);
//! name = win.addInput("Type here...");
//! name.position(20, 85).size(300, 25);
//! win.addButton("Submit").position(20, 120).setDefault().onClick("submit");
//! if (ready) {
//!     Notification.show("Greeter", "Interface constructed.", 2000);
//! }
//! ```
//!
//! The pipeline is deliberately permissive: the lexer and parser never fail,
//! and dispatch mismatches at run time are silent no-ops, so a partially
//! broken script still produces whatever UI it can. The only terminal errors
//! come from the [`UiFactory`] refusing to allocate.
//!
//! This crate carries no UI of its own. It drives any [`UiFactory`]
//! implementation and holds the handles it gets back as opaque values; the
//! `nabu-ui` crate provides the standard headless model.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`lexer`] | `Token`, `TokenKind`, `tokenize` |
//! | [`ast`] | `Program`, `Stmt`, `Chain`, `Expr` |
//! | [`parser`] | `parse`, `parse_str` |
//! | [`value`] | `Value`, `ObjectId`, coercion rules |
//! | [`interp`] | `Interpreter` |
//! | [`factory`] | `UiFactory`, `ControlKind`, `ControlOp`, `Notice` |
//! | [`diag`] | `Diagnostics` sink for silently-degraded input |

pub mod ast;
pub mod diag;
pub mod factory;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod value;

pub use diag::{Diagnostic, Diagnostics};
pub use factory::{ControlKind, ControlOp, FactoryError, Notice, NoticeKind, UiFactory};
pub use interp::Interpreter;
pub use parser::parse_str;
pub use value::{ObjectId, Value};

/// Run a script start to finish against `factory`.
///
/// Returns the root window handle if the script created a window. On factory
/// failure the error carries a human-readable message; everything created
/// before the failure remains alive in the factory.
pub fn run_script<F: UiFactory>(
    src: &str,
    factory: &mut F,
) -> Result<Option<F::Handle>, FactoryError> {
    let program = parser::parse_str(src);
    Interpreter::new(factory).execute(&program)
}

/// Like [`run_script`], but records every silently-degraded lex/parse event
/// in `diag`.
pub fn run_script_with<F: UiFactory>(
    src: &str,
    factory: &mut F,
    diag: &mut Diagnostics,
) -> Result<Option<F::Handle>, FactoryError> {
    let tokens = lexer::tokenize_with(src, diag);
    let program = parser::parse_with(tokens, diag);
    Interpreter::new(factory).execute(&program)
}
