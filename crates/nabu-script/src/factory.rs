use std::fmt;

// ── ControlKind ───────────────────────────────────────────────────────────

/// Kind tag carried by every object handle; the interpreter dispatches
/// chained calls on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Window,
    Button,
    Label,
    Input,
    CheckBox,
    ComboBox,
    ProgressBar,
    GroupBox,
}

impl ControlKind {
    /// Script-facing spelling, as used in component keywords and the `add*`
    /// call family.
    pub fn name(self) -> &'static str {
        match self {
            ControlKind::Window => "Window",
            ControlKind::Button => "Button",
            ControlKind::Label => "Label",
            ControlKind::Input => "Input",
            ControlKind::CheckBox => "CheckBox",
            ControlKind::ComboBox => "ComboBox",
            ControlKind::ProgressBar => "ProgressBar",
            ControlKind::GroupBox => "GroupBox",
        }
    }
}

// ── ControlOp ─────────────────────────────────────────────────────────────

/// One state mutation applied to an existing control.
///
/// The interpreter performs all argument coercion before building an op, and
/// never issues an op to a kind that does not support it; a factory only has
/// to record or execute.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlOp {
    Position { x: i32, y: i32 },
    Size { width: i32, height: i32 },
    Text(String),
    Title(String),
    Center(bool),
    Show(bool),
    Enable(bool),
    SetDefault(bool),
    Multiline(bool),
    Password(bool),
    ReadOnly(bool),
    SetChecked(bool),
    AddItem(String),
    SetSelectedIndex(i32),
    SetRange { min: i32, max: i32 },
    SetValue(i32),
    FontSize(i32),
    Bold(bool),
    /// Bind a named event fired when the control is clicked.
    OnClick(String),
    /// Bind a named event fired when the control's value changes.
    OnChange(String),
}

// ── Notice ────────────────────────────────────────────────────────────────

/// Severity of a fire-and-forget notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A notification shown as an immediate side effect. No handle is returned
/// and nothing can be chained onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub duration_ms: Option<i32>,
}

// ── FactoryError ──────────────────────────────────────────────────────────

/// Raised by a factory that refuses to allocate a window or control. The
/// only terminal failure a script run can hit.
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryError(pub String);

impl FactoryError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ui factory error: {}", self.0)
    }
}

impl std::error::Error for FactoryError {}

// ── UiFactory ─────────────────────────────────────────────────────────────

/// The external collaborator a script drives.
///
/// The interpreter issues these operations synchronously, in program order,
/// from its executing thread, and never retries or reorders them. Handles it
/// receives are retained in its keep-alive arena for its whole lifetime, so
/// every created object outlives the script even when no variable references
/// it.
pub trait UiFactory {
    /// Opaque object handle. Cloning must be cheap; clones refer to the same
    /// underlying object.
    type Handle: Clone;

    /// Create the root window. Called at most once per script run.
    fn create_window(&mut self) -> Result<Self::Handle, FactoryError>;

    /// Create a child control under `parent`. `text` is the initial label,
    /// title, or placeholder, depending on the kind.
    fn add_control(
        &mut self,
        parent: &Self::Handle,
        kind: ControlKind,
        text: Option<String>,
    ) -> Result<Self::Handle, FactoryError>;

    /// Apply a state mutation to an existing control. Infallible by
    /// contract; a factory that cannot honor an op drops it.
    fn apply(&mut self, target: &Self::Handle, op: ControlOp);

    /// Show a notification. Fire and forget.
    fn notify(&mut self, notice: Notice);
}
