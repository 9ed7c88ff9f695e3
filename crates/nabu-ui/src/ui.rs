use std::fmt::Write as _;

use log::debug;

use nabu_script::{ControlKind, ControlOp, FactoryError, Notice, UiFactory};

use crate::event::EventQueue;
use crate::notify::NotificationCenter;
use crate::widgets::{Button, Checkbox, ComboBox, GroupBox, Label, ProgressBar, TextInput, Window};

// ── ControlId ─────────────────────────────────────────────────────────────

/// Index of a control in the [`Ui`] arena. Stable for the life of the `Ui`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlId(usize);

// ── Control ───────────────────────────────────────────────────────────────

/// Kind-specific state of a [`Control`].
#[derive(Debug, Clone, PartialEq)]
pub enum ControlBody {
    Window(Window),
    Button(Button),
    Label(Label),
    Input(TextInput),
    CheckBox(Checkbox),
    ComboBox(ComboBox),
    ProgressBar(ProgressBar),
    GroupBox(GroupBox),
}

impl ControlBody {
    pub fn kind(&self) -> ControlKind {
        match self {
            ControlBody::Window(_) => ControlKind::Window,
            ControlBody::Button(_) => ControlKind::Button,
            ControlBody::Label(_) => ControlKind::Label,
            ControlBody::Input(_) => ControlKind::Input,
            ControlBody::CheckBox(_) => ControlKind::CheckBox,
            ControlBody::ComboBox(_) => ControlKind::ComboBox,
            ControlBody::ProgressBar(_) => ControlKind::ProgressBar,
            ControlBody::GroupBox(_) => ControlKind::GroupBox,
        }
    }

    fn apply(&mut self, op: ControlOp) {
        use ControlBody as B;
        use ControlOp as Op;
        match (self, op) {
            (B::Window(w), Op::Title(t)) => w.title = t,
            (B::Window(w), Op::Center(v)) => w.centered = v,
            (B::Button(b), Op::Text(t)) => b.label = t,
            (B::Button(b), Op::SetDefault(v)) => b.is_default = v,
            (B::Button(b), Op::OnClick(e)) => b.on_click = Some(e),
            (B::Label(l), Op::Text(t)) => l.text = t,
            (B::Label(l), Op::FontSize(s)) => l.font_size = s,
            (B::Label(l), Op::Bold(v)) => l.bold = v,
            (B::Input(i), Op::Text(t)) => i.value = t,
            (B::Input(i), Op::Multiline(v)) => i.multiline = v,
            (B::Input(i), Op::Password(v)) => i.password = v,
            (B::Input(i), Op::ReadOnly(v)) => i.readonly = v,
            (B::Input(i), Op::OnChange(e)) => i.on_change = Some(e),
            (B::CheckBox(c), Op::Text(t)) => c.label = t,
            (B::CheckBox(c), Op::SetChecked(v)) => c.checked = v,
            (B::CheckBox(c), Op::OnChange(e)) => c.on_change = Some(e),
            (B::ComboBox(c), Op::AddItem(item)) => c.add_item(item),
            (B::ComboBox(c), Op::SetSelectedIndex(i)) => c.select(i),
            (B::ComboBox(c), Op::OnChange(e)) => c.on_change = Some(e),
            (B::ProgressBar(p), Op::SetRange { min, max }) => p.set_range(min, max),
            (B::ProgressBar(p), Op::SetValue(v)) => p.set_value(v),
            (B::GroupBox(g), Op::Text(t)) => g.title = t,
            (body, op) => debug!("{:?} dropped on {}", op, body.kind().name()),
        }
    }
}

/// One control in the arena: the geometry and flags every kind shares, its
/// place in the tree, and the kind-specific body.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub position: (i32, i32),
    pub size: (i32, i32),
    pub visible: bool,
    pub enabled: bool,
    pub parent: Option<ControlId>,
    pub children: Vec<ControlId>,
    pub body: ControlBody,
}

impl Control {
    fn new(body: ControlBody, parent: Option<ControlId>) -> Self {
        Self {
            position: (0, 0),
            size: initial_size(body.kind()),
            visible: true,
            enabled: true,
            parent,
            children: Vec::new(),
            body,
        }
    }

    pub fn kind(&self) -> ControlKind {
        self.body.kind()
    }

    fn describe(&self) -> String {
        let head = match &self.body {
            ControlBody::Window(w) => {
                let centered = if w.centered { ", centered" } else { "" };
                return format!("Window {:?} {}x{}{centered}", w.title, self.size.0, self.size.1);
            }
            ControlBody::Button(b) => {
                let mut s = format!("Button {:?}", b.label);
                if b.is_default {
                    s.push_str(" [default]");
                }
                if let Some(event) = &b.on_click {
                    let _ = write!(s, " -> {event}");
                }
                s
            }
            ControlBody::Label(l) => {
                let bold = if l.bold { " bold" } else { "" };
                format!("Label {:?} {}pt{bold}", l.text, l.font_size)
            }
            ControlBody::Input(i) => {
                let mut s = format!("Input {:?}", i.value);
                if !i.placeholder.is_empty() {
                    let _ = write!(s, " placeholder={:?}", i.placeholder);
                }
                for (flag, set) in
                    [("multiline", i.multiline), ("password", i.password), ("readonly", i.readonly)]
                {
                    if set {
                        let _ = write!(s, " [{flag}]");
                    }
                }
                s
            }
            ControlBody::CheckBox(c) => {
                format!("CheckBox {:?} [{}]", c.label, if c.checked { "x" } else { " " })
            }
            ControlBody::ComboBox(c) => {
                format!("ComboBox {:?} selected={:?}", c.items, c.selected_text())
            }
            ControlBody::ProgressBar(p) => {
                format!("ProgressBar {}/{}..{}", p.value, p.min, p.max)
            }
            ControlBody::GroupBox(g) => format!("GroupBox {:?}", g.title),
        };
        format!("{head} at ({}, {}) {}x{}", self.position.0, self.position.1, self.size.0, self.size.1)
    }
}

/// Native default extents per kind.
fn initial_size(kind: ControlKind) -> (i32, i32) {
    match kind {
        ControlKind::Window => (800, 600),
        ControlKind::Button => (100, 30),
        ControlKind::Label => (200, 20),
        ControlKind::Input => (200, 24),
        ControlKind::CheckBox => (200, 20),
        ControlKind::ComboBox => (200, 200),
        ControlKind::ProgressBar => (200, 20),
        ControlKind::GroupBox => (300, 200),
    }
}

// ── Ui ────────────────────────────────────────────────────────────────────

/// Headless UI: an arena of controls recording every operation a script
/// issues, plus the event queue and notification record.
///
/// Implements [`UiFactory`], so it plugs straight into
/// `nabu_script::run_script`. After a run, inspect the tree with [`get`] /
/// [`children`] / [`dump_tree`], simulate gestures with [`click`] and
/// friends, and drain fired events with [`take_events`].
///
/// [`get`]: Ui::get
/// [`children`]: Ui::children
/// [`dump_tree`]: Ui::dump_tree
/// [`click`]: Ui::click
/// [`take_events`]: Ui::take_events
#[derive(Debug, Default)]
pub struct Ui {
    controls: Vec<Control>,
    events: EventQueue,
    notifications: NotificationCenter,
}

impl Ui {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.0)
    }

    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.get(id).map(|c| c.children.as_slice()).unwrap_or(&[])
    }

    /// The root window, if a script created one.
    pub fn window(&self) -> Option<ControlId> {
        self.iter().find(|(_, c)| c.kind() == ControlKind::Window).map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlId, &Control)> {
        self.controls.iter().enumerate().map(|(i, c)| (ControlId(i), c))
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Drain all events fired since the last call.
    pub fn take_events(&self) -> Vec<String> {
        self.events.take_events()
    }

    pub fn notifications(&self) -> &[Notice] {
        self.notifications.posted()
    }

    // ── Gesture simulation ────────────────────────────────────────────────

    /// Click a button. Disabled controls swallow the gesture, like their
    /// native counterparts.
    pub fn click(&mut self, id: ControlId) {
        let Some(control) = self.controls.get(id.0) else { return };
        if !control.enabled {
            return;
        }
        if let ControlBody::Button(button) = &control.body {
            if let Some(event) = &button.on_click {
                self.events.push(event.clone());
            }
        }
    }

    /// Type into an input field. Read-only and disabled fields ignore it.
    pub fn set_input_value(&mut self, id: ControlId, value: impl Into<String>) {
        let Some(control) = self.controls.get_mut(id.0) else { return };
        if !control.enabled {
            return;
        }
        if let ControlBody::Input(input) = &mut control.body {
            if input.readonly {
                return;
            }
            input.value = value.into();
            if let Some(event) = input.on_change.clone() {
                self.events.push(event);
            }
        }
    }

    /// Toggle a checkbox.
    pub fn set_checked(&mut self, id: ControlId, checked: bool) {
        let Some(control) = self.controls.get_mut(id.0) else { return };
        if !control.enabled {
            return;
        }
        if let ControlBody::CheckBox(check) = &mut control.body {
            check.checked = checked;
            if let Some(event) = check.on_change.clone() {
                self.events.push(event);
            }
        }
    }

    /// Pick a drop-down item by index.
    pub fn select_item(&mut self, id: ControlId, index: i32) {
        let Some(control) = self.controls.get_mut(id.0) else { return };
        if !control.enabled {
            return;
        }
        if let ControlBody::ComboBox(combo) = &mut control.body {
            combo.select(index);
            if let Some(event) = combo.on_change.clone() {
                self.events.push(event);
            }
        }
    }

    // ── Rendering (textual) ───────────────────────────────────────────────

    /// The constructed hierarchy as indented text, one control per line.
    pub fn dump_tree(&self) -> String {
        let mut out = String::new();
        for (id, control) in self.iter() {
            if control.parent.is_none() {
                self.dump_node(&mut out, id, 0);
            }
        }
        out
    }

    fn dump_node(&self, out: &mut String, id: ControlId, depth: usize) {
        let control = &self.controls[id.0];
        let _ = writeln!(out, "{:indent$}{}", "", control.describe(), indent = depth * 2);
        for &child in &control.children {
            self.dump_node(out, child, depth + 1);
        }
    }

    fn insert(&mut self, body: ControlBody, parent: Option<ControlId>) -> ControlId {
        let id = ControlId(self.controls.len());
        self.controls.push(Control::new(body, parent));
        if let Some(parent) = parent {
            self.controls[parent.0].children.push(id);
        }
        id
    }
}

impl UiFactory for Ui {
    type Handle = ControlId;

    fn create_window(&mut self) -> Result<ControlId, FactoryError> {
        Ok(self.insert(ControlBody::Window(Window::new()), None))
    }

    fn add_control(
        &mut self,
        parent: &ControlId,
        kind: ControlKind,
        text: Option<String>,
    ) -> Result<ControlId, FactoryError> {
        if self.get(*parent).is_none() {
            return Err(FactoryError::new(format!(
                "failed to create {}: no such parent",
                kind.name()
            )));
        }
        let text = text.unwrap_or_default();
        let body = match kind {
            ControlKind::Window => {
                return Err(FactoryError::new("a window cannot be nested"));
            }
            ControlKind::Button => ControlBody::Button(Button::new(text)),
            ControlKind::Label => ControlBody::Label(Label::new(text)),
            ControlKind::Input => ControlBody::Input(TextInput::new(text)),
            ControlKind::CheckBox => ControlBody::CheckBox(Checkbox::new(text)),
            ControlKind::ComboBox => ControlBody::ComboBox(ComboBox::new()),
            ControlKind::ProgressBar => ControlBody::ProgressBar(ProgressBar::new()),
            ControlKind::GroupBox => ControlBody::GroupBox(GroupBox::new(text)),
        };
        Ok(self.insert(body, Some(*parent)))
    }

    fn apply(&mut self, target: &ControlId, op: ControlOp) {
        let Some(control) = self.controls.get_mut(target.0) else { return };
        match op {
            ControlOp::Position { x, y } => control.position = (x, y),
            ControlOp::Size { width, height } => control.size = (width, height),
            ControlOp::Show(v) => control.visible = v,
            ControlOp::Enable(v) => control.enabled = v,
            other => control.body.apply(other),
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notifications.post(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> (Ui, ControlId, ControlId) {
        let mut ui = Ui::new();
        let win = ui.create_window().unwrap();
        let btn = ui.add_control(&win, ControlKind::Button, Some("Go".into())).unwrap();
        (ui, win, btn)
    }

    #[test]
    fn tree_links_parent_and_child() {
        let (ui, win, btn) = build();
        assert_eq!(ui.children(win), &[btn]);
        assert_eq!(ui.get(btn).unwrap().parent, Some(win));
        assert_eq!(ui.window(), Some(win));
    }

    #[test]
    fn ops_update_recorded_state() {
        let (mut ui, _, btn) = build();
        ui.apply(&btn, ControlOp::Position { x: 10, y: 20 });
        ui.apply(&btn, ControlOp::SetDefault(true));
        let control = ui.get(btn).unwrap();
        assert_eq!(control.position, (10, 20));
        assert!(matches!(&control.body, ControlBody::Button(b) if b.is_default));
    }

    #[test]
    fn click_fires_bound_event() {
        let (mut ui, _, btn) = build();
        ui.apply(&btn, ControlOp::OnClick("go".into()));
        ui.click(btn);
        ui.click(btn);
        assert_eq!(ui.take_events(), vec!["go", "go"]);
        assert!(ui.take_events().is_empty());
    }

    #[test]
    fn disabled_button_swallows_clicks() {
        let (mut ui, _, btn) = build();
        ui.apply(&btn, ControlOp::OnClick("go".into()));
        ui.apply(&btn, ControlOp::Enable(false));
        ui.click(btn);
        assert!(ui.take_events().is_empty());
    }

    #[test]
    fn readonly_input_ignores_typing() {
        let mut ui = Ui::new();
        let win = ui.create_window().unwrap();
        let input = ui.add_control(&win, ControlKind::Input, Some("hint".into())).unwrap();
        ui.apply(&input, ControlOp::OnChange("changed".into()));
        ui.set_input_value(input, "hello");
        ui.apply(&input, ControlOp::ReadOnly(true));
        ui.set_input_value(input, "blocked");
        let ControlBody::Input(body) = &ui.get(input).unwrap().body else { panic!() };
        assert_eq!(body.value, "hello");
        assert_eq!(body.placeholder, "hint");
        assert_eq!(ui.take_events(), vec!["changed"]);
    }

    #[test]
    fn windows_cannot_nest() {
        let (mut ui, win, _) = build();
        assert!(ui.add_control(&win, ControlKind::Window, None).is_err());
    }

    #[test]
    fn dump_tree_indents_children() {
        let (mut ui, win, _) = build();
        let group = ui.add_control(&win, ControlKind::GroupBox, Some("Opts".into())).unwrap();
        ui.add_control(&group, ControlKind::CheckBox, Some("a".into())).unwrap();
        let dump = ui.dump_tree();
        let lines: Vec<_> = dump.lines().collect();
        assert!(lines[0].starts_with("Window"));
        assert!(lines[1].starts_with("  Button"));
        assert!(lines[2].starts_with("  GroupBox"));
        assert!(lines[3].starts_with("    CheckBox"));
    }
}
