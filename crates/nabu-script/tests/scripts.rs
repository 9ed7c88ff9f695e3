//! Whole-script tests against the real `nabu-ui` widget model.

use nabu_script::{ControlKind, Diagnostics, NoticeKind};
use nabu_ui::{ControlBody, ControlId, Ui};

fn run(src: &str) -> Ui {
    let mut ui = Ui::new();
    nabu_script::run_script(src, &mut ui).expect("script runs");
    ui
}

fn find(ui: &Ui, kind: ControlKind) -> ControlId {
    ui.iter()
        .find(|(_, c)| c.kind() == kind)
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("no {} in tree", kind.name()))
}

fn find_button(ui: &Ui, label: &str) -> ControlId {
    ui.iter()
        .find(|(_, c)| matches!(&c.body, ControlBody::Button(b) if b.label == label))
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("no button {label:?}"))
}

#[test]
fn window_button_position_size() {
    let ui = run(r#"
        a = Window.title("T");
        b = a.addButton("Go");
        b.position(10, 10).size(80, 24);
    "#);

    let win = ui.window().expect("window built");
    assert_eq!(ui.children(win).len(), 1);

    let btn = ui.get(ui.children(win)[0]).unwrap();
    assert_eq!(btn.kind(), ControlKind::Button);
    assert_eq!(btn.position, (10, 10));
    assert_eq!(btn.size, (80, 24));
    assert!(matches!(&btn.body, ControlBody::Button(b) if b.label == "Go"));

    let ControlBody::Window(w) = &ui.get(win).unwrap().body else { panic!() };
    assert_eq!(w.title, "T");
}

#[test]
fn run_script_returns_the_root_handle() {
    let mut ui = Ui::new();
    let root = nabu_script::run_script(r#"Window.title("x");"#, &mut ui).unwrap();
    assert_eq!(root, ui.window());

    let mut empty = Ui::new();
    let none = nabu_script::run_script("a = 1;", &mut empty).unwrap();
    assert!(none.is_none());
    assert!(empty.is_empty());
}

#[test]
fn clicking_a_scripted_button_fires_its_event() {
    let mut ui = run(r#"
        win = Window.title("Form");
        win.addButton("Save").onClick("save");
        win.addButton("Quit").onClick("quit");
    "#);

    ui.click(find_button(&ui, "Quit"));
    ui.click(find_button(&ui, "Save"));
    assert_eq!(ui.take_events(), vec!["quit", "save"]);
}

#[test]
fn typing_into_a_scripted_input_fires_on_change() {
    let mut ui = run(r#"
        name = Window.addInput("Type here...");
        name.onChange("name_changed");
    "#);

    let input = find(&ui, ControlKind::Input);
    ui.set_input_value(input, "Ada");
    assert_eq!(ui.take_events(), vec!["name_changed"]);

    let ControlBody::Input(body) = &ui.get(input).unwrap().body else { panic!() };
    assert_eq!(body.value, "Ada");
    assert_eq!(body.placeholder, "Type here...");
}

#[test]
fn unknown_methods_do_not_derail_a_chain() {
    let ui = run(r#"
        btn = Window.addButton("x");
        btn.frobnicate(1, 2, 3);
        btn.text("ok");
    "#);
    let btn = find(&ui, ControlKind::Button);
    assert!(matches!(&ui.get(btn).unwrap().body, ControlBody::Button(b) if b.label == "ok"));
}

#[test]
fn group_box_nests_its_children() {
    let ui = run(r#"
        g = Window.addGroupBox("Options");
        g.addCheckBox("Option 1").position(10, 50);
        g.addCheckBox("Option 2").position(10, 75);
    "#);

    let group = find(&ui, ControlKind::GroupBox);
    let children = ui.children(group);
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|&id| ui.get(id).unwrap().kind() == ControlKind::CheckBox));
}

#[test]
fn branches_build_different_interfaces() {
    let src = |level: i32| {
        format!(
            r#"level = {level};
               if (level > 66) {{ Window.addLabel("high"); }}
               elseif (level > 33) {{ Window.addLabel("mid"); }}
               else {{ Notification.showWarning("Settings", "Running low."); }}"#
        )
    };

    let ui = run(&src(80));
    let label = find(&ui, ControlKind::Label);
    assert!(matches!(&ui.get(label).unwrap().body, ControlBody::Label(l) if l.text == "high"));
    assert!(ui.notifications().is_empty());

    let ui = run(&src(50));
    let label = find(&ui, ControlKind::Label);
    assert!(matches!(&ui.get(label).unwrap().body, ControlBody::Label(l) if l.text == "mid"));

    let ui = run(&src(10));
    assert_eq!(ui.notifications().len(), 1);
    assert_eq!(ui.notifications()[0].kind, NoticeKind::Warning);
    // Only the else branch ran, and it never references the window factory.
    assert!(ui.window().is_none());
}

#[test]
fn untaken_branches_touch_nothing() {
    let ui = run(r#"
        if (false) { Window.addLabel("never"); }
    "#);
    assert!(ui.is_empty());
}

#[test]
fn anonymous_controls_survive_in_the_tree() {
    // The combo box is never bound to a variable; it must still exist.
    let ui = run(r#"Window.addComboBox().addItem("a").addItem("b").setSelectedIndex(0);"#);
    let combo = find(&ui, ControlKind::ComboBox);
    let ControlBody::ComboBox(body) = &ui.get(combo).unwrap().body else { panic!() };
    assert_eq!(body.items, vec!["a", "b"]);
    assert_eq!(body.selected_text(), Some("a"));
}

#[test]
fn progress_bar_records_clamped_value() {
    let ui = run(r#"Window.addProgressBar().setRange(0, 10).setValue(42);"#);
    let bar = find(&ui, ControlKind::ProgressBar);
    let ControlBody::ProgressBar(body) = &ui.get(bar).unwrap().body else { panic!() };
    assert_eq!((body.min, body.max, body.value), (0, 10, 10));
}

#[test]
fn malformed_script_still_builds_what_it_can() {
    let mut ui = Ui::new();
    let mut diag = Diagnostics::new();
    let src = r#"
        win = Window.title("Partial") @@ garbage here;
        win.addLabel("made it" & );
    "#;
    nabu_script::run_script_with(src, &mut ui, &mut diag).unwrap();

    assert!(ui.window().is_some());
    let label = find(&ui, ControlKind::Label);
    assert!(matches!(&ui.get(label).unwrap().body, ControlBody::Label(l) if l.text == "made it"));
    assert!(!diag.is_empty());
}

// ── Bundled demos ─────────────────────────────────────────────────────────
//
// The studio's demo scripts must run clean: no diagnostics, no factory
// errors, a window at the root.

#[test]
fn hello_demo_runs_clean() {
    let src = include_str!("../../nabu-studio/demos/hello.nabu");
    let mut ui = Ui::new();
    let mut diag = Diagnostics::new();
    let root = nabu_script::run_script_with(src, &mut ui, &mut diag).unwrap();

    assert!(root.is_some());
    assert!(diag.is_empty(), "demo produced notes: {:?}", diag.entries());
    assert_eq!(ui.notifications().len(), 1);
    assert_eq!(ui.notifications()[0].duration_ms, Some(2000));

    // The group box holds its label and three checkboxes.
    let group = find(&ui, ControlKind::GroupBox);
    assert_eq!(ui.children(group).len(), 4);
}

#[test]
fn settings_demo_runs_clean() {
    let src = include_str!("../../nabu-studio/demos/settings.nabu");
    let mut ui = Ui::new();
    let mut diag = Diagnostics::new();
    let root = nabu_script::run_script_with(src, &mut ui, &mut diag).unwrap();

    assert!(root.is_some());
    assert!(diag.is_empty(), "demo produced notes: {:?}", diag.entries());

    // level = 42 lands in the middle branch.
    let labels: Vec<_> = ui
        .iter()
        .filter_map(|(_, c)| match &c.body {
            ControlBody::Label(l) => Some(l.text.as_str()),
            _ => None,
        })
        .collect();
    assert!(labels.contains(&"Comfortable."));
    assert!(ui.notifications().is_empty());

    let token = find(&ui, ControlKind::Input);
    let ControlBody::Input(body) = &ui.get(token).unwrap().body else { panic!() };
    assert!(body.password && body.readonly);
}
