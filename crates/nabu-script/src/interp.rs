use std::collections::HashMap;

use log::debug;

use crate::ast::{BinOp, Call, Chain, Expr, If, Literal, Program, Rhs, Stmt};
use crate::factory::{ControlKind, ControlOp, FactoryError, Notice, NoticeKind, UiFactory};
use crate::value::{ObjectId, Value};

// ── Receiver ──────────────────────────────────────────────────────────────

/// The running receiver while a chain is walked. Object-returning calls
/// replace it; everything else leaves it alone.
enum Receiver {
    /// A retained UI object; calls dispatch by its kind tag.
    Object(ObjectId),
    /// The stateless notification service.
    Notifier,
    /// A non-object value; calls no-op but the value flows through.
    Plain(Value),
    /// An unresolvable root, or a notifier call that returned nothing.
    Missing,
}

struct Retained<H> {
    kind: ControlKind,
    handle: H,
}

// ── Interpreter ───────────────────────────────────────────────────────────

/// Tree-walking evaluator over a parsed [`Program`].
///
/// Holds the script's single flat variable environment and the keep-alive
/// arena that owns every handle the factory ever returned. Both live exactly
/// as long as the interpreter; dropping it releases the arena and,
/// transitively, whatever the factory's handles own.
///
/// Execution is strictly sequential on the calling thread. One interpreter
/// must not be driven from multiple threads; independent runs should each
/// use their own instance.
pub struct Interpreter<'f, F: UiFactory> {
    factory: &'f mut F,
    env: HashMap<String, Value>,
    arena: Vec<Retained<F::Handle>>,
    window: Option<ObjectId>,
}

impl<'f, F: UiFactory> Interpreter<'f, F> {
    pub fn new(factory: &'f mut F) -> Self {
        Self { factory, env: HashMap::new(), arena: Vec::new(), window: None }
    }

    /// Run a program start to finish. Returns the root window handle if the
    /// script referenced the window factory, `None` otherwise.
    ///
    /// The only error source is the factory refusing to create something;
    /// objects created before such a failure stay retained.
    pub fn execute(&mut self, program: &Program) -> Result<Option<F::Handle>, FactoryError> {
        for stmt in &program.statements {
            self.exec_stmt(stmt)?;
        }
        Ok(self.window.map(|id| self.arena[id.0].handle.clone()))
    }

    /// Value currently bound to `name`, if any.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.env.get(name)
    }

    /// Factory handle behind a retained object value.
    pub fn handle_of(&self, id: ObjectId) -> Option<&F::Handle> {
        self.arena.get(id.0).map(|r| &r.handle)
    }

    /// Kind tag of a retained object value.
    pub fn kind_of(&self, id: ObjectId) -> Option<ControlKind> {
        self.arena.get(id.0).map(|r| r.kind)
    }

    fn retain(&mut self, kind: ControlKind, handle: F::Handle) -> ObjectId {
        self.arena.push(Retained { kind, handle });
        ObjectId(self.arena.len() - 1)
    }

    // ── Statements ────────────────────────────────────────────────────────

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), FactoryError> {
        match stmt {
            Stmt::Assign { name, value } => {
                let value = match value {
                    Rhs::Expr(expr) => Some(self.eval_expr(expr)),
                    Rhs::Chain(chain) => self.eval_chain(chain)?,
                };
                match value {
                    Some(v) => {
                        self.env.insert(name.clone(), v);
                    }
                    None => {
                        debug!("assignment to `{name}` produced no value; binding unchanged");
                    }
                }
            }
            Stmt::Chain(chain) => {
                self.eval_chain(chain)?;
            }
            Stmt::If(node) => self.exec_if(node)?,
        }
        Ok(())
    }

    fn exec_if(&mut self, node: &If) -> Result<(), FactoryError> {
        let branch = if self.eval_expr(&node.condition).as_bool() {
            &node.then_block
        } else {
            &node.else_block
        };
        for stmt in branch {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    // ── Expressions ───────────────────────────────────────────────────────

    fn eval_expr(&self, expr: &Expr) -> Value {
        match expr {
            Expr::Literal(lit) => self.eval_literal(lit),
            Expr::Not(inner) => Value::Bool(!self.eval_expr(inner).as_bool()),
            Expr::Binary { left, op, right } => {
                // Both sides always evaluate; `&&`/`||` do not short-circuit.
                let left = self.eval_expr(left);
                let right = self.eval_expr(right);
                eval_binary(left, *op, right)
            }
        }
    }

    fn eval_literal(&self, lit: &Literal) -> Value {
        match lit {
            Literal::Str(s) => Value::Str(s.clone()),
            Literal::Number(raw) => Value::Number(raw.parse().unwrap_or(0.0)),
            Literal::Bool(b) => Value::Bool(*b),
            // An unbound name evaluates to its own spelling.
            Literal::Ident(name) => {
                self.env.get(name).cloned().unwrap_or_else(|| Value::Str(name.clone()))
            }
        }
    }

    // ── Chains ────────────────────────────────────────────────────────────

    fn eval_chain(&mut self, chain: &Chain) -> Result<Option<Value>, FactoryError> {
        let mut receiver = self.resolve_root(&chain.root)?;
        for call in &chain.calls {
            // Arguments evaluate eagerly, left to right, even when the call
            // will not dispatch.
            let args: Vec<Value> = call.args.iter().map(|a| self.eval_expr(a)).collect();
            receiver = self.dispatch(receiver, call, args)?;
        }
        Ok(match receiver {
            Receiver::Object(id) => Some(Value::Object(id)),
            Receiver::Plain(v) => Some(v),
            Receiver::Notifier | Receiver::Missing => None,
        })
    }

    /// The window factory creates the root window on first reference, at
    /// most once per run; the notification service is stateless; anything
    /// else must be a bound variable.
    fn resolve_root(&mut self, root: &str) -> Result<Receiver, FactoryError> {
        match root {
            "Window" => {
                let id = match self.window {
                    Some(id) => id,
                    None => {
                        let handle = self.factory.create_window()?;
                        let id = self.retain(ControlKind::Window, handle);
                        self.window = Some(id);
                        id
                    }
                };
                Ok(Receiver::Object(id))
            }
            "Notification" => Ok(Receiver::Notifier),
            name => Ok(match self.env.get(name) {
                Some(Value::Object(id)) => Receiver::Object(*id),
                Some(value) => Receiver::Plain(value.clone()),
                None => {
                    debug!("chain root `{name}` is not bound; its calls will be ignored");
                    Receiver::Missing
                }
            }),
        }
    }

    fn dispatch(
        &mut self,
        receiver: Receiver,
        call: &Call,
        args: Vec<Value>,
    ) -> Result<Receiver, FactoryError> {
        match receiver {
            Receiver::Notifier => Ok(self.dispatch_notice(call, args)),
            Receiver::Object(id) => self.dispatch_object(id, call, args),
            other => {
                debug!("call `{}` has no receiver; ignored", call.name);
                Ok(other)
            }
        }
    }

    fn dispatch_notice(&mut self, call: &Call, args: Vec<Value>) -> Receiver {
        let kind = match call.name.as_str() {
            "show" => NoticeKind::Info,
            "showWarning" => NoticeKind::Warning,
            "showError" => NoticeKind::Error,
            _ => {
                debug!("unknown notification call `{}`; ignored", call.name);
                return Receiver::Notifier;
            }
        };
        let mut args = args.into_iter();
        let (title, message) = match (args.next(), args.next()) {
            (Some(t), Some(m)) => (t.as_text(), m.as_text()),
            _ => {
                debug!("notification `{}` needs a title and a message; ignored", call.name);
                return Receiver::Notifier;
            }
        };
        let duration_ms = match kind {
            NoticeKind::Info => args.next().map(|v| v.as_i32()),
            _ => None,
        };
        self.factory.notify(Notice { kind, title, message, duration_ms });
        // Nothing comes back from a notification; the chain ends here.
        Receiver::Missing
    }

    fn dispatch_object(
        &mut self,
        id: ObjectId,
        call: &Call,
        args: Vec<Value>,
    ) -> Result<Receiver, FactoryError> {
        let kind = self.arena[id.0].kind;

        // Object-returning calls: the `add*` family on container kinds. The
        // new object becomes the receiver for the rest of the chain.
        if let Some(child_kind) = add_method_target(kind, &call.name) {
            let text = args.first().map(Value::as_text);
            let parent = self.arena[id.0].handle.clone();
            let handle = self.factory.add_control(&parent, child_kind, text)?;
            return Ok(Receiver::Object(self.retain(child_kind, handle)));
        }

        match build_op(kind, &call.name, &args) {
            Some(op) => {
                let handle = self.arena[id.0].handle.clone();
                self.factory.apply(&handle, op);
                Ok(Receiver::Object(id))
            }
            None => {
                debug!("no method `{}` on {}; ignored", call.name, kind.name());
                Ok(Receiver::Object(id))
            }
        }
    }
}

// ── Dispatch tables ───────────────────────────────────────────────────────

/// Child kind created by an `add*` call on `kind`, if the method exists
/// there. Windows host every control; group boxes host everything but
/// another group.
fn add_method_target(kind: ControlKind, name: &str) -> Option<ControlKind> {
    use ControlKind::*;
    let child = match name {
        "addLabel" => Label,
        "addButton" => Button,
        "addInput" => Input,
        "addCheckBox" => CheckBox,
        "addComboBox" => ComboBox,
        "addProgressBar" => ProgressBar,
        "addGroupBox" => GroupBox,
        _ => return None,
    };
    match kind {
        Window => Some(child),
        GroupBox if child != GroupBox => Some(child),
        _ => None,
    }
}

/// The (kind, method) table for state-mutating calls. `None` means the
/// method does not exist on this receiver or a required argument is missing;
/// either way the caller turns it into a logged no-op.
fn build_op(kind: ControlKind, name: &str, args: &[Value]) -> Option<ControlOp> {
    use ControlKind::*;
    use ControlOp::*;
    let op = match (kind, name) {
        // window surface
        (Window, "title") => Title(arg_text(args, 0)?),
        (Window, "center") => Center(arg_flag(args)),
        // shared control surface (`size` includes the window)
        (_, "size") => Size { width: arg_i32(args, 0)?, height: arg_i32(args, 1)? },
        (k, "position") if k != Window => Position { x: arg_i32(args, 0)?, y: arg_i32(args, 1)? },
        (k, "text") if k != Window => Text(arg_text(args, 0)?),
        (k, "show") if k != Window => Show(arg_flag(args)),
        (k, "enable") if k != Window => Enable(arg_flag(args)),
        // kind-specific setters
        (Button, "setDefault") => SetDefault(arg_flag(args)),
        (Button, "onClick") => OnClick(arg_text(args, 0)?),
        (Label, "font") => FontSize(arg_i32(args, 0)?),
        (Label, "bold") => Bold(arg_flag(args)),
        (Input, "multiline") => Multiline(arg_flag(args)),
        (Input, "password") => Password(arg_flag(args)),
        (Input, "readonly") => ReadOnly(arg_flag(args)),
        (Input | CheckBox | ComboBox, "onChange") => OnChange(arg_text(args, 0)?),
        (CheckBox, "setChecked") => SetChecked(arg_flag(args)),
        (ComboBox, "addItem") => AddItem(arg_text(args, 0)?),
        (ComboBox, "setSelectedIndex") => SetSelectedIndex(arg_i32(args, 0)?),
        (ProgressBar, "setRange") => SetRange { min: arg_i32(args, 0)?, max: arg_i32(args, 1)? },
        (ProgressBar, "setValue") => SetValue(arg_i32(args, 0)?),
        _ => return None,
    };
    Some(op)
}

fn arg_i32(args: &[Value], index: usize) -> Option<i32> {
    args.get(index).map(Value::as_i32)
}

fn arg_text(args: &[Value], index: usize) -> Option<String> {
    args.get(index).map(Value::as_text)
}

/// Boolean-configuration calls default to `true` with no argument.
fn arg_flag(args: &[Value]) -> bool {
    args.first().map(Value::as_bool).unwrap_or(true)
}

fn eval_binary(left: Value, op: BinOp, right: Value) -> Value {
    match op {
        BinOp::Add => Value::Number(left.as_number() + right.as_number()),
        BinOp::Sub => Value::Number(left.as_number() - right.as_number()),
        BinOp::Mul => Value::Number(left.as_number() * right.as_number()),
        BinOp::Div => Value::Number(left.as_number() / right.as_number()),
        BinOp::Eq => Value::Bool(left.loosely_equals(&right)),
        BinOp::Ne => Value::Bool(!left.loosely_equals(&right)),
        BinOp::Lt => Value::Bool(left.as_number() < right.as_number()),
        BinOp::Le => Value::Bool(left.as_number() <= right.as_number()),
        BinOp::Gt => Value::Bool(left.as_number() > right.as_number()),
        BinOp::Ge => Value::Bool(left.as_number() >= right.as_number()),
        BinOp::And => Value::Bool(left.as_bool() && right.as_bool()),
        BinOp::Or => Value::Bool(left.as_bool() || right.as_bool()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    /// Factory that records everything the interpreter asks for. Handles are
    /// plain indices into `created`.
    #[derive(Default)]
    struct RecordingFactory {
        created: Vec<(ControlKind, Option<String>)>,
        ops: Vec<(usize, ControlOp)>,
        notices: Vec<Notice>,
        refuse: Option<ControlKind>,
    }

    impl UiFactory for RecordingFactory {
        type Handle = usize;

        fn create_window(&mut self) -> Result<usize, FactoryError> {
            if self.refuse == Some(ControlKind::Window) {
                return Err(FactoryError::new("window allocation refused"));
            }
            self.created.push((ControlKind::Window, None));
            Ok(self.created.len() - 1)
        }

        fn add_control(
            &mut self,
            _parent: &usize,
            kind: ControlKind,
            text: Option<String>,
        ) -> Result<usize, FactoryError> {
            if self.refuse == Some(kind) {
                return Err(FactoryError::new(format!("failed to create {}", kind.name())));
            }
            self.created.push((kind, text));
            Ok(self.created.len() - 1)
        }

        fn apply(&mut self, target: &usize, op: ControlOp) {
            self.ops.push((*target, op));
        }

        fn notify(&mut self, notice: Notice) {
            self.notices.push(notice);
        }
    }

    fn run(src: &str) -> RecordingFactory {
        let mut factory = RecordingFactory::default();
        let program = parse_str(src);
        Interpreter::new(&mut factory).execute(&program).unwrap();
        factory
    }

    /// Runs `src` and returns the value bound to `x`.
    fn eval_x(src: &str) -> Value {
        let mut factory = RecordingFactory::default();
        let program = parse_str(src);
        let mut interp = Interpreter::new(&mut factory);
        interp.execute(&program).unwrap();
        interp.variable("x").cloned().expect("x is bound")
    }

    #[test]
    fn window_created_lazily_and_once() {
        let factory = run(r#"Window.title("A"); Window.title("B");"#);
        assert_eq!(factory.created.len(), 1);
        assert_eq!(factory.ops.len(), 2);
    }

    #[test]
    fn no_window_reference_no_window() {
        let mut factory = RecordingFactory::default();
        let program = parse_str("x = 1 + 2;");
        let root = Interpreter::new(&mut factory).execute(&program).unwrap();
        assert!(root.is_none());
        assert!(factory.created.is_empty());
    }

    #[test]
    fn add_calls_switch_the_receiver() {
        let factory = run(r#"Window.addButton("Go").position(10, 20);"#);
        assert_eq!(factory.created[1].0, ControlKind::Button);
        // position lands on the button handle (1), not the window (0)
        assert_eq!(factory.ops, vec![(1, ControlOp::Position { x: 10, y: 20 })]);
    }

    #[test]
    fn unknown_method_is_a_no_op() {
        let factory = run(r#"b = Window.addButton("x"); b.frobnicate(1, 2, 3); b.text("ok");"#);
        assert_eq!(factory.ops, vec![(1, ControlOp::Text("ok".into()))]);
    }

    #[test]
    fn wrong_receiver_kind_is_a_no_op() {
        let factory = run(r#"b = Window.addButton("x"); b.setChecked(true); b.addItem("i");"#);
        assert!(factory.ops.is_empty());
    }

    #[test]
    fn missing_required_arguments_no_op() {
        let factory = run(r#"b = Window.addButton("x"); b.position(5); b.text();"#);
        assert!(factory.ops.is_empty());
    }

    #[test]
    fn surplus_arguments_are_ignored() {
        let factory = run(r#"b = Window.addButton("x"); b.text("ok", "extra");"#);
        assert_eq!(factory.ops, vec![(1, ControlOp::Text("ok".into()))]);
    }

    #[test]
    fn boolean_setters_default_to_true() {
        let factory = run(r#"b = Window.addButton("x"); b.setDefault(); b.enable(false);"#);
        assert_eq!(factory.ops, vec![
            (1, ControlOp::SetDefault(true)),
            (1, ControlOp::Enable(false)),
        ]);
    }

    #[test]
    fn unbound_chain_root_is_inert() {
        let factory = run(r#"ghost.text("boo"); Window.title("still runs");"#);
        assert_eq!(factory.ops, vec![(0, ControlOp::Title("still runs".into()))]);
    }

    #[test]
    fn non_object_root_flows_through() {
        let value = eval_x("y = 5; x = y.anything(1);");
        assert_eq!(value, Value::Number(5.0));
    }

    #[test]
    fn group_box_hosts_controls_but_not_groups() {
        let factory = run(r#"
            g = Window.addGroupBox("Opts");
            g.addCheckBox("a");
            g.addGroupBox("nested");
        "#);
        let kinds: Vec<_> = factory.created.iter().map(|c| c.0).collect();
        assert_eq!(kinds, vec![
            ControlKind::Window,
            ControlKind::GroupBox,
            ControlKind::CheckBox,
        ]);
    }

    #[test]
    fn string_arithmetic_coerces_to_numbers() {
        assert_eq!(eval_x(r#"x = "3" + "4";"#), Value::Number(7.0));
        assert_eq!(eval_x(r#"x = "abc" + 1;"#), Value::Number(1.0));
        assert_eq!(eval_x("x = 10 / 4;"), Value::Number(2.5));
    }

    #[test]
    fn number_string_equality_uses_text_form() {
        assert_eq!(eval_x(r#"x = 5 == "5";"#), Value::Bool(true));
        assert_eq!(eval_x(r#"x = 5 == "5.0";"#), Value::Bool(false));
    }

    #[test]
    fn unbound_identifier_is_its_own_name() {
        assert_eq!(eval_x("x = foo;"), Value::Str("foo".into()));
    }

    #[test]
    fn logical_operators_truth_table() {
        assert_eq!(eval_x("x = true && 0;"), Value::Bool(false));
        assert_eq!(eval_x(r#"x = "" || 2;"#), Value::Bool(true));
        assert_eq!(eval_x("x = !1;"), Value::Bool(false));
    }

    #[test]
    fn elseif_runs_exactly_one_branch() {
        for (n, expected) in [("1", "A"), ("2", "B"), ("3", "C")] {
            let src = format!(
                "a = {n};
                 if (a == 1) {{ x = \"A\"; }}
                 elseif (a == 2) {{ x = \"B\"; }}
                 else {{ x = \"C\"; }}"
            );
            assert_eq!(eval_x(&src), Value::Str(expected.into()), "a = {n}");
        }
    }

    #[test]
    fn flat_environment_survives_branches() {
        let value = eval_x("x = 1; if (true) { x = 2; }");
        assert_eq!(value, Value::Number(2.0));
    }

    #[test]
    fn notification_show_records_a_notice() {
        let factory = run(r#"Notification.show("T", "M", 1500);"#);
        assert_eq!(factory.notices, vec![Notice {
            kind: NoticeKind::Info,
            title: "T".into(),
            message: "M".into(),
            duration_ms: Some(1500),
        }]);
    }

    #[test]
    fn notification_variants_and_consumed_receiver() {
        let factory = run(r#"Notification.showWarning("W", "m").show("again", "no");"#);
        // The first call consumes the receiver; the chained one is inert.
        assert_eq!(factory.notices.len(), 1);
        assert_eq!(factory.notices[0].kind, NoticeKind::Warning);
        assert_eq!(factory.notices[0].duration_ms, None);
    }

    #[test]
    fn notification_without_message_is_ignored() {
        let factory = run(r#"Notification.show("only title");"#);
        assert!(factory.notices.is_empty());
    }

    #[test]
    fn creation_failure_aborts_and_keeps_earlier_objects() {
        let mut factory = RecordingFactory::default();
        factory.refuse = Some(ControlKind::ComboBox);
        let program = parse_str(
            r#"Window.addButton("ok");
               Window.addComboBox();
               Window.addLabel("never reached");"#,
        );
        let err = Interpreter::new(&mut factory).execute(&program).unwrap_err();
        assert!(err.0.contains("ComboBox"));
        let kinds: Vec<_> = factory.created.iter().map(|c| c.0).collect();
        assert_eq!(kinds, vec![ControlKind::Window, ControlKind::Button]);
    }

    #[test]
    fn anonymous_objects_stay_retained() {
        let mut factory = RecordingFactory::default();
        let program = parse_str(r#"Window.addLabel("orphan");"#);
        let mut interp = Interpreter::new(&mut factory);
        interp.execute(&program).unwrap();
        // No variable references the label, but the arena still holds it.
        assert_eq!(interp.kind_of(ObjectId(1)), Some(ControlKind::Label));
    }
}
