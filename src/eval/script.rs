//! Script handlers: small step lists written directly in keymap files
//!
//! ```yaml
//! - key: ctrl+x
//!   run:
//!     - put: {files: 3}
//!     - echo: "pressed $key"
//!     - each:
//!         items: [a, b, c]
//!         do:
//!           - echo: "item $it"
//!     - raise: commit-code
//! ```
//!
//! `$key` expands to the pressed key's display string and, inside `each`,
//! `$it` to the current item.

use std::thread;
use std::time::Duration;

use serde_yaml::Value as Yaml;

use super::builtins;
use super::cause::Cause;
use super::frame::Frame;
use super::value::{self, repr, Value};
use crate::action::Action;
use crate::binding::Handler;
use crate::editor::KeyEvent;

/// One step of a script
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Put(Value),
    Echo(String),
    Print(String),
    Eprint(String),
    Note(String),
    Insert(String),
    Mode(String),
    ResetMode,
    CommitCode,
    CommitEof,
    Raise(Action),
    Fail(String),
    Break,
    Continue,
    Each { items: Vec<Value>, body: Vec<Step> },
    SleepMs(u64),
}

/// A handler made of steps
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    steps: Vec<Step>,
}

/// Text substitutions available to steps
struct Vars<'a> {
    key: &'a str,
    it: Option<&'a Value>,
}

impl Vars<'_> {
    fn expand(&self, text: &str) -> String {
        let text = text.replace("$key", self.key);
        match self.it {
            Some(Value::String(s)) => text.replace("$it", s),
            Some(item) => text.replace("$it", &repr(item)),
            None => text,
        }
    }
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Parse the `run:` value of a keymap entry: a list of steps or a
    /// single step
    pub fn from_yaml(yaml: &Yaml) -> Result<Self, String> {
        Ok(Self::new(parse_steps(yaml)?))
    }
}

impl Handler for Script {
    fn call(&self, fm: &mut Frame, event: &mut KeyEvent<'_>) -> Result<(), Cause> {
        let key = event.key().to_string();
        let vars = Vars {
            key: &key,
            it: None,
        };
        run_steps(&self.steps, fm, event, &vars)
    }

    fn name(&self) -> &str {
        "script"
    }
}

fn run_steps(
    steps: &[Step],
    fm: &mut Frame,
    event: &mut KeyEvent<'_>,
    vars: &Vars<'_>,
) -> Result<(), Cause> {
    for step in steps {
        run_step(step, fm, event, vars)?;
    }
    Ok(())
}

fn run_step(
    step: &Step,
    fm: &mut Frame,
    event: &mut KeyEvent<'_>,
    vars: &Vars<'_>,
) -> Result<(), Cause> {
    match step {
        Step::Put(Value::String(s)) if s == "$it" && vars.it.is_some() => {
            fm.put(vars.it.cloned().unwrap_or_default())
        }
        Step::Put(Value::String(s)) => fm.put(Value::String(vars.expand(s))),
        Step::Put(v) => fm.put(v.clone()),
        Step::Echo(text) => fm.echo(&vars.expand(text)),
        Step::Print(text) => fm.print(&vars.expand(text)),
        Step::Eprint(text) => fm.eprint(&vars.expand(text)),
        Step::Note(text) => {
            event.state().add_note(vars.expand(text));
            Ok(())
        }
        Step::Insert(text) => {
            let text = vars.expand(text);
            event.state().buffer.insert_at_dot(&text);
            Ok(())
        }
        Step::Mode(name) => {
            if event.state().enter_mode(name) {
                Ok(())
            } else {
                Err(Cause::fail(format!("no such mode: {}", name)))
            }
        }
        Step::ResetMode => {
            event.state().set_mode(None);
            Ok(())
        }
        Step::CommitCode => {
            event.commit_code();
            Ok(())
        }
        Step::CommitEof => {
            event.commit_eof();
            Ok(())
        }
        Step::Raise(action) => Err(Cause::Control(*action)),
        Step::Fail(message) => Err(Cause::Fail(vars.expand(message))),
        Step::Break => Err(Cause::Break),
        Step::Continue => Err(Cause::Continue),
        Step::Each { items, body } => builtins::each(fm, items, |child, item| {
            let vars = Vars {
                key: vars.key,
                it: Some(item),
            };
            run_steps(body, child, event, &vars)
        }),
        Step::SleepMs(ms) => {
            thread::sleep(Duration::from_millis(*ms));
            Ok(())
        }
    }
}

fn parse_steps(yaml: &Yaml) -> Result<Vec<Step>, String> {
    match yaml {
        Yaml::Sequence(items) => items.iter().map(parse_step).collect(),
        other => Ok(vec![parse_step(other)?]),
    }
}

fn parse_step(yaml: &Yaml) -> Result<Step, String> {
    match yaml {
        Yaml::String(name) => match name.as_str() {
            "commit-code" => Ok(Step::CommitCode),
            "commit-eof" => Ok(Step::CommitEof),
            "reset-mode" => Ok(Step::ResetMode),
            "break" => Ok(Step::Break),
            "continue" => Ok(Step::Continue),
            other => Err(format!("unknown step: {}", other)),
        },
        Yaml::Mapping(map) if map.len() == 1 => {
            let Some((Yaml::String(name), arg)) = map.iter().next() else {
                return Err("step name must be a string".to_string());
            };
            parse_step_with_arg(name, arg)
        }
        _ => Err(format!("invalid step: {}", describe(yaml))),
    }
}

fn parse_step_with_arg(name: &str, arg: &Yaml) -> Result<Step, String> {
    match name {
        "put" => Ok(Step::Put(value::from_yaml(arg.clone())?)),
        "echo" => Ok(Step::Echo(text_arg(name, arg)?)),
        "print" => Ok(Step::Print(text_arg(name, arg)?)),
        "eprint" => Ok(Step::Eprint(text_arg(name, arg)?)),
        "note" => Ok(Step::Note(text_arg(name, arg)?)),
        "insert" => Ok(Step::Insert(text_arg(name, arg)?)),
        "mode" => Ok(Step::Mode(text_arg(name, arg)?)),
        "fail" => Ok(Step::Fail(text_arg(name, arg)?)),
        "raise" => match text_arg(name, arg)?.as_str() {
            "commit-code" => Ok(Step::Raise(Action::CommitCode)),
            "commit-eof" => Ok(Step::Raise(Action::CommitEof)),
            other => Err(format!("raise: not an action: {}", other)),
        },
        "sleep-ms" => arg
            .as_u64()
            .map(Step::SleepMs)
            .ok_or_else(|| "sleep-ms: expected a number".to_string()),
        "each" => {
            let items = match arg.get("items") {
                Some(Yaml::Sequence(items)) => items
                    .iter()
                    .map(|item| value::from_yaml(item.clone()))
                    .collect::<Result<Vec<_>, _>>()?,
                _ => return Err("each: expected a list under 'items'".to_string()),
            };
            let body = match arg.get("do") {
                Some(steps) => parse_steps(steps)?,
                None => return Err("each: expected steps under 'do'".to_string()),
            };
            Ok(Step::Each { items, body })
        }
        other => Err(format!("unknown step: {}", other)),
    }
}

/// Scalar step argument as text
fn text_arg(name: &str, arg: &Yaml) -> Result<String, String> {
    match arg {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        other => Err(format!("{}: expected text, got {}", name, describe(other))),
    }
}

fn describe(yaml: &Yaml) -> &'static str {
    match yaml {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a list",
        Yaml::Mapping(_) => "a map",
        Yaml::Tagged(_) => "a tagged value",
    }
}
