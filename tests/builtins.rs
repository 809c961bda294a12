//! Iteration builtin tests: each, eawk, Break and Continue

use std::sync::Arc;

use serde_json::json;

use chordline::editor::Notes;
use chordline::eval::builtins::{each, eawk, fields};
use chordline::eval::{Cause, ExecutionFrame, Frame, Outcome};
use chordline::Action;

fn run<F>(f: F) -> (Outcome, Vec<String>)
where
    F: FnOnce(&mut Frame) -> Result<(), Cause>,
{
    let notes = Arc::new(Notes::new());
    let exec = ExecutionFrame::new(Arc::from("[test]"), notes.clone()).unwrap();
    let outcome = exec.run(f);
    (outcome, notes.snapshot())
}

// ========================================================================
// each
// ========================================================================

#[test]
fn test_break_stops_iteration() {
    let mut seen = Vec::new();
    let (outcome, _) = run(|fm| {
        each(fm, ["a", "b", "c"], |_, item| {
            if item == "b" {
                return Err(Cause::Break);
            }
            seen.push(item);
            Ok(())
        })
    });
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(seen, vec!["a"]);
}

#[test]
fn test_continue_skips_rest_of_item() {
    let mut seen = Vec::new();
    let (outcome, _) = run(|fm| {
        each(fm, 1..=5, |_, n| {
            if n % 2 == 0 {
                return Err(Cause::Continue);
            }
            seen.push(n);
            Ok(())
        })
    });
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(seen, vec![1, 3, 5]);
}

#[test]
fn test_other_failures_propagate() {
    let mut calls = 0;
    let (outcome, notes) = run(|fm| {
        each(fm, ["a", "b", "c"], |child, item| {
            calls += 1;
            child.echo(item)?;
            if item == "b" {
                return Err(Cause::fail("bad item"));
            }
            Ok(())
        })
    });
    assert_eq!(outcome, Outcome::Failed("bad item".to_string()));
    assert_eq!(calls, 2);
    assert_eq!(notes, vec!["[bytes out] a", "[bytes out] b"]);
}

#[test]
fn test_action_signal_escapes_the_loop() {
    let (outcome, _) = run(|fm| {
        each(fm, [1, 2], |_, _| Err(Cause::Control(Action::CommitCode)))
    });
    assert_eq!(outcome, Outcome::ControlAction(Action::CommitCode));
}

#[test]
fn test_each_output_goes_to_caller_ports() {
    let (outcome, notes) = run(|fm| {
        fm.echo("before")?;
        each(fm, [json!(1), json!("two")], |child, item| {
            assert_eq!(child.label(), "fn of each");
            child.put(item)
        })?;
        fm.echo("after")
    });
    assert_eq!(outcome, Outcome::Completed);

    let values: Vec<_> = notes.iter().filter(|n| n.starts_with("[value out]")).collect();
    assert_eq!(values, vec!["[value out] 1", "[value out] \"two\""]);
    let lines: Vec<_> = notes.iter().filter(|n| n.starts_with("[bytes out]")).collect();
    assert_eq!(lines, vec!["[bytes out] before", "[bytes out] after"]);
}

#[test]
fn test_each_over_nothing() {
    let mut calls = 0;
    let (outcome, notes) = run(|fm| {
        each(fm, Vec::<i32>::new(), |_, _| {
            calls += 1;
            Ok(())
        })
    });
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(calls, 0);
    assert!(notes.is_empty());
}

// ========================================================================
// eawk
// ========================================================================

#[test]
fn test_eawk_passes_line_then_fields() {
    let mut calls: Vec<Vec<String>> = Vec::new();
    let (outcome, _) = run(|fm| {
        eawk(fm, ["  alice\t 30  ", "bob 25", ""], |_, args| {
            calls.push(args.iter().map(|a| a.to_string()).collect());
            Ok(())
        })
    });
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(
        calls,
        vec![
            vec!["  alice\t 30  ".to_string(), "alice".into(), "30".into()],
            vec!["bob 25".to_string(), "bob".into(), "25".into()],
            vec![String::new()],
        ]
    );
}

#[test]
fn test_eawk_break_and_continue() {
    let mut names = Vec::new();
    let (outcome, _) = run(|fm| {
        eawk(fm, ["# header", "ann 1", "stop", "bea 2"], |_, args| {
            match args.get(1).copied() {
                Some("#") => Err(Cause::Continue),
                Some("stop") => Err(Cause::Break),
                Some(name) => {
                    names.push(name.to_string());
                    Ok(())
                }
                None => Ok(()),
            }
        })
    });
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(names, vec!["ann"]);
}

#[test]
fn test_fields_split_on_space_and_tab_runs() {
    assert_eq!(fields("a  b\t\tc").collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(fields(" \t ").count(), 0);
    // Only spaces and tabs separate fields
    assert_eq!(fields("a,b c\u{a0}d").collect::<Vec<_>>(), vec!["a,b", "c\u{a0}d"]);
}
