//! Iteration builtins that call a function once per element
//!
//! The per-element function may stop the loop with [`Cause::Break`] or skip
//! ahead with [`Cause::Continue`]; neither is an error. Any other failure
//! propagates to the caller.

use std::ops::ControlFlow;

use super::cause::Cause;
use super::frame::Frame;

/// Call `f` for each item, each call in a forked frame
pub fn each<I, F>(fm: &mut Frame, items: I, mut f: F) -> Result<(), Cause>
where
    I: IntoIterator,
    F: FnMut(&mut Frame, I::Item) -> Result<(), Cause>,
{
    for item in items {
        let mut child = fm.fork("fn of each")?;
        let result = f(&mut child, item);
        child.close();
        if loop_control(result)?.is_break() {
            break;
        }
    }
    Ok(())
}

/// awk-style iteration: for each line, call `f` with the line followed by
/// its fields
///
/// Fields come from trimming spaces and tabs off the line and splitting on
/// runs of them.
pub fn eawk<I, S, F>(fm: &mut Frame, lines: I, mut f: F) -> Result<(), Cause>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&mut Frame, &[&str]) -> Result<(), Cause>,
{
    each(fm, lines, |child, line| {
        let line = line.as_ref();
        let mut args = vec![line];
        args.extend(fields(line));
        f(child, &args)
    })
}

/// Split a line into whitespace-separated fields
pub fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.trim_matches(|c: char| c == ' ' || c == '\t')
        .split([' ', '\t'])
        .filter(|field| !field.is_empty())
}

/// Map the result of one per-element call onto the loop
fn loop_control(result: Result<(), Cause>) -> Result<ControlFlow<()>, Cause> {
    match result {
        Ok(()) | Err(Cause::Continue) => Ok(ControlFlow::Continue(())),
        Err(Cause::Break) => Ok(ControlFlow::Break(())),
        Err(cause) => Err(cause),
    }
}
