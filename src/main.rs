//! chordline: read lines through configurable key bindings
//!
//! Notifications produced by key handlers are printed as they arrive; each
//! committed line is printed after them.

use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use chordline::binding::BindingContext;
use chordline::cli::{CliArgs, InputMode};
use chordline::editor::{App, KeySource, Notes, ReadResult, ScriptedKeys, TerminalKeys};
use chordline::keymap::{load_default_keymap, Keymap};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let engine = args.load_engine_config();
    let startup = args.into_config(engine).map_err(anyhow::Error::msg)?;

    chordline::tracing::init(&startup.engine.log_level);

    let keymap = load_default_keymap(startup.engine.keymap_path().as_deref());
    let ctx = startup.engine.binding_context();
    tracing::info!(bindings = keymap.len(), source = ctx.source(), "starting");

    match startup.input {
        InputMode::Replay(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read key file {}", path.display()))?;
            let mut keys = ScriptedKeys::parse(&text)
                .with_context(|| format!("Invalid key file {}", path.display()))?;
            run(keymap, ctx, &mut keys, "\n")
        }
        InputMode::Terminal => {
            // Raw mode: the terminal no longer translates \n
            let mut keys = TerminalKeys::new().context("Failed to enable raw mode")?;
            run(keymap, ctx, &mut keys, "\r\n")
        }
    }
}

fn run(
    keymap: Keymap,
    ctx: BindingContext,
    keys: &mut dyn KeySource,
    newline: &'static str,
) -> Result<()> {
    let notes = Arc::new(Notes::with_sink(move |note| print_line(note, newline)));
    let mut app = App::new(keymap, notes, ctx);

    loop {
        match app.read_code(keys)? {
            ReadResult::Code(code) => {
                print_line(&code, newline);
                app.notes().clear();
            }
            ReadResult::Eof => break,
        }
    }

    Ok(())
}

fn print_line(text: &str, newline: &str) {
    let mut out = io::stdout().lock();
    if let Err(e) = write!(out, "{}{}", text, newline).and_then(|()| out.flush()) {
        tracing::warn!("Failed to write to stdout: {}", e);
    }
}
