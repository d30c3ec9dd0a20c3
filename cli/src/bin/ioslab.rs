// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! Interactive trainer frontend: a readline loop that feeds lines to the
//! command processor and threads the returned snapshot into the next prompt.

use colored::Colorize;
use device::{DeviceKind, DeviceState};
use ioslab_cli::processor::Processor;
use rustyline::Editor;
use rustyline::config::{ColorMode, Config};
use rustyline::error::ReadlineError;
use rustyline::history::MemHistory;

// macro to print errors in the cli binary
macro_rules! print_err {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*).red();
        println!("{msg}");
    }};
}

fn rustyline_editor_config() -> Config {
    Config::builder()
        .auto_add_history(false)
        .history_ignore_dups(true)
        .expect("Editor config:'history ignore dups' failed")
        .max_history_size(400)
        .expect("Editor config:'max-history size' failed")
        .color_mode(ColorMode::Enabled)
        .build()
}

#[rustfmt::skip]
fn greetings(state: &DeviceState) {
    println!("\n{}.", "IOS lab trainer".bright_white().bold());
    println!("Connected to {} ({:?}). Type commands as on a real console.\n",
             state.hostname, state.device);
}

fn initial_state() -> DeviceState {
    match std::env::args().nth(1).as_deref() {
        Some("switch") => DeviceState::initial(DeviceKind::Switch, "Switch"),
        _ => DeviceState::initial(DeviceKind::Router, "Router"),
    }
}

fn main() -> Result<(), ReadlineError> {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_level(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let processor = Processor::new();
    let mut state = initial_state();
    let mut editor: Editor<(), MemHistory> =
        Editor::with_history(rustyline_editor_config(), MemHistory::new())?;

    greetings(&state);

    loop {
        match editor.readline(&state.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                let response = processor.process(&state, &line);
                if response.valid {
                    if !response.output.is_empty() {
                        println!("{}", response.output);
                    }
                } else {
                    print_err!("{}", response.output);
                }
                state = response.new_state;
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                print_err!("terminal error: {e}");
                break;
            }
        }
    }
    Ok(())
}
