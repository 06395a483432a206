//! Terminal Calculator
//!
//! Drives the calculator from real keystrokes in raw mode. Keys map through
//! the same adapter the browser host uses; `t` toggles the theme, which is
//! persisted to a JSON file in the temp directory. `q` or Ctrl+C quits.
//!
//! Run with: cargo run -p calcpad --example calculator_terminal [config.json]

use std::io::{self, Write};

use calcpad::prelude::*;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing_subscriber::EnvFilter;

/// Browser-style key name for a terminal key event
fn key_name(event: &KeyEvent) -> Option<String> {
    match event.code {
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Enter => Some("Enter".to_string()),
        KeyCode::Esc => Some("Escape".to_string()),
        KeyCode::Backspace => Some("Backspace".to_string()),
        _ => None,
    }
}

fn print_display(display: &Display) {
    let mut out = io::stdout();
    let _ = write!(
        out,
        "\r\x1b[2K{:>24} | {:>24}",
        display.previous, display.current
    );
    let _ = out.flush();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CalcpadConfig::from_json_file(path)?,
        None => CalcpadConfig::default(),
    };

    let store = FileStore::new(std::env::temp_dir().join("calcpad-preferences.json"));
    let mut themes = ThemeStore::with_key(store, &config.theme_key);
    let theme = themes.init();

    println!("theme: {theme}");
    println!("calcpad: digits . + - * / Enter Esc Backspace, t = theme, q = quit");
    enable_raw_mode()?;

    let result = run(&config, &mut themes);

    disable_raw_mode()?;
    println!();
    result
}

fn run(
    config: &CalcpadConfig,
    themes: &mut ThemeStore<FileStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut calc = Calculator::with_config(print_display, config);
    calc.render();

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('q')
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Ok(());
        }
        if key.code == KeyCode::Char('t') {
            let theme = themes.toggle()?;
            print!("\r\x1b[2Ktheme: {theme}\r\n");
            calc.render();
        } else if let Some(token) = key_name(&key).as_deref().and_then(key_to_token) {
            calc.press(token);
        }
    }
}
