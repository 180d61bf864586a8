//! Interactive terminal simulator over a [`TextCanvas`].
//!
//! Uses `crossterm` raw mode and the alternate screen; the canvas is
//! repainted after every key press. Inverted cells are shown reversed.

#![allow(missing_docs)]

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use super::Gesture;
use crate::display::canvas::TextCanvas;
use crate::menu::engine::MenuEngine;

// ──────────────────── key mapping ────────────────────

/// What a key press asks the simulator to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Gesture(Gesture),
    Quit,
    Ignore,
}

#[must_use]
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Gesture(Gesture::Down),
        KeyCode::Up | KeyCode::Char('k') => KeyAction::Gesture(Gesture::Up),
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Gesture(Gesture::Enter),
        _ => KeyAction::Ignore,
    }
}

// ──────────────────── frame rendering ────────────────────

/// Canvas cells row by row as `(char, inverted)` pairs.
#[must_use]
pub fn framed_rows(canvas: &TextCanvas) -> Vec<Vec<(char, bool)>> {
    let (columns, rows) = canvas.grid_size();
    (0..rows)
        .map(|row| {
            (0..columns)
                .filter_map(|column| canvas.cell(column, row))
                .map(|cell| (cell.ch, cell.inverted))
                .collect()
        })
        .collect()
}

fn paint(out: &mut impl Write, canvas: &TextCanvas, status: &str) -> io::Result<()> {
    let (columns, _) = canvas.grid_size();
    let border = "─".repeat(usize::from(columns));
    queue!(out, Clear(ClearType::All), MoveTo(0, 0), Print(format!("┌{border}┐")))?;
    let mut line = 1u16;
    for row in framed_rows(canvas) {
        queue!(out, MoveTo(0, line), Print('│'))?;
        for (ch, inverted) in row {
            if inverted {
                queue!(out, SetAttribute(Attribute::Reverse), Print(ch), SetAttribute(Attribute::Reset))?;
            } else {
                queue!(out, Print(ch))?;
            }
        }
        queue!(out, Print('│'))?;
        line += 1;
    }
    queue!(
        out,
        MoveTo(0, line),
        Print(format!("└{border}┘")),
        MoveTo(0, line + 1),
        Print(status),
        MoveTo(0, line + 2),
        Print("↑/k up  ↓/j down  enter/space select  q quit"),
    )?;
    out.flush()
}

// ──────────────────── main loop ────────────────────

/// Run until the user quits (q/Esc/Ctrl-C).
pub fn run(engine: &mut MenuEngine<TextCanvas>) -> io::Result<()> {
    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = run_inner(&mut stdout, engine);

    let _ = execute!(stdout, Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run_inner(stdout: &mut io::Stdout, engine: &mut MenuEngine<TextCanvas>) -> io::Result<()> {
    engine.draw_menu();
    paint(stdout, engine.display(), &status_line(engine, None))?;

    loop {
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match map_key(key.code, key.modifiers) {
            KeyAction::Quit => return Ok(()),
            KeyAction::Ignore => {}
            KeyAction::Gesture(gesture) => {
                gesture.apply(engine);
                paint(stdout, engine.display(), &status_line(engine, Some(gesture)))?;
            }
        }
    }
}

/// One-line summary of the cursor, shown under the frame.
#[must_use]
pub fn status_line(engine: &MenuEngine<TextCanvas>, last: Option<Gesture>) -> String {
    let last = last.map_or_else(|| "-".to_string(), |g| g.to_string());
    format!(
        "table {} item {} offset {} mode {:?} last {last}",
        engine.current_table().index(),
        engine.current_index(),
        engine.scroll_offset(),
        engine.edit_mode(),
    )
}
