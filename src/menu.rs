//! Main menu: a one-time mode choice made before the game starts.
//!
//! Number keys select directly; Up/Down move a highlight that Enter
//! confirms. The choice is not revisitable mid-session.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::term::{CellStyle, FrameBuffer, Rgb, TerminalRenderer};
use crate::types::ModeKind;

/// The menu outcome: a mode to play, or quit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Normal,
    Fun,
    Hard,
    Mixed,
    Quit,
}

impl Selection {
    /// The mode to start, or `None` for quit.
    pub fn mode_kind(self) -> Option<ModeKind> {
        match self {
            Selection::Normal => Some(ModeKind::Normal),
            Selection::Fun => Some(ModeKind::Fun),
            Selection::Hard => Some(ModeKind::Hard),
            Selection::Mixed => Some(ModeKind::Mixed),
            Selection::Quit => None,
        }
    }
}

const OPTIONS: [&str; 5] = [
    "Normal Mode",
    "Fun Mode",
    "Hard Mode",
    "Mixed Mode (not available)",
    "Quit",
];

/// Map a highlight index to its selection; out-of-range indices fall back
/// to Normal rather than failing.
fn selection_at(index: usize) -> Selection {
    match index {
        0 => Selection::Normal,
        1 => Selection::Fun,
        2 => Selection::Hard,
        3 => Selection::Mixed,
        4 => Selection::Quit,
        _ => Selection::Normal,
    }
}

fn render(term: &mut TerminalRenderer, highscore: u32, highlight: usize) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);

    let title = CellStyle {
        fg: Rgb::new(240, 220, 80),
        bg: Rgb::new(0, 0, 0),
        bold: true,
    };
    let plain = CellStyle::default();
    let selected = CellStyle {
        fg: Rgb::new(80, 220, 220),
        bg: Rgb::new(0, 0, 0),
        bold: true,
    };

    let x = w.saturating_sub(34) / 2;
    let y = h.saturating_sub(12) / 2;

    fb.put_str(x, y, "===== BLOCKFALL =====", title);
    fb.put_str(x, y + 2, &format!("Best score: {highscore}"), plain);

    for (i, option) in OPTIONS.iter().enumerate() {
        let style = if i == highlight { selected } else { plain };
        let marker = if i == highlight { "> " } else { "  " };
        fb.put_str(
            x,
            y + 4 + i as u16,
            &format!("{marker}{}. {option}", i + 1),
            style,
        );
    }

    fb.put_str(x, y + 10, "Number keys, or arrows + Enter.", plain);
    term.draw(&fb)
}

/// Run the menu loop until the player picks an option.
pub fn run(term: &mut TerminalRenderer, highscore: u32) -> Result<Selection> {
    let mut highlight = 0usize;

    loop {
        render(term, highscore, highlight)?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('1') => return Ok(Selection::Normal),
            KeyCode::Char('2') => return Ok(Selection::Fun),
            KeyCode::Char('3') => return Ok(Selection::Hard),
            KeyCode::Char('4') => return Ok(Selection::Mixed),
            KeyCode::Char('5') | KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(Selection::Quit)
            }
            KeyCode::Up => highlight = highlight.saturating_sub(1),
            KeyCode::Down => highlight = (highlight + 1).min(OPTIONS.len() - 1),
            KeyCode::Enter => return Ok(selection_at(highlight)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_mode_mapping() {
        assert_eq!(Selection::Normal.mode_kind(), Some(ModeKind::Normal));
        assert_eq!(Selection::Fun.mode_kind(), Some(ModeKind::Fun));
        assert_eq!(Selection::Hard.mode_kind(), Some(ModeKind::Hard));
        assert_eq!(Selection::Mixed.mode_kind(), Some(ModeKind::Mixed));
        assert_eq!(Selection::Quit.mode_kind(), None);
    }

    #[test]
    fn test_selection_at_falls_back_to_normal() {
        assert_eq!(selection_at(2), Selection::Hard);
        assert_eq!(selection_at(4), Selection::Quit);
        assert_eq!(selection_at(99), Selection::Normal);
    }
}
