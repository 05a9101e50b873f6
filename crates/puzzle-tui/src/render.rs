use crate::app::{App, ScreenState};
use crate::board::{self, CellStyle, Cursor};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use puzzle_core::{Optimum, PuzzleKind};
use std::io;

/// Width of one cell, borders excluded
const CELL_WIDTH: usize = 5;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;

    match app.screen_state {
        ScreenState::Playing => render_game_screen(stdout, app, term_width, term_height)?,
        ScreenState::Solved => render_solved_screen(stdout, app, term_width)?,
        ScreenState::Help => render_help_screen(stdout, app, term_width, term_height)?,
        ScreenState::History => render_history_screen(stdout, app, term_width, term_height)?,
    }

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let (rows, cols) = board::dimensions(app.kind());
    let grid_width = (cols * (CELL_WIDTH + 1) + 1) as u16;
    let grid_height = (rows * 2 + 1) as u16;

    // Center the grid horizontally, leave room for info panel
    let total_width = grid_width + 30;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > grid_height + 12 { 2 } else { 1 };

    render_grid(stdout, app, start_x, start_y)?;

    let info_x = start_x + grid_width + 3;
    render_info_panel(stdout, app, info_x, start_y)?;

    let status_y = start_y + grid_height + 1;
    let status = board::status_lines(app.game.session());
    for (i, line) in status.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(start_x, status_y + i as u16),
            SetForegroundColor(app.theme.fg),
            Print(line)
        )?;
    }

    let controls_y = status_y + status.len() as u16 + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let (rows, cols) = board::dimensions(app.kind());

    // +-----+-----+
    // |  5  |  ·  |
    // +-----+-----+
    let separator = format!("+{}", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(cols));

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.border),
        Print(&separator)
    )?;

    for row in 0..rows {
        let cell_y = y + 1 + row as u16 * 2;
        execute!(stdout, MoveTo(x, cell_y))?;

        for col in 0..cols {
            execute!(stdout, SetForegroundColor(theme.border), Print("|"))?;
            render_cell(stdout, app, Cursor::new(row, col))?;
        }
        execute!(
            stdout,
            SetForegroundColor(theme.border),
            Print("|"),
            MoveTo(x, cell_y + 1),
            Print(&separator)
        )?;
    }

    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Cursor) -> io::Result<()> {
    let theme = &app.theme;
    let view = board::cell_view(app.game.session(), pos);
    let is_cursor = pos == app.cursor;

    let accent = theme.accent(app.kind().accent());
    let (fg, bg) = match view.style {
        CellStyle::Plain => (theme.fg, theme.bg),
        CellStyle::On => (theme.bg, theme.on),
        CellStyle::Accent => (theme.bg, accent),
        CellStyle::Wall => (theme.border, theme.wall),
        CellStyle::Current => (theme.bg, theme.success),
    };
    let bg = if is_cursor { theme.selected_bg } else { bg };

    execute!(
        stdout,
        SetForegroundColor(fg),
        SetBackgroundColor(bg),
        Print(centered(&view.text, CELL_WIDTH)),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let kind = app.kind();

    let title = match app.game.day() {
        Some(day) => format!("Daily Puzzle {}", day),
        None => "Daily Puzzle (practice)".to_string(),
    };
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print(title),
        MoveTo(x, y + 1),
        SetForegroundColor(theme.accent(kind.accent())),
        Print(format!("{} {}", kind.accent().emoji(), kind.name()))
    )?;

    let score_label = match kind {
        PuzzleKind::Light => "Bulbs",
        PuzzleKind::Spread => "Seeds",
        _ => "Moves",
    };
    execute!(
        stdout,
        MoveTo(x, y + 3),
        SetForegroundColor(theme.info),
        Print(format!("{}: ", score_label)),
        SetForegroundColor(theme.fg),
        Print(app.score())
    )?;

    let best = match app.optimum {
        Some(Optimum::Moves(n)) => n.to_string(),
        Some(Optimum::Unreachable) | Some(Optimum::LimitReached) => "?".to_string(),
        None => "searching...".to_string(),
    };
    execute!(
        stdout,
        MoveTo(x, y + 4),
        SetForegroundColor(theme.info),
        Print("Best: "),
        SetForegroundColor(theme.fg),
        Print(best)
    )?;

    let tools = board::tools(kind);
    if !tools.is_empty() {
        execute!(
            stdout,
            MoveTo(x, y + 6),
            SetForegroundColor(theme.info),
            Print("Tool:")
        )?;
        for (i, name) in tools.iter().enumerate() {
            let color = if i == app.tool { theme.key } else { theme.info };
            let marker = if i == app.tool { ">" } else { " " };
            execute!(
                stdout,
                MoveTo(x, y + 7 + i as u16),
                SetForegroundColor(color),
                Print(format!("{} {} {}", marker, i + 1, name))
            )?;
        }
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    let controls = [
        ("hjkl/Arrows", "Move"),
        ("Enter", "Press"),
        ("1-9", "Tool"),
        ("u", "Undo"),
        ("Ctrl+R", "Redo"),
        ("R", "Reset"),
        ("?", "Help"),
        ("H", "History"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    // Display in columns of 4
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 4;
        let row = i % 4;
        let cx = x + (col as u16) * 20;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>11}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}

fn render_solved_screen(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let Some(report) = app.report.as_ref() else {
        return Ok(());
    };

    let title_color = if report.perfect { theme.on } else { theme.success };
    let title_x = term_width.saturating_sub(report.title.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(title_x, 2),
        SetForegroundColor(title_color),
        Print(&report.title)
    )?;

    let mut y = 4;
    for line in wrap_text(&report.message, 60) {
        let line_x = term_width.saturating_sub(line.chars().count() as u16) / 2;
        execute!(
            stdout,
            MoveTo(line_x, y),
            SetForegroundColor(theme.fg),
            Print(line)
        )?;
        y += 1;
    }

    y += 1;
    let share_x = term_width.saturating_sub(32) / 2;
    for line in report.share_text.lines() {
        execute!(
            stdout,
            MoveTo(share_x, y),
            SetForegroundColor(theme.info),
            Print(line)
        )?;
        y += 1;
    }

    let instr = "The share text is printed when you quit. 'H' history, 'Esc' board, 'q' quit";
    let instr_x = term_width.saturating_sub(instr.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(instr_x, y + 1),
        SetForegroundColor(theme.key),
        Print(instr)
    )?;

    Ok(())
}

fn render_help_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    let title = format!("=== HOW TO PLAY: {} ===", app.kind().name().to_uppercase());
    let title_x = term_width.saturating_sub(title.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(title_x, 1),
        SetForegroundColor(theme.key),
        Print(&title)
    )?;

    let width = (term_width as usize).saturating_sub(8).clamp(20, 76);
    let x = term_width.saturating_sub(width as u16) / 2;
    let max_y = term_height.saturating_sub(2);
    let mut y = 3;
    for text_line in app.help.lines() {
        let wrapped = wrap_text(text_line, width);
        if wrapped.is_empty() {
            y += 1;
        }
        for line in wrapped {
            if y >= max_y {
                break;
            }
            execute!(
                stdout,
                MoveTo(x, y),
                SetForegroundColor(theme.fg),
                Print(line)
            )?;
            y += 1;
        }
    }

    execute!(
        stdout,
        MoveTo(x, max_y),
        SetForegroundColor(theme.info),
        Print("Press any key to return")
    )?;

    Ok(())
}

fn render_history_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    let title = "=== PUZZLE HISTORY ===";
    let title_x = term_width.saturating_sub(title.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(title_x, 1),
        SetForegroundColor(theme.key),
        Print(title),
        MoveTo(4, 3),
        SetForegroundColor(theme.info),
        Print("Select a day and press Enter to play it")
    )?;

    if app.history.is_empty() {
        execute!(
            stdout,
            MoveTo(4, 5),
            SetForegroundColor(theme.fg),
            Print("No earlier puzzles yet.")
        )?;
        return Ok(());
    }

    let header_y = 5;
    let visible_rows = (term_height.saturating_sub(header_y + 3)) as usize;
    // Keep the selected row on screen
    let first = app.history_scroll.saturating_sub(visible_rows.saturating_sub(1));

    for (i, entry) in app.history.iter().enumerate().skip(first).take(visible_rows) {
        let y = header_y + (i - first) as u16;
        let selected = i == app.history_scroll;
        let bg = if selected { theme.selected_bg } else { theme.bg };
        let prefix = if selected { ">" } else { " " };
        let current = app.game.day() == Some(entry.day);

        execute!(
            stdout,
            MoveTo(4, y),
            SetBackgroundColor(bg),
            SetForegroundColor(theme.fg),
            Print(format!("{} {:>6}  ", prefix, entry.day.to_string())),
            SetForegroundColor(theme.accent(entry.accent)),
            Print(format!("{} {:<10}", entry.accent.emoji(), entry.kind.name())),
            SetForegroundColor(if current { theme.success } else { theme.info }),
            Print(if current { " (playing)" } else { "" }),
            SetBackgroundColor(theme.bg)
        )?;
    }

    execute!(
        stdout,
        MoveTo(4, term_height.saturating_sub(2)),
        SetForegroundColor(Color::DarkGrey),
        Print("j/k to move, Enter to play, Esc to go back")
    )?;

    Ok(())
}

/// Pad `text` to `width` columns, centered
fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let left = (width - len) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - len - left))
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.chars().count() + word.chars().count() + 1 > max_width && !current.is_empty() {
            lines.push(current);
            current = String::new();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered() {
        assert_eq!(centered("6", 5), "  6  ");
        assert_eq!(centered("inv", 5), " inv ");
        assert_eq!(centered("", 5), "     ");
        assert_eq!(centered("toolong", 5), "toolo");
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }
}
