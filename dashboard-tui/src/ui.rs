//! Screen drawing.
//!
//! The whole screen is redrawn from [`App`] on every frame; sort and filter
//! are re-evaluated each time through [`DataTable::visible_rows`].
//!
//! [`DataTable::visible_rows`]: dashboard_lib::table::DataTable::visible_rows

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use dashboard_lib::notify::Severity;
use dashboard_lib::route::Route;
use dashboard_lib::theme::{Palette, Rgb};
use dashboard_lib::{SortDirection, SortKey};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, Field, Focus};

const SIDEBAR_WIDTH: u16 = 22;
const NAVBAR_HEIGHT: u16 = 3;
const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 14;

const ID_WIDTH: u16 = 8;
const NAME_WIDTH: u16 = 24;

const DIALOG_WIDTH: u16 = 48;
const DIALOG_HEIGHT: u16 = 9;

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Truncates `text` to at most `width` terminal columns.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    if width > 0 {
        out.push('…');
    }
    out
}

#[derive(Clone, Copy)]
struct Style {
    fg: Rgb,
    bg: Rgb,
    bold: bool,
}

impl Style {
    fn new(fg: Rgb, bg: Rgb) -> Self {
        Self { fg, bg, bold: false }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

struct Frame<'a, W: Write> {
    out: &'a mut W,
    width: u16,
    height: u16,
    palette: Palette,
}

impl<W: Write> Frame<'_, W> {
    fn fill(&mut self, x: u16, y: u16, w: u16, h: u16, bg: Rgb) -> io::Result<()> {
        let w = w.min(self.width.saturating_sub(x));
        let blank = " ".repeat(w as usize);
        for row in y..y.saturating_add(h).min(self.height) {
            queue!(self.out, MoveTo(x, row), SetBackgroundColor(color(bg)), Print(&blank))?;
        }
        Ok(())
    }

    /// Writes `text` at `(x, y)`, clipped to `max` columns and the screen.
    fn text(&mut self, x: u16, y: u16, max: u16, text: &str, style: Style) -> io::Result<()> {
        if y >= self.height || x >= self.width {
            return Ok(());
        }
        let max = max.min(self.width - x) as usize;
        let text = fit(text, max);
        queue!(
            self.out,
            MoveTo(x, y),
            SetForegroundColor(color(style.fg)),
            SetBackgroundColor(color(style.bg)),
        )?;
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        queue!(self.out, Print(text), SetAttribute(Attribute::Reset))
    }

    fn hline(&mut self, x: u16, y: u16, w: u16, bg: Rgb) -> io::Result<()> {
        let line = "─".repeat(w as usize);
        let style = Style::new(self.palette.border, bg);
        self.text(x, y, w, &line, style)
    }
}

pub fn render<W: Write>(out: &mut W, app: &App, width: u16, height: u16) -> io::Result<()> {
    let palette = app.theme.palette();
    let mut frame = Frame {
        out,
        width,
        height,
        palette,
    };

    frame.fill(0, 0, width, height, palette.background)?;

    if width < MIN_WIDTH || height < MIN_HEIGHT {
        let style = Style::new(palette.text, palette.background);
        return frame.text(0, 0, width, "Terminal too small", style);
    }

    render_sidebar(&mut frame, app)?;
    render_navbar(&mut frame, app)?;

    let area = Area {
        x: SIDEBAR_WIDTH + 2,
        y: NAVBAR_HEIGHT + 1,
        w: width - SIDEBAR_WIDTH - 3,
        h: height - NAVBAR_HEIGHT - 3,
    };
    match app.route {
        Route::Dashboard => render_table(&mut frame, app, area)?,
        Route::Settings => render_settings(&mut frame, app, area)?,
    }

    render_footer(&mut frame, app)?;

    if app.focus == Focus::Search {
        render_search_results(&mut frame, app)?;
    }
    if let Some(field) = app.dialog {
        render_dialog(&mut frame, app, field)?;
    }
    render_notices(&mut frame, app)
}

#[derive(Clone, Copy)]
struct Area {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

fn render_sidebar<W: Write>(frame: &mut Frame<'_, W>, app: &App) -> io::Result<()> {
    let p = frame.palette;
    frame.fill(0, 0, SIDEBAR_WIDTH, frame.height, p.surface)?;
    frame.text(2, 1, SIDEBAR_WIDTH - 3, "Dashboard", Style::new(p.primary, p.surface).bold())?;
    frame.hline(0, 2, SIDEBAR_WIDTH, p.surface)?;

    for (i, route) in Route::ALL.iter().enumerate() {
        let y = 4 + i as u16 * 2;
        let active = *route == app.route;
        let marker = if app.focus == Focus::Sidebar && i == app.sidebar_cursor {
            "› "
        } else {
            "  "
        };
        let style = if active {
            Style::new(p.primary, p.background).bold()
        } else {
            Style::new(p.text, p.surface)
        };
        let label = format!("{}{}", marker, route.title());
        frame.text(1, y, SIDEBAR_WIDTH - 2, &format!("{:<width$}", label, width = 19), style)?;
    }

    for y in 0..frame.height {
        frame.text(SIDEBAR_WIDTH - 1, y, 1, "│", Style::new(p.border, p.surface))?;
    }
    Ok(())
}

fn render_navbar<W: Write>(frame: &mut Frame<'_, W>, app: &App) -> io::Result<()> {
    let p = frame.palette;
    let x = SIDEBAR_WIDTH + 1;
    let w = frame.width - x;

    let focused = app.focus == Focus::Search;
    let (query, style) = if app.search_query.is_empty() && !focused {
        ("Search...".to_string(), Style::new(p.text_muted, p.background))
    } else {
        let cursor = if focused { "▏" } else { "" };
        (
            format!("{}{}", app.search_query, cursor),
            Style::new(p.text, p.background),
        )
    };
    frame.text(x + 1, 1, 3, "⌕ ", Style::new(p.primary, p.background))?;
    frame.text(x + 3, 1, 32, &query, style)?;

    let theme = if app.theme.is_dark() { "☾ dark" } else { "☀ light" };
    let user = app.profile.profile();
    let right = format!("{}   {} {}", theme, user.initials, user.name);
    let right_width = (right.width() as u16).min(w.saturating_sub(38));
    let right_x = frame.width - right_width - 1;
    frame.text(right_x, 1, right_width, &right, Style::new(p.text, p.background))?;

    frame.hline(x, 2, w, p.background)
}

fn render_table<W: Write>(frame: &mut Frame<'_, W>, app: &App, area: Area) -> io::Result<()> {
    let p = frame.palette;
    let table = &app.table;
    let rows = table.visible_rows();

    let filter = table.filter_text();
    if filter.is_empty() {
        frame.text(area.x, area.y, area.w, "Filter data...", Style::new(p.text_muted, p.background))?;
    } else {
        frame.text(area.x, area.y, area.w, filter, Style::new(p.text, p.background))?;
    }
    let count = format!("{} of {} rows", rows.len(), table.len());
    let count_x = area.x + area.w.saturating_sub(count.width() as u16);
    frame.text(count_x, area.y, area.w, &count, Style::new(p.text_muted, p.background))?;

    let header_y = area.y + 2;
    frame.fill(area.x, header_y, area.w, 1, p.surface)?;
    let sort = table.sort_config();
    let mut x = area.x;
    for (i, key) in SortKey::ALL.iter().enumerate() {
        let width = column_width(*key, area.w);
        let arrow = match (sort.key, sort.direction) {
            (Some(k), SortDirection::Asc) if k == *key => "▲",
            (Some(k), SortDirection::Desc) if k == *key => "▼",
            _ => "↕",
        };
        let label = format!(" {} {}", key.header(), arrow);
        let style = if app.focus == Focus::Page && app.dialog.is_none() && i == app.column_cursor {
            Style::new(p.background, p.primary).bold()
        } else {
            Style::new(p.text, p.surface).bold()
        };
        frame.text(x, header_y, width, &label, style)?;
        x += width;
    }

    let body_y = header_y + 1;
    let visible = area.h.saturating_sub(3) as usize;
    if rows.is_empty() {
        frame.text(area.x + 1, body_y, area.w, "No results.", Style::new(p.text_muted, p.background))?;
    }
    for (i, record) in rows.iter().take(visible).enumerate() {
        let y = body_y + i as u16;
        let style = Style::new(p.text, p.background);
        let mut x = area.x;
        for key in SortKey::ALL {
            let width = column_width(key, area.w);
            let cell = format!(" {}", record.field_string(key));
            frame.text(x, y, width.saturating_sub(1), &cell, style)?;
            x += width;
        }
    }
    if rows.len() > visible {
        let more = format!("… {} more", rows.len() - visible);
        frame.text(area.x + 1, body_y + visible as u16, area.w, &more, Style::new(p.text_muted, p.background))?;
    }
    Ok(())
}

fn column_width(key: SortKey, total: u16) -> u16 {
    match key {
        SortKey::Id => ID_WIDTH,
        SortKey::Name => NAME_WIDTH,
        SortKey::Email => total.saturating_sub(ID_WIDTH + NAME_WIDTH),
    }
}

fn render_settings<W: Write>(frame: &mut Frame<'_, W>, app: &App, area: Area) -> io::Result<()> {
    let p = frame.palette;
    let form = &app.profile;
    let draft = form.draft();
    let mut y = area.y;

    frame.text(area.x, y, area.w, "Settings", Style::new(p.primary, p.background).bold())?;
    y += 2;

    frame.text(area.x, y, area.w, "Profile", Style::new(p.primary, p.background).bold())?;
    y += 1;
    let editing = app.focus == Focus::Page;
    for (field, label, value) in [
        (Field::Name, "Name ", draft.name.as_str()),
        (Field::Email, "Email", draft.email.as_str()),
    ] {
        let active = editing && app.profile_field == field;
        let marker = if active { "›" } else { " " };
        let cursor = if active { "▏" } else { "" };
        frame.text(area.x, y, 8, &format!("{} {}", marker, label), Style::new(p.text, p.background))?;
        frame.fill(area.x + 9, y, 40u16.min(area.w.saturating_sub(9)), 1, p.surface)?;
        frame.text(area.x + 10, y, 38, &format!("{}{}", value, cursor), Style::new(p.text, p.surface))?;
        y += 1;
    }
    y += 1;
    let save = if form.is_saving() {
        "⟳ Saving..."
    } else {
        "Ctrl+S  Save Changes"
    };
    frame.text(area.x + 2, y, area.w, save, Style::new(p.primary, p.background).bold())?;
    y += 3;

    frame.text(area.x, y, area.w, "Appearance", Style::new(p.primary, p.background).bold())?;
    y += 1;
    let check = if app.theme.is_dark() { "[x]" } else { "[ ]" };
    frame.text(
        area.x + 2,
        y,
        area.w,
        &format!("Dark Mode  {}   Ctrl+T toggle   Ctrl+R follow terminal", check),
        Style::new(p.text, p.background),
    )?;
    y += 3;

    frame.text(area.x, y, area.w, "Danger Zone", Style::new(p.error, p.background).bold())?;
    y += 1;
    frame.text(area.x + 2, y, area.w, "Ctrl+D  Delete Account", Style::new(p.error, p.background))
}

fn render_footer<W: Write>(frame: &mut Frame<'_, W>, app: &App) -> io::Result<()> {
    let p = frame.palette;
    let hints = match (app.focus, app.route) {
        (Focus::Sidebar, _) => "↑↓ move  Enter open",
        (Focus::Search, _) => "type to search  Enter go  Esc close",
        (Focus::Page, Route::Dashboard) => "type to filter  ←→ column  Enter sort  Ctrl+N add",
        (Focus::Page, Route::Settings) => "type to edit  ↑↓ field  Esc reset",
    };
    let line = format!("{}  │  Tab focus  Ctrl+F search  Ctrl+T theme  Ctrl+Q quit", hints);
    let x = SIDEBAR_WIDTH + 1;
    frame.text(x + 1, frame.height - 1, frame.width - x - 1, &line, Style::new(p.text_muted, p.background))
}

fn render_search_results<W: Write>(frame: &mut Frame<'_, W>, app: &App) -> io::Result<()> {
    let p = frame.palette;
    let x = SIDEBAR_WIDTH + 2;
    for (i, entry) in app.search_results().iter().enumerate() {
        let y = NAVBAR_HEIGHT + i as u16;
        frame.fill(x, y, 40, 1, p.surface)?;
        let style = if i == 0 {
            Style::new(p.primary, p.surface).bold()
        } else {
            Style::new(p.text, p.surface)
        };
        frame.text(x + 1, y, 26, &entry.name, style)?;
        frame.text(x + 28, y, 11, entry.kind.as_str(), Style::new(p.text_muted, p.surface))?;
    }
    Ok(())
}

fn render_dialog<W: Write>(frame: &mut Frame<'_, W>, app: &App, field: Field) -> io::Result<()> {
    let p = frame.palette;
    let w = DIALOG_WIDTH.min(frame.width);
    let h = DIALOG_HEIGHT.min(frame.height);
    let x = (frame.width - w) / 2;
    let y = (frame.height - h) / 2;

    frame.fill(x, y, w, h, p.surface)?;
    let border = Style::new(p.border, p.surface);
    frame.text(x, y, w, &format!("╭{}╮", "─".repeat(w as usize - 2)), border)?;
    for row in y + 1..y + h - 1 {
        frame.text(x, row, 1, "│", border)?;
        frame.text(x + w - 1, row, 1, "│", border)?;
    }
    frame.text(x, y + h - 1, w, &format!("╰{}╯", "─".repeat(w as usize - 2)), border)?;

    frame.text(x + 2, y + 1, w - 4, "Add New Data", Style::new(p.text, p.surface).bold())?;

    let draft = app.table.draft();
    for (i, (f, label, value)) in [
        (Field::Name, "Name *", draft.name.as_str()),
        (Field::Email, "Email *", draft.email.as_str()),
    ]
    .into_iter()
    .enumerate()
    {
        let row = y + 3 + i as u16;
        let active = f == field;
        let marker = if active { "›" } else { " " };
        let cursor = if active { "▏" } else { "" };
        frame.text(x + 2, row, 10, &format!("{} {}", marker, label), Style::new(p.text, p.surface))?;
        frame.fill(x + 12, row, w - 14, 1, p.background)?;
        frame.text(x + 13, row, w - 16, &format!("{}{}", value, cursor), Style::new(p.text, p.background))?;
    }

    let footer = if app.table.is_submitting() {
        "Adding..."
    } else {
        "Enter  Add Data    Esc  Cancel"
    };
    frame.text(x + 2, y + h - 2, w - 4, footer, Style::new(p.primary, p.surface))
}

fn render_notices<W: Write>(frame: &mut Frame<'_, W>, app: &App) -> io::Result<()> {
    let p = frame.palette;
    let width = 44u16.min(frame.width.saturating_sub(SIDEBAR_WIDTH + 2));
    let x = frame.width - width - 1;
    let notices: Vec<_> = app.notices.iter().collect();
    for (i, notice) in notices.iter().rev().take(4).enumerate() {
        let y = frame.height - 3 - i as u16 * 2;
        let fg = match notice.severity {
            Severity::Success => p.success,
            Severity::Info => p.info,
            Severity::Warning => p.warning,
            Severity::Error => p.error,
        };
        frame.fill(x, y, width, 1, p.surface)?;
        frame.text(x + 1, y, width - 2, &notice.message, Style::new(fg, p.surface).bold())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_short_text_unchanged() {
        assert_eq!(fit("Ann", 10), "Ann");
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        assert_eq!(fit("ann@example.com", 6), "ann@e…");
        assert_eq!(fit("ann@example.com", 6).width(), 6);
    }

    #[test]
    fn test_fit_wide_chars() {
        // each CJK char takes two columns
        assert_eq!(fit("日本語テキスト", 5), "日本…");
    }
}
