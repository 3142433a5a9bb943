//! Per-mode screen rendering.
//!
//! Draws whatever the current `ControlState` says the receiver is showing.
//! Pure presentation: nothing here mutates state.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use obx_core::catalog::{Catalog, OptionItem, GRID_COLS};
use obx_core::state::{ControlState, Mode, PanelOp};

use crate::theme::{
    style_default, style_secondary, style_selected, C_ACCENT, C_MARK, C_MUTED, C_OK,
    C_PANEL_BORDER, C_PRIMARY, C_SECONDARY, C_STANDBY, C_VALUE,
};

pub fn draw(frame: &mut Frame, catalog: &Catalog, state: &ControlState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(crate::theme::C_BG)),
        area,
    );
    if !state.power {
        draw_standby(frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, chunks[0], state);
    draw_body(frame, chunks[1], catalog, state);
    draw_footer(frame, chunks[2], state);
}

fn draw_standby(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::default(),
        Line::styled("●  STANDBY", Style::default().fg(C_STANDBY).add_modifier(Modifier::BOLD)),
        Line::styled("press P to power on", style_secondary()),
    ];
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, centered_band(area, 5));
}

fn draw_header(frame: &mut Frame, area: Rect, state: &ControlState) {
    let title = Line::from(vec![
        Span::styled(" OPENBOX ", Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled("· ", style_secondary()),
        Span::styled(state.mode.label(), style_default()),
    ]);
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(C_PANEL_BORDER));
    frame.render_widget(Paragraph::new(title).block(block), area);
}

fn draw_body(frame: &mut Frame, area: Rect, catalog: &Catalog, state: &ControlState) {
    match state.mode {
        Mode::MainGrid => draw_grid(frame, area, catalog, state),
        Mode::ChannelEditor => draw_menu(
            frame,
            area,
            &catalog.channel_editor_menu,
            state.channel_editor_index,
        ),
        Mode::ChannelList => draw_channel_list(frame, area, catalog, state),
        Mode::Settings => draw_menu(frame, area, &catalog.settings_menu, state.settings_index),
        Mode::Install => draw_menu(frame, area, &catalog.install_menu, state.install_index),
        Mode::LanguageSettings => draw_options(
            frame,
            area,
            &catalog.language_settings,
            &state.language_settings_values,
            state.language_settings_index,
        ),
        Mode::AbSettings => draw_options(
            frame,
            area,
            &catalog.ab_settings,
            &state.ab_settings_values,
            state.ab_settings_index,
        ),
        Mode::AccessCard => draw_menu(
            frame,
            area,
            &catalog.access_card_menu,
            state.access_card_index,
        ),
        Mode::ConaxInfo => draw_card(
            frame,
            area,
            &[
                ("Card interface", "Conax CAS7"),
                ("Card number", "017 2004 8851-3"),
                ("Software version", "1.07b"),
                ("Number of sessions", "1"),
                ("Language", "English"),
            ],
        ),
        Mode::SubscriptionStatus => draw_card(
            frame,
            area,
            &[
                ("Package", "Base + Cinema"),
                ("Status", "Active"),
                ("Valid until", "31.12.2026"),
                ("Entitlements", "24"),
            ],
        ),
        Mode::AntennaSetup => draw_options(
            frame,
            area,
            &catalog.antenna_setup,
            &state.antenna_setup_values,
            state.antenna_setup_index,
        ),
        Mode::SearchSettings => draw_menu(
            frame,
            area,
            &catalog.search_settings,
            state.search_settings_index,
        ),
        Mode::SearchProgress => draw_search_progress(frame, area, state),
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &ControlState) {
    let mut hint = String::from(" ↑↓←→ navigate  ⏎ ok  esc back  p power  q quit");
    if state.mode == Mode::ChannelList {
        hint.push_str("  1-5 panel ops");
    }
    frame.render_widget(
        Paragraph::new(Line::styled(hint, Style::default().fg(C_MUTED))),
        area,
    );
}

// ── Main grid ─────────────────────────────────────────────────────────────────

fn draw_grid(frame: &mut Frame, area: Rect, catalog: &Catalog, state: &ControlState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (row_idx, row_area) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(*row_area);
        for (col_idx, cell) in cells.iter().enumerate() {
            let icon = row_idx * GRID_COLS + col_idx;
            let Some(label) = catalog.grid_icons.get(icon) else {
                continue;
            };
            let selected = icon == state.selected_icon;
            let style = if selected {
                style_selected()
            } else {
                style_secondary()
            };
            let border_style = if selected {
                Style::default().fg(C_ACCENT)
            } else {
                Style::default().fg(C_PANEL_BORDER)
            };
            let para = Paragraph::new(Line::styled(label.clone(), style))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border_style));
            frame.render_widget(para, *cell);
        }
    }
}

// ── Generic menu list ─────────────────────────────────────────────────────────

fn draw_menu(frame: &mut Frame, area: Rect, items: &[String], selected: usize) {
    let visible = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(selected, items.len(), visible);

    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(i, label)| {
            if i == selected {
                Line::from(vec![
                    Span::styled("► ", Style::default().fg(C_ACCENT)),
                    Span::styled(label.clone(), style_selected()),
                ])
            } else {
                Line::from(vec![Span::raw("  "), Span::styled(label.clone(), style_default())])
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_PANEL_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Option screens (label + ◄ value ►) ────────────────────────────────────────

fn draw_options(
    frame: &mut Frame,
    area: Rect,
    items: &[OptionItem],
    values: &[usize],
    selected: usize,
) {
    let label_w = items.iter().map(|i| i.label.len()).max().unwrap_or(0) + 2;
    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let is_sel = i == selected;
            let marker = if is_sel { "► " } else { "  " };
            let mut spans = vec![
                Span::styled(marker.to_string(), Style::default().fg(C_ACCENT)),
                Span::styled(
                    format!("{:<label_w$}", item.label),
                    if is_sel { style_selected() } else { style_default() },
                ),
            ];
            if let Some(options) = current_option(item, values.get(i)) {
                spans.push(Span::styled("◄ ", Style::default().fg(C_MUTED)));
                spans.push(Span::styled(
                    options,
                    Style::default().fg(C_VALUE).add_modifier(if is_sel {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ));
                spans.push(Span::styled(" ►", Style::default().fg(C_MUTED)));
            }
            Line::from(spans)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_PANEL_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn current_option(item: &OptionItem, value: Option<&usize>) -> Option<String> {
    let idx = *value?;
    item.options.get(idx).cloned()
}

// ── Channel list ──────────────────────────────────────────────────────────────

fn draw_channel_list(frame: &mut Frame, area: Rect, catalog: &Catalog, state: &ControlState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let list_area = chunks[0];
    let name_w = list_area.width.saturating_sub(16) as usize;
    let visible = list_area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(state.selected_channel_index, catalog.channels.len(), visible);

    let lines: Vec<Line> = catalog
        .channels
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(i, channel)| {
            let is_sel = i == state.selected_channel_index;
            let badges: String = state
                .channel_badges(i)
                .into_iter()
                .map(PanelOp::badge)
                .collect();
            let mut spans = vec![
                Span::styled(
                    format!("{:>4} ", i + 1),
                    Style::default().fg(C_MUTED),
                ),
                Span::styled(
                    format!("{:<name_w$}", truncate_width(&channel.name, name_w)),
                    if is_sel { style_selected() } else { style_default() },
                ),
            ];
            if !badges.is_empty() {
                spans.push(Span::styled(badges, Style::default().fg(C_MARK)));
            }
            Line::from(spans)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_PANEL_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), list_area);

    // Armed-panel footer: the five digit-key operations.
    let ops = [
        PanelOp::Delete,
        PanelOp::Move,
        PanelOp::Skip,
        PanelOp::Lock,
        PanelOp::Favorite,
    ];
    let mut spans = Vec::new();
    for (n, op) in ops.iter().enumerate() {
        let armed = state.active_panel == Some(*op);
        spans.push(Span::styled(
            format!(" {} {} ", n + 1, op.label()),
            if armed {
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_SECONDARY)
            },
        ));
    }
    let info = catalog
        .channels
        .get(state.selected_channel_index)
        .map(|c| c.info.clone())
        .unwrap_or_default();
    let footer = vec![
        Line::from(spans),
        Line::styled(format!(" {}", info), Style::default().fg(C_MUTED)),
    ];
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}

// ── Info cards ────────────────────────────────────────────────────────────────

fn draw_card(frame: &mut Frame, area: Rect, rows: &[(&str, &str)]) {
    let label_w = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + 2;
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, value)| {
            Line::from(vec![
                Span::styled(format!("  {:<label_w$}", key), style_secondary()),
                Span::styled((*value).to_string(), style_default()),
            ])
        })
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_PANEL_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Search progress ───────────────────────────────────────────────────────────

fn draw_search_progress(frame: &mut Frame, area: Rect, state: &ControlState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    // Smooth Unicode bar: 8 eighths per cell.
    let bar_area = chunks[0];
    let bar_w = bar_area.width.saturating_sub(8).max(4) as usize;
    let progress = (state.search.progress / 100.0).clamp(0.0, 1.0) as f64;
    let eighths = (progress * bar_w as f64 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];
    let mut bar = String::with_capacity(bar_w + 4);
    for _ in 0..full_blocks {
        bar.push('█');
    }
    if full_blocks < bar_w {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..bar_w {
            bar.push(' ');
        }
    }
    let bar_line = Line::from(vec![
        Span::styled(bar, Style::default().fg(C_OK)),
        Span::styled(
            format!(" {:>3.0}%", state.search.progress),
            Style::default().fg(C_PRIMARY),
        ),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_PANEL_BORDER));
    frame.render_widget(Paragraph::new(bar_line).block(block), bar_area);

    // Found channels, newest last.
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    draw_found_column(frame, cols[0], "TV", &state.search.tv_list);
    draw_found_column(frame, cols[1], "Radio", &state.search.radio_list);

    let status = if state.search.is_complete() {
        Line::styled(
            " search complete — press OK",
            Style::default().fg(C_OK).add_modifier(Modifier::BOLD),
        )
    } else {
        Line::styled(" searching…", style_secondary())
    };
    frame.render_widget(Paragraph::new(status), chunks[2]);
}

fn draw_found_column(frame: &mut Frame, area: Rect, title: &str, names: &[String]) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = names.len().saturating_sub(visible.max(1));
    let lines: Vec<Line> = names
        .iter()
        .skip(skip)
        .map(|n| Line::styled(n.clone(), style_default()))
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} ({})", title, names.len()))
        .border_style(Style::default().fg(C_PANEL_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Keep `selected` inside a window of `visible` rows.
fn scroll_offset(selected: usize, len: usize, visible: usize) -> usize {
    if visible == 0 || len <= visible {
        0
    } else if selected >= visible {
        (selected + 1 - visible).min(len - visible)
    } else {
        0
    }
}

/// Truncate to a display width, respecting wide glyphs.
fn truncate_width(s: &str, max: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        out.push(c);
    }
    out
}

fn centered_band(area: Rect, height: u16) -> Rect {
    let top = area.height.saturating_sub(height) / 2;
    Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_window_tracks_selection() {
        assert_eq!(scroll_offset(0, 20, 10), 0);
        assert_eq!(scroll_offset(9, 20, 10), 0);
        assert_eq!(scroll_offset(10, 20, 10), 1);
        assert_eq!(scroll_offset(19, 20, 10), 10);
        assert_eq!(scroll_offset(5, 3, 10), 0);
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_width("abcdef", 4), "abcd");
        assert_eq!(truncate_width("ab", 4), "ab");
        // Wide CJK glyphs count double.
        assert_eq!(truncate_width("テレビ", 4), "テレ");
    }
}
