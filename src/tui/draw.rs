use ratatui::prelude::*;
use ratatui::widgets::*;
use unicode_width::UnicodeWidthStr;

use super::items::Selectable;
use super::{App, Pane};
use crate::decoder::CommandSink;
use crate::player::PlaybackStatus;

const TITLE: &str = " ♫ pancake ";

pub fn draw<C: CommandSink>(f: &mut Frame, app: &mut App<C>) {
    let size = f.area();
    f.render_widget(Block::default().style(Style::default().bg(app.theme.surface)), size);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    draw_header(f, main_chunks[0], app);
    draw_body(f, main_chunks[1], app);
    draw_progress_bar(f, main_chunks[2], app);
    draw_status_bar(f, main_chunks[3], app);
}

fn draw_header<C: CommandSink>(f: &mut Frame, area: Rect, app: &App<C>) {
    let th = &app.theme;
    let status = app.player.status();
    let state_str = format!(" {} {} ", status.icon(), status.label().to_lowercase());
    let station = app
        .player
        .station_name()
        .map(|name| format!("· {} ", name))
        .unwrap_or_default();

    let used = TITLE.width() + station.width() + state_str.width();
    let pad_len = (area.width as usize).saturating_sub(used);

    let header = Line::from(vec![
        Span::styled(TITLE, Style::default().fg(th.accent).bold()),
        Span::styled(station, Style::default().fg(th.text_dim)),
        Span::styled(" ".repeat(pad_len), Style::default().bg(th.surface_light)),
        Span::styled(state_str, Style::default().fg(th.status_color(status)).bold()),
    ]);

    f.render_widget(
        Paragraph::new(header).style(Style::default().bg(th.surface_light)),
        area,
    );
}

fn draw_body<C: CommandSink>(f: &mut Frame, area: Rect, app: &mut App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(30)])
        .split(area);

    draw_menu(f, chunks[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .horizontal_margin(1)
        .split(chunks[1]);

    draw_now_playing(f, right[0], app);
    draw_up_next(f, right[1], app);
}

fn draw_menu<C: CommandSink>(f: &mut Frame, area: Rect, app: &mut App<C>) {
    let th = app.theme;
    let (title, labels) = match app.pane {
        Pane::Stations => (
            format!(" Stations ({}) ", app.station_items.len()),
            app.station_items.iter().map(Selectable::label).collect::<Vec<_>>(),
        ),
        Pane::Commands => (
            " Commands ".to_string(),
            app.command_items.iter().map(Selectable::label).collect(),
        ),
    };

    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(th.text_dim).bold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.border))
        .style(Style::default().bg(th.surface));

    if labels.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("  No stations", Style::default().fg(th.dim))).block(block),
            area,
        );
        return;
    }

    let current = app.player.station_name().map(str::to_string);
    let items: Vec<ListItem> = labels
        .into_iter()
        .map(|label| {
            let playing = app.pane == Pane::Stations && current.as_deref() == Some(label.as_str());
            if playing {
                ListItem::new(Line::from(vec![
                    Span::styled("♫ ", Style::default().fg(th.green)),
                    Span::styled(label, Style::default().fg(th.green)),
                ]))
            } else {
                ListItem::new(Line::from(vec![
                    Span::styled("  ", Style::default()),
                    Span::styled(label, Style::default().fg(th.text)),
                ]))
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(th.highlight_bg)
                .fg(th.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let state = match app.pane {
        Pane::Stations => &mut app.station_state,
        Pane::Commands => &mut app.command_state,
    };
    f.render_stateful_widget(list, area, state);
}

fn draw_now_playing<C: CommandSink>(f: &mut Frame, area: Rect, app: &App<C>) {
    let th = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.border))
        .style(Style::default().bg(th.surface));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let status = app.player.status();
    let Some(track) = app.player.current_track() else {
        let msg = if status == PlaybackStatus::Unavailable {
            "Decoder is not running"
        } else {
            "Nothing playing"
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(msg, Style::default().fg(th.dim)))),
            inner,
        );
        return;
    };

    let title = Line::from(Span::styled(
        track.title.clone(),
        Style::default().fg(th.text).bold(),
    ));
    let subtitle = Line::from(vec![
        Span::styled(track.artist.clone(), Style::default().fg(th.text_dim)),
        Span::styled("  ·  ", Style::default().fg(th.dim)),
        Span::styled(track.album.clone(), Style::default().fg(th.text_dim)),
    ]);
    let art = Line::from(Span::styled(
        track.art.as_deref().map(|a| format!("art: {}", a)).unwrap_or_default(),
        Style::default().fg(th.dim).italic(),
    ));
    let state_line = Line::from(Span::styled(
        format!("{} {}", status.icon(), status.label()),
        Style::default().fg(th.status_color(status)),
    ));

    f.render_widget(Paragraph::new(vec![title, subtitle, art, state_line]), inner);
}

fn draw_up_next<C: CommandSink>(f: &mut Frame, area: Rect, app: &App<C>) {
    let th = &app.theme;
    let mut lines = vec![Line::from(Span::styled(
        "UP NEXT",
        Style::default().fg(th.dim).bold(),
    ))];

    let max_width = area.width.saturating_sub(4) as usize;
    let mut any = false;
    for (i, track) in app.player.upcoming().enumerate() {
        any = true;
        let num = format!("{:>2}. ", i + 1);
        lines.push(Line::from(vec![
            Span::styled(num.clone(), Style::default().fg(th.dim)),
            Span::styled(
                truncate(&track.title, max_width.saturating_sub(num.len())),
                Style::default().fg(th.text),
            ),
        ]));
        if !track.artist.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    {}", track.artist),
                Style::default().fg(th.text_dim),
            )));
        }
    }
    if !any {
        lines.push(Line::from(Span::styled("  ─", Style::default().fg(th.dim))));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_progress_bar<C: CommandSink>(f: &mut Frame, area: Rect, app: &App<C>) {
    let th = &app.theme;
    let (pos_str, dur_str) = app.footer().split_once(" | ").unwrap_or((app.footer(), ""));

    if app.player.current_track().is_none() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("  {}  ╌╌╌ no track ╌╌╌", app.footer()),
                Style::default().fg(th.dim),
            ))),
            area,
        );
        return;
    }

    let ratio = app.player.progress().ratio();
    let bar_width = (area.width as usize).saturating_sub(pos_str.width() + dur_str.width() + 6);
    let filled = (ratio * bar_width as f64) as usize;
    let empty = bar_width.saturating_sub(filled + 1);

    let bar = Line::from(vec![
        Span::styled(format!("  {} ", pos_str), Style::default().fg(th.text_dim)),
        Span::styled("━".repeat(filled), Style::default().fg(th.accent)),
        Span::styled("●", Style::default().fg(th.text).bold()),
        Span::styled("╌".repeat(empty), Style::default().fg(th.dim)),
        Span::styled(format!(" {} ", dur_str), Style::default().fg(th.text_dim)),
    ]);

    f.render_widget(Paragraph::new(bar), area);
}

fn draw_status_bar<C: CommandSink>(f: &mut Frame, area: Rect, app: &App<C>) {
    let th = &app.theme;
    let status = app.player.status();
    let color = if app.status().starts_with("Error") {
        th.red
    } else {
        th.text_dim
    };

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {}  {} ", status.icon(), app.status()),
            Style::default().fg(color),
        )))
        .style(Style::default().bg(th.surface_light)),
        area,
    );
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
