use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, ViewMode};
use crate::dates::humanize_updated;
use crate::genres::GenreResolver;
use crate::podcast::{PodcastDetail, PodcastSummary};
use chrono::Utc;

const CARD_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 6;
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Layout pass run before drawing: derives the grid column count from the
/// terminal width so the app can move the cursor by whole rows.
pub fn prepare_layout(app: &mut App, frame_size: Rect) {
    let body_width = frame_size.width;
    app.grid_columns = (body_width / CARD_WIDTH).max(1) as usize;
}

pub fn ui(f: &mut Frame, app: &App) {
    // === Layout Definitions ===

    // Main layout: Header (top) and Content (below)
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header top
            Constraint::Min(0),    // Content below
        ])
        .split(f.size());

    let header_chunk = main_chunks[0];
    let content_chunk = main_chunks[1];

    // === Header Panel ===
    let header_widget = Paragraph::new("Podcast Discovery")
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).style(Style::default().fg(Color::Blue)));
    f.render_widget(header_widget, header_chunk);

    // === Body, by render mode (priority is fixed by App::view_mode) ===
    match app.view_mode() {
        ViewMode::Loading => render_loading(f, content_chunk),
        ViewMode::Failed(message) => render_error(f, content_chunk, message),
        ViewMode::Empty => render_empty(f, content_chunk),
        ViewMode::Grid(catalog) => render_grid(f, content_chunk, app, catalog),
    }

    // === Detail overlay, independent of catalog state ===
    if let Some(detail) = app.selected_detail() {
        render_overlay(f, detail, app);
    }
}

fn render_loading(f: &mut Frame, area: Rect) {
    let frame = (std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() / 100)
        .unwrap_or(0) as usize)
        % SPINNER_FRAMES.len();
    let widget = Paragraph::new(format!("\n{} Loading podcasts...", SPINNER_FRAMES[frame]))
        .style(Style::default().fg(Color::Gray))
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(widget, area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::styled(
            "Error loading podcasts",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::styled(message.to_string(), Style::default().fg(Color::Gray)),
    ];
    let widget = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let widget = Paragraph::new("\nNo podcasts found")
        .style(Style::default().fg(Color::Gray))
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(widget, area);
}

// === Card grid ===

fn render_grid(f: &mut Frame, area: Rect, app: &App, catalog: &[PodcastSummary]) {
    let columns = app.grid_columns.max(1);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let total_rows = catalog.len().div_ceil(columns);

    // Keep the cursor's row in view without persistent scroll state.
    let cursor_row = app.cursor().unwrap_or(0) / columns;
    let first_row = cursor_row.saturating_sub(visible_rows - 1).min(total_rows.saturating_sub(visible_rows));

    let resolver = GenreResolver::default();
    let now = Utc::now();

    let row_constraints: Vec<Constraint> =
        (0..visible_rows).map(|_| Constraint::Length(CARD_HEIGHT)).collect();
    let row_chunks =
        Layout::default().direction(Direction::Vertical).constraints(row_constraints).split(area);

    for (chunk_index, row) in (first_row..first_row + visible_rows).enumerate() {
        let column_constraints: Vec<Constraint> =
            (0..columns).map(|_| Constraint::Ratio(1, columns as u32)).collect();
        let column_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints)
            .split(row_chunks[chunk_index]);

        for column in 0..columns {
            let index = row * columns + column;
            if let Some(summary) = catalog.get(index) {
                let selected = app.cursor() == Some(index);
                render_card(f, column_chunks[column], summary, selected, &resolver, now);
            }
        }
    }
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    summary: &PodcastSummary,
    selected: bool,
    resolver: &GenreResolver,
    now: chrono::DateTime<Utc>,
) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let seasons_label = if summary.seasons() == 1 {
        "1 Season".to_string()
    } else {
        format!("{} Seasons", summary.seasons())
    };

    let lines = vec![
        Line::styled(truncate_to_width(summary.title(), inner_width), title_style),
        Line::styled(seasons_label, Style::default().fg(Color::Gray)),
        Line::styled(
            truncate_to_width(&genre_chips(resolver, summary.genres()), inner_width),
            Style::default().fg(Color::Cyan),
        ),
        Line::styled(
            humanize_updated(summary.updated(), now),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let card = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).style(border_style));
    f.render_widget(card, area);
}

/// Card chip row: up to three genre names, plus a "+k" overflow chip.
fn genre_chips(resolver: &GenreResolver, ids: &[u32]) -> String {
    let names = resolver.resolve(ids);
    let mut chips: Vec<String> = names.iter().take(3).map(|n| n.to_string()).collect();
    if names.len() > 3 {
        chips.push(format!("+{}", names.len() - 3));
    }
    chips.join(" · ")
}

// === Detail overlay ===

fn render_overlay(f: &mut Frame, detail: &PodcastDetail, app: &App) {
    let area = centered_rect(80, 80, f.size());
    f.render_widget(Clear, area);

    let outer = Block::default()
        .title(format!(" {} ", detail.title()))
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Yellow));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let season_rows = (detail.seasons().len() as u16).clamp(1, 8) + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),              // Description
            Constraint::Length(2),           // Genres + updated label
            Constraint::Length(season_rows), // Seasons
        ])
        .split(inner);

    let description = Paragraph::new(app.overlay_state.content.clone())
        .wrap(Wrap { trim: true })
        .scroll((app.overlay_state.scroll_offset, 0))
        .block(Block::default().title("Description").borders(Borders::BOTTOM));
    f.render_widget(description, chunks[0]);

    let resolver = GenreResolver::default();
    let meta_lines = vec![
        Line::styled(resolver.resolve(detail.genres()).join(" · "), Style::default().fg(Color::Cyan)),
        Line::styled(
            humanize_updated(detail.updated(), Utc::now()),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    f.render_widget(Paragraph::new(meta_lines), chunks[1]);

    let season_items: Vec<ListItem> = detail
        .seasons()
        .iter()
        .map(|season| {
            ListItem::new(format!("{} — {} episodes", season.title(), season.episodes()))
        })
        .collect();
    let seasons_widget = List::new(season_items)
        .block(Block::default().title("Seasons").borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    f.render_widget(seasons_widget, chunks[2]);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

// === Text helpers ===

/// Descriptions occasionally arrive with markup in them; strip it down to
/// plain text for the overlay.
pub fn format_description(description: &str) -> String {
    const DEFAULT_TEXT_WIDTH: usize = 80;
    if description.contains('<') && description.contains('>') && description.contains("</") {
        match html2text::from_read(description.as_bytes(), DEFAULT_TEXT_WIDTH) {
            Ok(text_content) => text_content
                .lines()
                .map(|line| line.trim_end())
                .filter(|line| !line.is_empty())
                .collect::<Vec<&str>>()
                .join("\n"),
            Err(e) => {
                log::warn!("failed to convert an HTML description: {}", e);
                description.to_string()
            }
        }
    } else {
        description.to_string()
    }
}

/// Clips `text` to `max_width` terminal cells, appending an ellipsis when
/// anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Comedy", 10), "Comedy");
    }

    #[test]
    fn long_text_is_clipped_with_an_ellipsis() {
        let clipped = truncate_to_width("Investigative Journalism", 10);
        assert!(UnicodeWidthStr::width(clipped.as_str()) <= 10);
        assert!(clipped.ends_with('…'));
    }

    #[test]
    fn plain_descriptions_pass_through_format() {
        assert_eq!(format_description("Just text."), "Just text.");
    }

    #[test]
    fn markup_is_stripped_from_descriptions() {
        let formatted = format_description("<p>First.</p><p>Second.</p>");
        assert!(formatted.contains("First."));
        assert!(!formatted.contains("<p>"));
    }

    #[test]
    fn genre_chips_cap_at_three_with_overflow_marker() {
        let resolver = GenreResolver::default();
        let chips = genre_chips(&resolver, &[1, 2, 3, 4, 5]);
        assert_eq!(chips, "Personal Growth · Investigative Journalism · History · +2");
    }
}
