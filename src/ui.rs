use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};

use bloom::{
    growth,
    pomodoro::{Phase, Pomodoro},
    theme::PixelKind,
    util::format_time,
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 4;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let garden_height = self.theme.grid_size.height;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(2),             // header
                    Constraint::Length(1),             //
                    Constraint::Length(garden_height), // pixel garden
                    Constraint::Length(1),             //
                    Constraint::Length(3),             // phase / time / status
                    Constraint::Length(1),             // progress gauge
                    Constraint::Length(1),             // session info
                    Constraint::Min(0),                //
                    Constraint::Length(2),             // key help
                ]
                .as_ref(),
            )
            .split(area);

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_dim_style = Style::default()
            .patch(dim_style)
            .add_modifier(Modifier::ITALIC);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "🌸 Bloom Pomodoro",
                Style::default().patch(bold_style).fg(Color::Magenta),
            )),
            Line::from(Span::styled("Focus • Grow • Bloom", italic_dim_style)),
        ])
        .alignment(Alignment::Center);
        header.render(chunks[0], buf);

        let garden = Paragraph::new(garden_lines(self)).alignment(Alignment::Center);
        garden.render(chunks[2], buf);

        let pomo = &self.pomodoro;
        let timer = Paragraph::new(vec![
            Line::from(Span::styled(phase_label(pomo.phase), bold_style)),
            Line::from(Span::styled(
                format_time(pomo.time_remaining),
                Style::default().patch(bold_style).fg(Color::Cyan),
            )),
            Line::from(Span::styled(status_text(pomo), dim_style)),
        ])
        .alignment(Alignment::Center);
        timer.render(chunks[4], buf);

        let progress = growth::calculate_progress(pomo.time_remaining, pomo.session_start_time);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(gauge_color(pomo.phase)).bg(Color::Black))
            .ratio(progress)
            .label(format!("{:.0}% complete", progress * 100.0));
        gauge.render(centered_line(chunks[5], 40), buf);

        let session_info = Paragraph::new(Span::styled(
            format!(
                "Session #{} • Cycle {}/{}",
                pomo.sessions_completed + 1,
                pomo.current_cycle,
                pomo.durations().cycles_before_long_break
            ),
            dim_style,
        ))
        .alignment(Alignment::Center);
        session_info.render(chunks[6], buf);

        let mut help_lines = vec![Line::from(Span::styled(
            "(space) start/pause  (r)eset  (k) skip break  (t)heme  (q)uit",
            italic_dim_style,
        ))];
        if self.dev_mode {
            help_lines.push(Line::from(Span::styled(
                "dev: (1) 5s  (2) 10s  (3) 30s  (4) 1m",
                Style::default().patch(italic_dim_style).fg(Color::Yellow),
            )));
        }
        let help = Paragraph::new(help_lines).alignment(Alignment::Center);
        help.render(chunks[8], buf);
    }
}

/// The scene as terminal lines, top row first. Soil is always drawn; growth
/// pixels appear per the reveal count, and a finished work session keeps the
/// whole scene on screen through the break.
fn garden_lines(app: &App) -> Vec<Line<'static>> {
    let pomo = &app.pomodoro;
    let theme = &app.theme;

    let revealed = match pomo.phase {
        Phase::Work => {
            let granular =
                growth::granular_progress(pomo.time_remaining, pomo.session_start_time);
            theme.revealed_count(&granular)
        }
        _ if pomo.was_work_completed => theme.growth_pixels().count(),
        _ => 0,
    };

    let width = theme.grid_size.width as usize;
    let height = theme.grid_size.height as usize;
    let mut grid: Vec<Vec<Option<PixelKind>>> = vec![vec![None; width]; height];

    for pixel in theme.ground_pixels() {
        grid[pixel.row as usize][pixel.col as usize] = Some(pixel.kind);
    }
    for pixel in theme.growth_pixels().take(revealed) {
        grid[pixel.row as usize][pixel.col as usize] = Some(pixel.kind);
    }

    // Row 0 is the ground, so the highest row renders first
    grid.iter()
        .rev()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| match cell {
                        Some(kind) => {
                            Span::styled("██", Style::default().fg(pixel_color(*kind)))
                        }
                        None => Span::raw("  "),
                    })
                    .collect::<Vec<Span>>(),
            )
        })
        .collect()
}

fn pixel_color(kind: PixelKind) -> Color {
    match kind {
        PixelKind::Soil => Color::Rgb(121, 85, 58),
        PixelKind::Stem => Color::Rgb(76, 175, 80),
        PixelKind::Leaf => Color::Rgb(139, 195, 74),
        PixelKind::Petal => Color::Rgb(240, 98, 146),
        PixelKind::CenterBright => Color::Rgb(255, 213, 79),
    }
}

fn gauge_color(phase: Phase) -> Color {
    match phase {
        Phase::Work => Color::Green,
        Phase::ShortBreak | Phase::LongBreak => Color::Blue,
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Work => "Focus Time",
        Phase::ShortBreak => "Short Break",
        Phase::LongBreak => "Long Break",
    }
}

fn status_text(pomo: &Pomodoro) -> &'static str {
    if pomo.is_running() {
        "Active"
    } else if pomo.is_paused() {
        "Paused"
    } else if pomo.session_finished() {
        "Complete"
    } else {
        "Ready"
    }
}

/// A `width`-wide slice out of the middle of `area`, for the gauge.
fn centered_line(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
