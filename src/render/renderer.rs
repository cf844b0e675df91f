use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::time::Instant;

use super::effects::Effects;
use crate::game::config::GRID_CELLS;
use crate::game::{FruitKind, Phase, SegmentRole, Snapshot};
use crate::metrics::GameMetrics;

/// Board width in terminal columns, borders included
const BOARD_WIDTH: u16 = GRID_CELLS as u16 * 2 + 2;

/// Board height in terminal rows, borders included
const BOARD_HEIGHT: u16 = GRID_CELLS as u16 + 2;

/// What to draw over or instead of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    StartPrompt,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Empty,
    Fruit(FruitKind),
    Head,
    Body,
    Tail,
    Spark(f32),
}

pub struct Renderer {
    /// Fruit kinds listed in the idle legend
    catalog: &'static [FruitKind],
}

impl Renderer {
    pub fn new(catalog: &'static [FruitKind]) -> Self {
        Self { catalog }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot,
        metrics: &GameMetrics,
        effects: &Effects,
        overlay: Overlay,
    ) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let board_area = centered(chunks[1], BOARD_WIDTH, BOARD_HEIGHT);
        if overlay == Overlay::Report {
            frame.render_widget(self.render_game_over(snapshot), board_area);
        } else {
            frame.render_widget(self.render_grid(snapshot, effects), board_area);
        }

        let controls = self.render_controls(overlay);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot, effects: &Effects) -> Paragraph<'_> {
        let cells = self.layout_cells(snapshot, effects);
        let eating = effects.is_eating(Instant::now());
        let crashed = snapshot.phase == Phase::Over;

        let lines: Vec<Line> = cells
            .chunks(GRID_CELLS as usize)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|&cell| self.cell_span(cell, snapshot.bonus_active, eating, crashed))
                    .collect();
                Line::from(spans)
            })
            .collect();

        let border_color = if crashed { Color::Red } else { Color::White };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border_color))
                .title(" Snake "),
        )
    }

    /// Resolve what occupies every grid cell, row-major
    fn layout_cells(&self, snapshot: &Snapshot, effects: &Effects) -> Vec<Cell> {
        let width = GRID_CELLS as usize;
        let mut cells = vec![Cell::Empty; width * width];
        let mut put = |col: i32, row: i32, cell: Cell| {
            if (0..GRID_CELLS).contains(&col) && (0..GRID_CELLS).contains(&row) {
                cells[row as usize * width + col as usize] = cell;
            }
        };

        let (col, row) = snapshot.fruit.position.cell();
        put(col, row, Cell::Fruit(snapshot.fruit.kind));

        // Tail first so the head wins on overlap
        for segment in snapshot.segments.iter().rev() {
            let (mut col, mut row) = segment.position.cell();
            if segment.role == SegmentRole::Head && snapshot.phase == Phase::Over {
                // A head that went through a wall is shown on the edge it hit
                col = col.clamp(0, GRID_CELLS - 1);
                row = row.clamp(0, GRID_CELLS - 1);
            }
            let cell = match segment.role {
                SegmentRole::Head => Cell::Head,
                SegmentRole::Body => Cell::Body,
                SegmentRole::Tail => Cell::Tail,
            };
            put(col, row, cell);
        }

        if let Some(explosion) = effects.explosion() {
            for particle in explosion.particles() {
                if let Some((col, row)) = particle.cell() {
                    put(col, row, Cell::Spark(particle.opacity));
                }
            }
        }

        cells
    }

    fn cell_span(&self, cell: Cell, fins: bool, eating: bool, crashed: bool) -> Span<'static> {
        match cell {
            Cell::Head if crashed => Span::styled(
                "✖ ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Cell::Head if eating => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            // Poison fins
            Cell::Body if fins => Span::styled(
                "◆ ",
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Cell::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
            Cell::Tail => Span::styled("▪ ", Style::default().fg(Color::Green)),
            Cell::Fruit(kind) => Span::styled(
                "● ",
                Style::default()
                    .fg(fruit_color(kind))
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::Spark(opacity) => {
                let color = if opacity > 0.6 {
                    Color::Red
                } else if opacity > 0.3 {
                    Color::LightRed
                } else {
                    Color::DarkGray
                };
                Span::styled("* ", Style::default().fg(color))
            }
            Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut score = format!("Score: {}", snapshot.score);
        if snapshot.bonus_active {
            score.push_str(" ⚡");
        }

        let text = vec![Line::from(vec![
            Span::styled(
                score,
                Style::default()
                    .fg(fruit_color(snapshot.fruit.kind))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}ms", snapshot.interval.as_millis()),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Fruits Collected: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.fruits_eaten.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, overlay: Overlay) -> Paragraph<'_> {
        let mut lines = Vec::new();
        let mut spans = Vec::new();
        if overlay == Overlay::StartPrompt {
            spans.push(Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" to start | "));
        }
        spans.extend([
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);
        lines.push(Line::from(spans));

        if overlay == Overlay::StartPrompt {
            lines.push(self.render_legend());
        }

        Paragraph::new(lines).alignment(Alignment::Center)
    }

    /// Fruit glyphs with their points, e.g. "● apple 10"
    fn render_legend(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (index, kind) in self.catalog.iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw("   "));
            }
            spans.push(Span::styled("● ", Style::default().fg(fruit_color(*kind))));
            spans.push(Span::raw(format!("{} {}", kind.name(), kind.score())));
        }
        Line::from(spans)
    }
}

fn fruit_color(kind: FruitKind) -> Color {
    match kind.color_name() {
        "red" => Color::Red,
        "orange" => Color::Rgb(255, 165, 0),
        "pink" => Color::Rgb(255, 105, 180),
        "purple" => Color::Magenta,
        _ => Color::White,
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
