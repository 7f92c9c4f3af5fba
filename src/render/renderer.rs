use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Direction, GameSession, Position, RandomSource, Rgb, Snake, Winner};
use crate::metrics::GameMetrics;

/// Colour the snake bodies fade towards
const BACKGROUND: Rgb = Rgb::new(0x1c, 0x1c, 0x1c);

/// Opacity of body segment `index` out of `len`; the head is fully opaque
pub fn segment_opacity(index: usize, len: usize) -> f32 {
    1.0 - (index as f32 / len as f32) * 0.6
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<R: RandomSource>(
        &self,
        frame: &mut Frame,
        session: &GameSession<R>,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(session, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if session.is_over() {
            let game_over = self.render_game_over(session, metrics);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(session);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn paint_snake(&self, cells: &mut [Vec<Span<'static>>], width: usize, snake: &Snake) {
        let len = snake.len();

        // Tail first so the head wins where segments overlap
        for (index, segment) in snake.body.iter().enumerate().rev() {
            let Some(cell) = cell_index(*segment, width, cells.len()) else {
                continue;
            };
            let (row, col) = cell;

            let span = if index == 0 {
                Span::styled(
                    head_glyph(snake.direction),
                    Style::default()
                        .fg(color(snake.color))
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                let faded = snake.color.faded(segment_opacity(index, len), BACKGROUND);
                Span::styled("■ ", Style::default().fg(color(faded)))
            };
            cells[row][col] = span;
        }
    }

    fn render_grid<R: RandomSource>(&self, session: &GameSession<R>) -> Paragraph<'static> {
        let grid = session.grid();
        let empty = Span::styled(". ", Style::default().fg(Color::DarkGray));
        let mut cells = vec![vec![empty; grid.width]; grid.height];

        for food in session.foods() {
            if let Some((row, col)) = cell_index(food.position, grid.width, grid.height) {
                cells[row][col] = Span::styled(
                    "● ",
                    Style::default()
                        .fg(color(food.color))
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        self.paint_snake(&mut cells, grid.width, session.ai());
        self.paint_snake(&mut cells, grid.width, session.player());

        let lines: Vec<Line> = cells.into_iter().map(Line::from).collect();

        let (title, border) = if session.is_paused() {
            (" Snake Duel · PAUSED ", Color::Yellow)
        } else {
            (" Snake Duel ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats<R: RandomSource>(
        &self,
        session: &GameSession<R>,
        metrics: &GameMetrics,
    ) -> Paragraph<'static> {
        let config = session.config();
        let text = vec![
            Line::from(vec![
                Span::styled("You: ", Style::default().fg(color(session.player().color))),
                Span::styled(
                    session.player_score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("AI: ", Style::default().fg(color(session.ai().color))),
                Span::styled(
                    session.ai_score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![Span::styled(
                format!(
                    "speed {} · ai {} · map {}",
                    config.difficulty, config.ai_level, config.map_size
                ),
                Style::default().fg(Color::Gray),
            )]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over<R: RandomSource>(
        &self,
        session: &GameSession<R>,
        metrics: &GameMetrics,
    ) -> Paragraph<'static> {
        let (headline, headline_color) = match session.winner() {
            Some(Winner::Player) => ("YOU WIN", Color::Green),
            Some(Winner::Ai) => ("AI WINS", Color::Red),
            Some(Winner::Draw) | None => ("DRAW", Color::Yellow),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default()
                    .fg(headline_color)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                session.result_description(),
                Style::default().fg(Color::White),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("You {} : {} AI", session.player_score(), session.ai_score()),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Record (W-L-D): ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.format_record(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
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
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
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
                .border_style(Style::default().fg(headline_color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("1/2/3", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("L", Style::default().fg(Color::Cyan)),
            Span::raw(" ai | "),
            Span::styled("M", Style::default().fg(Color::Cyan)),
            Span::raw(" map | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// Row and column of an on-grid position
fn cell_index(pos: Position, width: usize, height: usize) -> Option<(usize, usize)> {
    let col = usize::try_from(pos.x).ok()?;
    let row = usize::try_from(pos.y).ok()?;
    (col < width && row < height).then_some((row, col))
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
