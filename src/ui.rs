use crate::app::App;
use crate::braille::BrailleCanvas;
use globe_picker::NO_REGION;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};
use rayon::prelude::*;

/// What a single braille dot shows.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Dot {
    Space,
    Surface,
    Border,
    Selected,
}

/// Globe layers rendered to braille canvases
struct GlobeLayers {
    limb: BrailleCanvas,
    borders: BrailleCanvas,
    selected: BrailleCanvas,
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into map area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Globe
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_globe(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

/// Classify every dot by casting it onto the globe. The selected region is
/// looked up by id in the fill surface; borders come from the outline
/// surface.
fn classify(app: &App, width: usize, height: usize) -> Vec<Vec<Dot>> {
    let selected = app.session.selected;
    (0..height)
        .into_par_iter()
        .map(|y| {
            (0..width)
                .map(|x| {
                    let (ndc_x, ndc_y) = app.dot_to_ndc(x as f64 + 0.5, y as f64 + 0.5);
                    match app.globe.surface_at(&app.camera, ndc_x, ndc_y) {
                        None => Dot::Space,
                        Some((lon, lat)) if app.outline.is_stroke_at(lon, lat) => Dot::Border,
                        Some((lon, lat))
                            if selected != NO_REGION && app.fill.region_at(lon, lat) == selected =>
                        {
                            Dot::Selected
                        }
                        Some(_) => Dot::Surface,
                    }
                })
                .collect()
        })
        .collect()
}

fn build_layers(app: &App, cols: usize, rows: usize) -> GlobeLayers {
    let (width, height) = (cols * 2, rows * 4);
    let dots = classify(app, width, height);

    let mut layers = GlobeLayers {
        limb: BrailleCanvas::new(cols, rows),
        borders: BrailleCanvas::new(cols, rows),
        selected: BrailleCanvas::new(cols, rows),
    };

    let on_globe = |x: usize, y: usize| dots[y][x] != Dot::Space;
    for y in 0..height {
        for x in 0..width {
            match dots[y][x] {
                Dot::Space => {}
                Dot::Border => layers.borders.set(x, y),
                // Checkerboard keeps borders readable under the highlight.
                Dot::Selected if (x + y) % 2 == 0 => layers.selected.set(x, y),
                Dot::Selected | Dot::Surface => {
                    let edge = x == 0
                        || y == 0
                        || x + 1 == width
                        || y + 1 == height
                        || !on_globe(x - 1, y)
                        || !on_globe(x + 1, y)
                        || !on_globe(x, y - 1)
                        || !on_globe(x, y + 1);
                    if edge {
                        layers.limb.set(x, y);
                    }
                }
            }
        }
    }
    layers
}

fn render_globe(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Globe ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layers = build_layers(app, inner.width as usize, inner.height as usize);

    let cursor_pos = app.mouse_dot_pos().and_then(|(px, py)| {
        let cx = (px / 2) as u16;
        let cy = (py / 4) as u16;
        if cx < inner.width && cy < inner.height {
            Some((cx, cy))
        } else {
            None
        }
    });

    frame.render_widget(GlobeWidget { layers, cursor_pos }, inner);
}

/// Braille globe with a cursor marker
struct GlobeWidget {
    layers: GlobeLayers,
    cursor_pos: Option<(u16, u16)>,
}

impl GlobeWidget {
    /// Render a braille canvas layer with a specific color
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                if let Some(ch) = canvas.glyph(col as usize, row as usize) {
                    buf[(area.x + col, area.y + row)].set_char(ch).set_fg(color);
                }
            }
        }
    }
}

impl Widget for GlobeWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: limb, selection, borders on top.
        Self::render_layer(&self.layers.limb, Color::DarkGray, area, buf);
        Self::render_layer(&self.layers.selected, Color::Yellow, area, buf);
        Self::render_layer(&self.layers.borders, Color::Cyan, area, buf);

        if let Some((cx, cy)) = self.cursor_pos {
            let x = area.x + cx;
            let y = area.y + cy;
            if x < area.x + area.width && y < area.y + area.height {
                buf[(x, y)].set_char('╋').set_fg(Color::Red);
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hover = match app.hover {
        Some(h) => format!(
            "{:.2}, {:.2} {}",
            h.lat,
            h.lon,
            match h.region {
                Some(id) => format!("in {}", app.region_label(id)),
                None => "outside".to_string(),
            }
        ),
        None => "off globe".to_string(),
    };

    let status = Line::from(vec![
        Span::styled(" Selected: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.selected_label(),
            Style::default().fg(if app.session.selected != NO_REGION {
                Color::Yellow
            } else {
                Color::DarkGray
            }),
        ),
        Span::styled(" | Hover: ", Style::default().fg(Color::DarkGray)),
        Span::styled(hover, Style::default().fg(Color::Green)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.camera_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(
            " | click:pick drag/hjkl:rotate +/-:zoom r:reset q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}
