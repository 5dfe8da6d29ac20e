mod app;
mod braille;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use globe_picker::data;
use globe_picker::logging::setup_logging;
use globe_picker::{BoundaryFeature, RegionConfig};
use log::{info, warn};
use ratatui::DefaultTerminal;
use std::path::Path;
use std::time::Duration;

const CONFIG_PATH: &str = "globe-picker.json";
const BOUNDARIES_PATH: &str = "data/countries.json";

fn main() -> Result<()> {
    let _logger = setup_logging("info")?;

    let config = load_config()?;
    let features = load_features();

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal, &config, features);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Config file if present, otherwise a raster sized for terminal viewing.
fn load_config() -> Result<RegionConfig> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        info!("loading config from {}", path.display());
        return Ok(RegionConfig::load(path)?);
    }
    Ok(RegionConfig {
        raster_width: 1440,
        raster_height: 720,
        outline_width: 4.0,
        ..RegionConfig::default()
    })
}

/// Boundary file if present and readable, otherwise the built-in sample world.
fn load_features() -> Vec<BoundaryFeature> {
    let path = Path::new(BOUNDARIES_PATH);
    if path.exists() {
        match data::load_boundaries(path) {
            Ok(features) => return features,
            Err(e) => warn!("failed to load {}: {}; using sample world", path.display(), e),
        }
    }
    data::sample_world()
}

/// Handle mouse events for rotating, zooming and picking
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // Always track mouse position for cursor marker and hover readout
    app.set_mouse_pos(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_in(),
        MouseEventKind::ScrollDown => app.zoom_out(),
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        MouseEventKind::Down(MouseButton::Left) => app.start_drag(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(mouse.column, mouse.row),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, config: &RegionConfig, features: Vec<BoundaryFeature>) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(config, features.clone(), size.width as usize, size.height as usize);

    // Main loop
    loop {
        // Mirror the camera before this frame's input is handled
        app.tick();

        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                            // Rotate with hjkl or arrow keys
                            KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                            KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                            KeyCode::Up | KeyCode::Char('k') => app.pan(0, -10),
                            KeyCode::Down | KeyCode::Char('j') => app.pan(0, 10),

                            // Zoom
                            KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                            KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                            // Reset view
                            KeyCode::Char('r') | KeyCode::Char('0') => {
                                let size = terminal.size()?;
                                app = App::new(config, features.clone(), size.width as usize, size.height as usize);
                            }

                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse(&mut app, mouse);
                }
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
