use log::info;
use std::sync::Arc;

use globe_picker::picking::Globe;
use globe_picker::{
    BoundaryFeature, Camera, FillSurface, OutlineSurface, PickingService, PointMembershipTester,
    RegionConfig, RegionId, RegionPrefilter, RegionRasterizer, RegionSet, NO_REGION,
};

/// Orbit distance limits; the far limit keeps the globe inside the far plane.
const MIN_DISTANCE: f64 = 1.1;
const MAX_DISTANCE: f64 = 4.5;

/// UI session state shared with the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Region picked by the last click, [`NO_REGION`] when nothing is selected.
    pub selected: RegionId,
}

/// What the mouse is over, from the CPU membership path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hover {
    pub lon: f64,
    pub lat: f64,
    pub region: Option<RegionId>,
}

/// Application state
pub struct App {
    pub regions: RegionSet,
    pub fill: Arc<FillSurface>,
    pub outline: OutlineSurface,
    pub globe: Globe,
    pub camera: Camera,
    pub picker: PickingService,
    pub session: Session,
    pub hover: Option<Hover>,
    pub should_quit: bool,
    /// Canvas size in braille dots
    pub width: usize,
    pub height: usize,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    dragged: bool,
    /// Current mouse position for cursor marker
    pub mouse_pos: Option<(u16, u16)>,
}

impl App {
    /// Build the region lookup and picking state. Runs the prefilter and
    /// both raster passes synchronously; nothing can query before this
    /// returns.
    pub fn new(config: &RegionConfig, features: Vec<BoundaryFeature>, cols: usize, rows: usize) -> Self {
        let regions = RegionPrefilter::from_config(config).build(features);
        let output = RegionRasterizer::from_config(&regions, config).rasterize();
        let fill = Arc::new(output.fill);

        let (width, height) = canvas_size(cols, rows);
        let camera = Camera::from_config(config, aspect(width, height));
        let picker = PickingService::new(Arc::clone(&fill), config.globe_radius, &camera, width, height);

        info!(
            "viewer ready: {} regions, canvas {}x{} dots",
            regions.len(),
            width,
            height
        );

        Self {
            regions,
            fill,
            outline: output.outline,
            globe: Globe::new(config.globe_radius),
            camera,
            picker,
            session: Session::default(),
            hover: None,
            should_quit: false,
            width,
            height,
            last_mouse: None,
            dragged: false,
            mouse_pos: None,
        }
    }

    /// Per-frame tick: mirror the camera into the picker before any input
    /// from this frame is handled.
    pub fn tick(&mut self) {
        self.picker.sync_camera(&self.camera);
    }

    /// Update canvas size when terminal resizes
    pub fn resize(&mut self, cols: usize, rows: usize) {
        let (width, height) = canvas_size(cols, rows);
        self.width = width;
        self.height = height;
        self.camera.set_aspect(aspect(width, height));
        self.picker.resize(width, height);
    }

    /// Rotate the globe by pixel deltas, slower when zoomed in.
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let (_, _, distance) = self.camera.orbit_position();
        let degrees_per_dot = 0.6 * (distance - self.globe.radius).max(0.05);
        self.camera
            .rotate_orbit(dx as f64 * degrees_per_dot, -(dy as f64) * degrees_per_dot);
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom(1.0 / 1.15, MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom(1.15, MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn start_drag(&mut self, col: u16, row: u16) {
        self.last_mouse = Some((col, row));
        self.dragged = false;
    }

    /// Handle mouse drag
    pub fn handle_drag(&mut self, col: u16, row: u16) {
        if let Some((last_col, last_row)) = self.last_mouse {
            let dx = last_col as i32 - col as i32;
            let dy = last_row as i32 - row as i32;
            if dx != 0 || dy != 0 {
                self.dragged = true;
                self.pan(dx * 2, dy * 4);
            }
        }
        self.last_mouse = Some((col, row));
    }

    /// Mouse released: a press without drag is a click.
    pub fn end_drag(&mut self, col: u16, row: u16) {
        if self.last_mouse.is_some() && !self.dragged {
            self.click(col, row);
        }
        self.last_mouse = None;
        self.dragged = false;
    }

    /// Pick the region under a terminal cell and make it the selection.
    pub fn click(&mut self, col: u16, row: u16) {
        let (x, y) = cell_to_dot(col, row);
        let id = self.picker.pick(x, y);
        self.session.selected = id;
        info!("selected region {} ({})", id, self.selected_label());
    }

    /// Update mouse cursor position and the hover readout.
    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
        let (x, y) = cell_to_dot(col, row);
        let (ndc_x, ndc_y) = self.dot_to_ndc(x, y);
        self.hover = self.globe.surface_at(&self.camera, ndc_x, ndc_y).map(|(lon, lat)| Hover {
            lon,
            lat,
            region: PointMembershipTester::new(&self.regions).region_at(lat, lon),
        });
    }

    /// Normalized device coordinates of a dot position (top-left origin).
    pub fn dot_to_ndc(&self, x: f64, y: f64) -> (f64, f64) {
        let ndc_x = x / self.width as f64 * 2.0 - 1.0;
        let ndc_y = 1.0 - y / self.height as f64 * 2.0;
        (ndc_x, ndc_y)
    }

    /// Mouse position in braille dots (for the cursor marker).
    pub fn mouse_dot_pos(&self) -> Option<(usize, usize)> {
        self.mouse_pos.map(|(col, row)| {
            let (x, y) = cell_to_dot(col, row);
            (x as usize, y as usize)
        })
    }

    pub fn selected_label(&self) -> String {
        self.region_label(self.session.selected)
    }

    pub fn region_label(&self, id: RegionId) -> String {
        if id == NO_REGION {
            return "none".to_string();
        }
        self.regions
            .get(id)
            .map(|r| r.label())
            .unwrap_or_else(|| format!("unknown #{id}"))
    }

    /// Camera position as a string
    pub fn camera_coords(&self) -> String {
        let (lon, lat, distance) = self.camera.orbit_position();
        format!(
            "{:.1}°{}, {:.1}°{} @ {:.2}",
            lat.abs(),
            if lat >= 0.0 { "N" } else { "S" },
            lon.abs(),
            if lon >= 0.0 { "E" } else { "W" },
            distance
        )
    }
}

/// Braille dots inside the bordered map area for a terminal of `cols` x `rows`.
/// Border takes 2 columns and 2 rows, the status bar 1 row.
fn canvas_size(cols: usize, rows: usize) -> (usize, usize) {
    let inner_width = cols.saturating_sub(2).max(1);
    let inner_height = rows.saturating_sub(3).max(1);
    (inner_width * 2, inner_height * 4)
}

fn aspect(width: usize, height: usize) -> f64 {
    width as f64 / height.max(1) as f64
}

/// Centre of a terminal cell in braille dots, accounting for the border.
fn cell_to_dot(col: u16, row: u16) -> (f64, f64) {
    let x = col.saturating_sub(1) as f64 * 2.0 + 1.0;
    let y = row.saturating_sub(1) as f64 * 4.0 + 2.0;
    (x, y)
}
