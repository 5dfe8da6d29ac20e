mod camera;
mod scene;
mod service;
mod target;

pub use camera::{Camera, Ray};
pub use scene::{Globe, ShadowScene};
pub use service::PickingService;
pub use target::OffscreenTarget;
