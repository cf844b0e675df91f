pub mod effects;
pub mod renderer;

pub use effects::{Effects, Explosion, Particle};
pub use renderer::{Overlay, Renderer};
