//! Particle field simulation: drifting, twinkling stars and soft nebula
//! clouds, regenerated on viewport changes and described once per frame.

pub mod field;
pub mod frame;
pub mod motion;
pub mod nebula;
pub mod star;
pub mod viewport;

pub use field::ParticleField;
pub use frame::{Frame, GradientDisc, StarDisc};
pub use motion::REFERENCE_FRAME_MS;
pub use nebula::{Blob, Nebula};
pub use star::Star;
pub use viewport::{PhysicalSize, Viewport};
