pub mod ambient;
pub mod silent;

pub use ambient::TracingAmbientAdapter;
pub use silent::SilentAmbientAdapter;
