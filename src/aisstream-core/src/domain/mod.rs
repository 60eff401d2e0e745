mod ais;
mod delta;
mod geo_math;
mod subscription;

pub use ais::*;
pub use delta::*;
pub use geo_math::*;
pub use subscription::*;
