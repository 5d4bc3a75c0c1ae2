pub mod antimeridian;
pub mod geodesy;
pub mod projection;
pub mod quat;
pub mod sphere;
pub mod vec;

pub use antimeridian::*;
pub use geodesy::*;
pub use projection::*;
pub use quat::*;
pub use sphere::*;
pub use vec::*;
