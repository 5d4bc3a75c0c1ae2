//! Camera navigation around the globe: orbit camera, eased flights toward a
//! surface direction, tap/drag classification and the location pin.

pub mod camera;
pub mod config;
pub mod flight;
pub mod gesture;
pub mod pin;

pub use camera::OrbitCamera;
pub use config::NavigationConfig;
pub use flight::{Flight, FlightController, FlightPhase, ease_in_out_quad};
pub use gesture::{GestureClassifier, GestureConfig, GestureOutcome};
pub use pin::PinPose;
