//! Eased camera flights along a great circle.
//!
//! A flight keeps the camera distance fixed and moves the view direction from
//! where the camera is now to a target direction. Cancelling a flight stops
//! it where it is: nothing keeps easing afterwards and the camera is never
//! snapped back.

use foundation::math::Vec3;
use foundation::time::Time;
use tracing::debug;

use crate::camera::OrbitCamera;
use crate::config::NavigationConfig;

/// Ease-in-out quadratic on `[0, 1]`.
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flight {
    pub start_direction: Vec3,
    pub target_direction: Vec3,
    pub start_time: Time,
    pub duration_ms: f64,
    /// Camera distance captured at start, clamped to the orbit range.
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FlightPhase {
    #[default]
    Idle,
    Flying(Flight),
}

#[derive(Debug, Clone, Default)]
pub struct FlightController {
    phase: FlightPhase,
    bounds: NavigationConfig,
}

impl FlightController {
    pub fn new(bounds: NavigationConfig) -> Self {
        Self {
            phase: FlightPhase::Idle,
            bounds,
        }
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn is_flying(&self) -> bool {
        matches!(self.phase, FlightPhase::Flying(_))
    }

    /// Starts (or restarts) a flight toward `target`.
    ///
    /// Returns `false` and leaves the state untouched when `target` has no
    /// direction.
    pub fn start(
        &mut self,
        target: Vec3,
        duration_ms: f64,
        camera: &mut OrbitCamera,
        now: Time,
    ) -> bool {
        let Some(target_direction) = target.normalize() else {
            debug!("flight target has no direction, ignored");
            return false;
        };
        let offset = camera.position - camera.target;
        let start_direction = offset.normalize().unwrap_or(target_direction);
        let radius = self.bounds.clamp_distance(offset.length());

        self.phase = FlightPhase::Flying(Flight {
            start_direction,
            target_direction,
            start_time: now,
            duration_ms,
            radius,
        });
        camera.manual_control = false;
        debug!(duration_ms, radius, "flight started");
        true
    }

    /// Advances the flight to `now`. Returns `true` if the camera moved.
    pub fn tick(&mut self, now: Time, camera: &mut OrbitCamera) -> bool {
        let FlightPhase::Flying(flight) = self.phase else {
            return false;
        };

        let t = if flight.duration_ms > 0.0 {
            (now.since(flight.start_time) / flight.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if t >= 1.0 {
            camera.position = camera.target + flight.target_direction.scale(flight.radius);
            camera.manual_control = true;
            self.phase = FlightPhase::Idle;
            debug!("flight finished");
            return true;
        }

        let k = ease_in_out_quad(t);
        let dir = flight
            .start_direction
            .slerp_unit(flight.target_direction, k);
        camera.position = camera.target + dir.scale(flight.radius);
        true
    }

    /// Stops any flight in place and hands the camera back to the user.
    pub fn cancel(&mut self, camera: &mut OrbitCamera) {
        if self.is_flying() {
            self.phase = FlightPhase::Idle;
            camera.manual_control = true;
            debug!("flight cancelled");
        }
    }
}
