use foundation::math::Vec2;
use foundation::time::Time;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tap thresholds in CSS pixels and milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub max_distance_px: f64,
    pub max_duration_ms: f64,
    /// Pointer positions arrive in device pixels; the distance threshold is
    /// scaled by this ratio.
    pub device_pixel_ratio: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            max_distance_px: 6.0,
            max_duration_ms: 250.0,
            device_pixel_ratio: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Short, still press: a selection.
    Tap,
    /// Pointer travelled past the distance threshold; orbit input.
    Drag,
    /// Still, but held longer than a tap.
    Hold,
    /// Release without a matching press.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PointerDown {
    position: Vec2,
    time: Time,
    moved: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: GestureConfig,
    down: Option<PointerDown>,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self { config, down: None }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        if ratio.is_finite() && ratio > 0.0 {
            self.config.device_pixel_ratio = ratio;
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.down.is_some()
    }

    pub fn pointer_down(&mut self, pos: [f64; 2], now: Time) {
        self.down = Some(PointerDown {
            position: Vec2::new(pos[0], pos[1]),
            time: now,
            moved: false,
        });
    }

    pub fn pointer_move(&mut self, pos: [f64; 2]) {
        let threshold = self.threshold_squared();
        if let Some(down) = &mut self.down
            && !down.moved
            && (Vec2::new(pos[0], pos[1]) - down.position).length_squared() > threshold
        {
            down.moved = true;
        }
    }

    /// Classifies the gesture ending at `pos` and forgets the press.
    pub fn pointer_up(&mut self, pos: [f64; 2], now: Time) -> GestureOutcome {
        self.pointer_move(pos);
        let Some(down) = self.down.take() else {
            return GestureOutcome::Ignored;
        };
        let elapsed = now.since(down.time);
        let outcome = if down.moved {
            GestureOutcome::Drag
        } else if elapsed <= self.config.max_duration_ms {
            GestureOutcome::Tap
        } else {
            GestureOutcome::Hold
        };
        debug!(?outcome, elapsed, "pointer released");
        outcome
    }

    fn threshold_squared(&self) -> f64 {
        let d = self.config.max_distance_px * self.config.device_pixel_ratio;
        d * d
    }
}
