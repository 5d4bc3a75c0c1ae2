/// Host timestamp in milliseconds (e.g. a monotonic frame clock).
///
/// The engine never reads a clock itself; every timestamp is supplied by the
/// caller so animations can be replayed with synthetic time.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64);

impl Time {
    pub fn from_millis(ms: f64) -> Self {
        Self(ms)
    }

    pub fn as_millis(self) -> f64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier` (negative if `earlier` is later).
    pub fn since(self, earlier: Time) -> f64 {
        self.0 - earlier.0
    }

    pub fn add_millis(self, ms: f64) -> Self {
        Self(self.0 + ms)
    }
}
