//! Vehicle and shift window types.

/// Working hours of a vehicle, in the time dimension's unit (minutes).
///
/// The vehicle must leave its start node and reach its end node within
/// `[earliest, latest]`.
///
/// # Examples
///
/// ```
/// use shift_routing::models::ShiftWindow;
///
/// let shift = ShiftWindow::new(540, 1080).unwrap();
/// assert!(shift.contains(600));
/// assert!(!shift.contains(1081));
/// assert_eq!(shift.duration(), 540);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    earliest: i64,
    latest: i64,
}

impl ShiftWindow {
    /// Creates a shift window.
    ///
    /// Returns `None` if `earliest > latest` or `earliest` is negative.
    pub fn new(earliest: i64, latest: i64) -> Option<Self> {
        if earliest < 0 || earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    pub fn earliest(&self) -> i64 {
        self.earliest
    }

    pub fn latest(&self) -> i64 {
        self.latest
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: i64) -> bool {
        time >= self.earliest && time <= self.latest
    }

    pub fn duration(&self) -> i64 {
        self.latest - self.earliest
    }
}

/// A vehicle with its own start and end node.
///
/// # Examples
///
/// ```
/// use shift_routing::models::{ShiftWindow, Vehicle};
///
/// let v = Vehicle::new(0, 0, 5)
///     .with_capacity(15)
///     .with_shift(ShiftWindow::new(540, 1080).unwrap());
/// assert_eq!(v.start(), 0);
/// assert_eq!(v.end(), 5);
/// assert_eq!(v.capacity(), Some(15));
/// assert!(!v.is_closed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    id: usize,
    external_id: String,
    start: usize,
    end: usize,
    capacity: Option<i64>,
    shift: Option<ShiftWindow>,
}

impl Vehicle {
    /// Creates a vehicle without capacity or shift limits.
    pub fn new(id: usize, start: usize, end: usize) -> Self {
        Self {
            id,
            external_id: id.to_string(),
            start,
            end,
            capacity: None,
            shift: None,
        }
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = external_id.into();
        self
    }

    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_shift(mut self, shift: ShiftWindow) -> Self {
        self.shift = Some(shift);
        self
    }

    /// Internal vehicle index.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    /// Node index where the route begins.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Node index where the route ends.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Maximum load, if the fleet is capacitated.
    pub fn capacity(&self) -> Option<i64> {
        self.capacity
    }

    /// Working shift, if time is modelled.
    pub fn shift(&self) -> Option<&ShiftWindow> {
        self.shift.as_ref()
    }

    /// Returns `true` if the route returns to its start node.
    pub fn is_closed(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_valid() {
        let s = ShiftWindow::new(540, 1080).expect("valid");
        assert_eq!(s.earliest(), 540);
        assert_eq!(s.latest(), 1080);
    }

    #[test]
    fn test_shift_invalid() {
        assert!(ShiftWindow::new(1080, 540).is_none());
        assert!(ShiftWindow::new(-1, 540).is_none());
    }

    #[test]
    fn test_shift_bounds_inclusive() {
        let s = ShiftWindow::new(10, 20).expect("valid");
        assert!(s.contains(10));
        assert!(s.contains(20));
        assert!(!s.contains(9));
        assert!(!s.contains(21));
    }

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(2, 1, 1);
        assert_eq!(v.id(), 2);
        assert_eq!(v.external_id(), "2");
        assert!(v.capacity().is_none());
        assert!(v.shift().is_none());
        assert!(v.is_closed());
    }

    #[test]
    fn test_vehicle_builder() {
        let v = Vehicle::new(0, 0, 3)
            .with_external_id("van-a")
            .with_capacity(100)
            .with_shift(ShiftWindow::new(0, 480).expect("valid"));
        assert_eq!(v.external_id(), "van-a");
        assert_eq!(v.capacity(), Some(100));
        assert_eq!(v.shift().map(|s| s.latest()), Some(480));
        assert!(!v.is_closed());
    }
}
