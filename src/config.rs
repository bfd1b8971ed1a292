// Chart settings
use std::time::Duration;

/// Settings for a [`crate::PieChart`], fixed after construction.
#[derive(Clone, Debug)]
pub struct ChartConfig {
    /// Half-height of the rendered circle in rows. Must be positive
    /// (zero renders the degenerate single-cell chart).
    pub radius: i32,
    /// Horizontal stretch compensating for character cells being taller
    /// than wide. Must stay positive.
    pub aspect_ratio: f64,
    pub show_legend: bool,
    /// Prefix for legend values (e.g. `"$"`).
    pub value_prefix: String,
    pub animate: bool,
    pub animation_duration: Duration,
}

impl ChartConfig {
    pub fn new(radius: i32) -> Self {
        Self {
            radius,
            aspect_ratio: 2.0,
            show_legend: true,
            value_prefix: String::new(),
            animate: false,
            animation_duration: Duration::from_millis(500),
        }
    }

    /// Horizontal center offset of the stretched circle.
    pub(crate) fn center_x(&self) -> i32 {
        (self.radius as f64 * self.aspect_ratio).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChartConfig::new(5);
        assert_eq!(config.radius, 5);
        assert_eq!(config.aspect_ratio, 2.0);
        assert!(config.show_legend);
        assert!(!config.animate);
        assert_eq!(config.animation_duration, Duration::from_millis(500));
        assert_eq!(config.value_prefix, "");
    }

    #[test]
    fn test_center_x_follows_aspect() {
        assert_eq!(ChartConfig::new(5).center_x(), 10);
        let mut config = ChartConfig::new(5);
        config.aspect_ratio = 1.0;
        assert_eq!(config.center_x(), 5);
        config.aspect_ratio = 1.5;
        assert_eq!(config.center_x(), 8);
    }
}
