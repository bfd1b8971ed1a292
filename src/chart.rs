// Pie chart data model: weighted categories, angle allocation, slice lookup
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::ChartConfig;
use crate::sweep::SweepState;

/// One weighted slice of the pie.
///
/// The color is an opaque token (e.g. `"cyan"`) resolved only when a cell is
/// painted; unknown tokens render white.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: String,
    pub value: f64,
    /// Cumulative angle at which this slice's arc ends. Computed during
    /// angle allocation, never set by callers.
    #[serde(skip)]
    pub(crate) end_angle: f64,
}

impl Category {
    pub fn new(name: &str, color: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            value,
            end_angle: 0.0,
        }
    }

    /// Cumulative end angle assigned by the last allocation pass.
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }
}

/// The categories backing a chart plus their running total.
#[derive(Clone, Debug, Default)]
pub struct ChartData {
    /// Informational label; not used by rendering.
    pub label: String,
    categories: Vec<Category>,
    sum: f64,
}

impl ChartData {
    /// Add a single category. Negative values are clamped to zero.
    pub fn push(&mut self, mut category: Category) {
        category.value = category.value.max(0.0);
        self.sum += category.value;
        self.categories.push(category);
    }

    /// Add a batch of categories, then sort by descending value.
    pub fn push_all(&mut self, categories: Vec<Category>) {
        for category in categories {
            self.push(category);
        }
        self.sort();
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    // Stable: equal values keep their insertion order.
    fn sort(&mut self) {
        self.categories.sort_by(|a, b| b.value.total_cmp(&a.value));
    }

    /// Assign each category its cumulative end angle so that arc widths are
    /// proportional to values. Re-sorts first, so the ordering invariant
    /// holds no matter how values were inserted. Skipped entirely when the
    /// sum is zero.
    pub(crate) fn allocate_angles(&mut self) {
        if self.sum == 0.0 {
            return;
        }
        self.sort();
        let mut start = 0.0;
        for category in &mut self.categories {
            let arc = category.value / self.sum * 360.0;
            category.end_angle = start + arc;
            start += arc;
        }
        tracing::debug!(
            categories = self.categories.len(),
            sum = self.sum,
            "allocated slice angles"
        );
    }
}

/// First category whose arc contains the given cell angle.
///
/// `angle` comes from `atan2(x, y)` over row/column offsets, which is rotated
/// and mirrored relative to the chart's own zero reference; the `180 - angle`
/// comparison is the exact convention that maps between the two. Do not
/// simplify it.
pub(crate) fn category_at(angle: f64, visible: &[Category]) -> Option<&Category> {
    visible.iter().find(|c| 180.0 - angle <= c.end_angle)
}

/// Terminal pie chart: configuration, category data and sweep animation
/// state. Render with [`PieChart::render`].
#[derive(Clone, Debug)]
pub struct PieChart {
    pub(crate) config: ChartConfig,
    pub(crate) data: ChartData,
    pub(crate) sweep: SweepState,
}

impl PieChart {
    /// Create a chart with the given radius (half-height in rows) and
    /// default settings: legend shown, aspect ratio 2.0, no animation.
    pub fn new(radius: i32) -> Self {
        Self {
            config: ChartConfig::new(radius),
            data: ChartData::default(),
            sweep: SweepState::Disabled,
        }
    }

    pub fn with_legend(mut self, show_legend: bool) -> Self {
        self.config.show_legend = show_legend;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.config.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_value_prefix(mut self, prefix: &str) -> Self {
        self.config.value_prefix = prefix.to_string();
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.data.label = label.to_string();
        self
    }

    /// Enable or disable the sweep-in reveal. Enabling starts the clock
    /// immediately.
    pub fn with_animation(mut self, animate: bool) -> Self {
        self.config.animate = animate;
        self.sweep = SweepState::new(animate);
        self
    }

    pub fn with_animation_duration(mut self, duration: std::time::Duration) -> Self {
        self.config.animation_duration = duration;
        self
    }

    /// Bulk-load categories via [`ChartData::push_all`].
    pub fn with_data(mut self, categories: Vec<Category>) -> Self {
        self.data.push_all(categories);
        self
    }

    /// Add a single category. See [`ChartData::push`].
    pub fn push(&mut self, category: Category) {
        self.data.push(category);
    }

    /// Add a batch of categories. See [`ChartData::push_all`].
    pub fn push_all(&mut self, categories: Vec<Category>) {
        self.data.push_all(categories);
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Angular boundary up to which slices are currently revealed.
    pub fn sweep_angle(&self) -> f64 {
        self.sweep.sweep_angle()
    }

    /// Advance the animation clock. Call once per frame before rendering.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    pub(crate) fn update_at(&mut self, now: Instant) {
        self.sweep.update_at(
            now,
            self.config.animation_duration,
            self.config.aspect_ratio,
        );
    }

    /// Rewind the animation to the start. No-op when animation is disabled.
    pub fn restart_animation(&mut self) {
        self.sweep.restart_at(Instant::now());
    }

    /// True once the sweep has reached a full circle (always true when
    /// animation is disabled).
    pub fn is_animation_complete(&self) -> bool {
        self.sweep.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Category> {
        vec![
            Category::new("A", "cyan", 50.0),
            Category::new("B", "magenta", 30.0),
            Category::new("C", "yellow", 20.0),
        ]
    }

    #[test]
    fn test_push_clamps_negative_values() {
        let mut data = ChartData::default();
        data.push(Category::new("neg", "red", -5.0));
        assert_eq!(data.categories()[0].value, 0.0);
        assert_eq!(data.sum(), 0.0);
    }

    #[test]
    fn test_sum_tracks_insertions() {
        let mut data = ChartData::default();
        data.push(Category::new("a", "red", 1.5));
        data.push(Category::new("b", "blue", 2.5));
        data.push(Category::new("c", "green", -1.0));
        assert_eq!(data.sum(), 4.0);
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_push_all_sorts_descending() {
        let mut data = ChartData::default();
        data.push_all(vec![
            Category::new("small", "red", 1.0),
            Category::new("big", "blue", 10.0),
            Category::new("mid", "green", 5.0),
        ]);
        let names: Vec<&str> = data.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["big", "mid", "small"]);
    }

    #[test]
    fn test_push_all_sort_is_stable() {
        let mut data = ChartData::default();
        data.push_all(vec![
            Category::new("first", "red", 5.0),
            Category::new("second", "blue", 5.0),
            Category::new("third", "green", 5.0),
        ]);
        let names: Vec<&str> = data.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_allocated_angles_match_shares() {
        let mut data = ChartData::default();
        data.push_all(sample());
        data.allocate_angles();
        let angles: Vec<f64> = data.categories().iter().map(|c| c.end_angle()).collect();
        assert_eq!(angles, [180.0, 288.0, 360.0]);
    }

    #[test]
    fn test_allocated_angles_non_decreasing_to_full_circle() {
        let mut data = ChartData::default();
        data.push_all(vec![
            Category::new("a", "red", 3.1),
            Category::new("b", "blue", 0.7),
            Category::new("c", "green", 12.9),
            Category::new("d", "cyan", 1.3),
            Category::new("e", "yellow", 7.7),
        ]);
        data.allocate_angles();
        let angles: Vec<f64> = data.categories().iter().map(|c| c.end_angle()).collect();
        assert!(angles.windows(2).all(|w| w[0] <= w[1]));
        assert!((angles.last().unwrap() - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_allocation_sorts_unsorted_pushes() {
        // A bare push does not sort; the allocation pass must.
        let mut data = ChartData::default();
        data.push(Category::new("small", "red", 1.0));
        data.push(Category::new("big", "blue", 9.0));
        data.allocate_angles();
        assert_eq!(data.categories()[0].name, "big");
        assert_eq!(data.categories()[0].end_angle(), 324.0);
    }

    #[test]
    fn test_zero_sum_skips_allocation() {
        let mut data = ChartData::default();
        data.push_all(vec![
            Category::new("a", "red", 0.0),
            Category::new("b", "blue", 0.0),
        ]);
        data.allocate_angles();
        assert!(data.categories().iter().all(|c| c.end_angle() == 0.0));
    }

    #[test]
    fn test_category_at_selects_by_arc() {
        let mut data = ChartData::default();
        data.push_all(sample());
        data.allocate_angles();
        let categories = data.categories();

        // A owns [0, 180], reached from cell angles in [0, 180]
        assert_eq!(category_at(0.0, categories).unwrap().name, "A");
        assert_eq!(category_at(90.0, categories).unwrap().name, "A");
        assert_eq!(category_at(180.0, categories).unwrap().name, "A");
        // B owns (180, 288]
        assert_eq!(category_at(-90.0, categories).unwrap().name, "B");
        // C owns (288, 360]
        assert_eq!(category_at(-179.0, categories).unwrap().name, "C");
    }

    #[test]
    fn test_category_at_empty() {
        assert!(category_at(0.0, &[]).is_none());
    }

    #[test]
    fn test_builder_settings() {
        let chart = PieChart::new(4)
            .with_legend(false)
            .with_aspect_ratio(1.0)
            .with_value_prefix("$")
            .with_label("Spending");
        assert_eq!(chart.config().radius, 4);
        assert_eq!(chart.config().aspect_ratio, 1.0);
        assert!(!chart.config().show_legend);
        assert_eq!(chart.config().value_prefix, "$");
        assert_eq!(chart.data().label, "Spending");
    }

    #[test]
    fn test_animation_disabled_by_default() {
        let chart = PieChart::new(4).with_data(sample());
        assert!(chart.is_animation_complete());
        assert_eq!(chart.sweep_angle(), 360.0);
    }

    #[test]
    fn test_update_at_drives_animation_to_completion() {
        use std::time::Duration;

        let mut chart = PieChart::new(3)
            .with_animation(true)
            .with_animation_duration(Duration::from_millis(200))
            .with_data(sample());
        assert!(!chart.is_animation_complete());
        assert_eq!(chart.sweep_angle(), 0.0);

        let started = match chart.sweep {
            SweepState::Sweeping { started, .. } => started,
            _ => unreachable!("animation was enabled"),
        };

        chart.update_at(started + Duration::from_millis(100));
        assert!(!chart.is_animation_complete());
        assert!(chart.sweep_angle() > 0.0);

        chart.update_at(started + Duration::from_millis(200));
        assert!(chart.is_animation_complete());
        assert_eq!(chart.sweep_angle(), 360.0);
    }
}
