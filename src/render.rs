// Elliptical rasterization of the circle plus the legend band
use colored::{ColoredString, Colorize};
use std::borrow::Cow;

use crate::chart::{category_at, Category, PieChart};

const POINT_SYMBOL: &str = "•";
const LEGEND_PADDING: usize = 3;
/// Digits reserved for the legend percentage, before the `%` sign.
const PERCENT_WIDTH: usize = 3;

impl PieChart {
    /// Render the chart as a block of `2 * radius + 1` newline-joined rows
    /// (no trailing newline). Allocates slice angles first, so the output
    /// always reflects the current data regardless of how it was inserted.
    pub fn render(&mut self) -> String {
        let radius = self.config.radius;
        let aspect_ratio = self.config.aspect_ratio;
        let center_x = self.config.center_x();
        let sum = self.data.sum();

        // A zero sum means there is nothing to partition: leave the circle
        // blank instead of dividing by it.
        let visible: Cow<'_, [Category]> = if sum > 0.0 {
            self.data.allocate_angles();
            self.sweep.visible(self.data.categories())
        } else {
            Cow::Borrowed(&[])
        };

        let categories = self.data.categories();
        let legend_pad = ((radius * 2 + 1 - categories.len() as i32) as f64 / 2.0).ceil() as i32;
        let legend_start = -radius + legend_pad;
        let legend_end = radius - legend_pad;

        let max_name_len = categories.iter().map(|c| c.name.len()).max().unwrap_or(0);
        let value_width = categories
            .iter()
            .map(|c| format!("{}{:.2}", self.config.value_prefix, c.value).len())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let mut label_index = 0;

        for y in -radius..=radius {
            let width = row_width(radius, y, aspect_ratio);

            out.push_str(&" ".repeat((center_x - width).unsigned_abs() as usize));

            for x in -width..=width {
                let angle = (x as f64).atan2(y as f64).to_degrees();
                match category_at(angle, &visible) {
                    Some(category) => {
                        out.push_str(&paint(POINT_SYMBOL, &category.color).to_string());
                    }
                    None => out.push(' '),
                }
            }

            if self.config.show_legend
                && y >= legend_start
                && y <= legend_end
                && label_index < categories.len()
            {
                let category = &categories[label_index];
                let percent = if sum > 0.0 {
                    category.value / sum * 100.0
                } else {
                    0.0
                };

                out.push_str(&" ".repeat((center_x - width).max(0) as usize + LEGEND_PADDING));
                out.push_str(&paint(POINT_SYMBOL, &category.color).to_string());
                out.push_str(&format!(
                    " {:<name_width$} {:>percent_width$.0}% [{}{:>value_width$}]",
                    category.name,
                    percent,
                    self.config.value_prefix,
                    format!("{:.2}", category.value),
                    name_width = max_name_len,
                    percent_width = PERCENT_WIDTH,
                    value_width = value_width,
                ));
                out.push_str(&" ".repeat(LEGEND_PADDING));
                label_index += 1;
            }

            if y != radius {
                out.push('\n');
            }
        }

        out
    }
}

/// Visible half-width of the circle at row `y`, stretched horizontally by
/// the aspect ratio. Pole rows where the stretch would round the ellipse
/// down to nothing fall back to `radius / aspect_ratio`.
pub(crate) fn row_width(radius: i32, y: i32, aspect_ratio: f64) -> i32 {
    let width = (((radius * radius - y * y) as f64).sqrt() * aspect_ratio).round() as i32;
    if width == 0 && aspect_ratio != 1.0 {
        (radius as f64 / aspect_ratio).round() as i32
    } else {
        width
    }
}

/// Paint a symbol in a named color. Unknown tokens fall back to white.
pub(crate) fn paint(text: &str, color: &str) -> ColoredString {
    match color {
        "cyan" => text.cyan(),
        "magenta" => text.magenta(),
        "yellow" => text.yellow(),
        "green" => text.green(),
        "blue" => text.blue(),
        "red" => text.red(),
        _ => text.white(),
    }
}
