//! Animated pie charts for the terminal.
//!
//! Renders a set of weighted categories as a colored text-block pie chart,
//! with an optional legend and an optional sweep-in reveal animation. The
//! chart is a plain rendering component: it owns no input handling and no
//! terminal control, and [`PieChart::render`] just returns a multi-line
//! `String` for the surrounding application to print.
//!
//! ```
//! use termpie::{Category, PieChart};
//!
//! let mut chart = PieChart::new(4).with_data(vec![
//!     Category::new("Rust", "cyan", 50.0),
//!     Category::new("Go", "magenta", 30.0),
//!     Category::new("Python", "yellow", 20.0),
//! ]);
//! println!("{}", chart.render());
//! ```
//!
//! With animation enabled, drive the chart from a frame loop: call
//! [`PieChart::update`] then [`PieChart::render`] each frame until
//! [`PieChart::is_animation_complete`] reports true.

mod chart;
mod config;
mod dataset;
mod render;
mod sweep;

pub use chart::{Category, ChartData, PieChart};
pub use config::ChartConfig;
pub use dataset::{load_dataset, Dataset, DatasetError};
pub use sweep::SweepState;
