use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use termpie::{load_dataset, Category, PieChart};

#[derive(Parser)]
#[command(name = "termpie")]
#[command(about = "Render animated pie charts in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a chart once
    Render {
        /// JSON dataset file (default: built-in sample data)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Circle radius in rows
        #[arg(short, long, default_value = "5")]
        radius: i32,

        /// Horizontal stretch compensating for character cell shape
        #[arg(long, default_value = "2.0")]
        aspect_ratio: f64,

        /// Hide the legend
        #[arg(long)]
        no_legend: bool,

        /// Prefix for legend values (e.g. "$")
        #[arg(long, default_value = "")]
        value_prefix: String,
    },

    /// Animate the sweep-in reveal
    Animate {
        /// JSON dataset file (default: built-in sample data)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Circle radius in rows
        #[arg(short, long, default_value = "5")]
        radius: i32,

        /// Horizontal stretch compensating for character cell shape
        #[arg(long, default_value = "2.0")]
        aspect_ratio: f64,

        /// Animation length in milliseconds
        #[arg(long, default_value = "1500")]
        duration_ms: u64,

        /// Frames per second
        #[arg(long, default_value = "30")]
        fps: u64,

        /// Hide the legend
        #[arg(long)]
        no_legend: bool,

        /// Prefix for legend values (e.g. "$")
        #[arg(long, default_value = "")]
        value_prefix: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Render {
            data,
            radius,
            aspect_ratio,
            no_legend,
            value_prefix,
        } => {
            let mut chart =
                build_chart(data.as_deref(), radius, aspect_ratio, no_legend, &value_prefix)?;
            println!("{}", chart.render());
            Ok(())
        }

        Commands::Animate {
            data,
            radius,
            aspect_ratio,
            duration_ms,
            fps,
            no_legend,
            value_prefix,
        } => {
            let mut chart =
                build_chart(data.as_deref(), radius, aspect_ratio, no_legend, &value_prefix)?
                    .with_animation(true)
                    .with_animation_duration(Duration::from_millis(duration_ms));
            animate(&mut chart, fps)
        }
    }
}

fn build_chart(
    data: Option<&Path>,
    radius: i32,
    aspect_ratio: f64,
    no_legend: bool,
    value_prefix: &str,
) -> Result<PieChart> {
    let mut chart = PieChart::new(radius)
        .with_aspect_ratio(aspect_ratio)
        .with_legend(!no_legend)
        .with_value_prefix(value_prefix);

    match data {
        Some(path) => {
            let dataset = load_dataset(path)?;
            info!(
                "loaded {} categories from {}",
                dataset.categories.len(),
                path.display()
            );
            if value_prefix.is_empty() && !dataset.value_prefix.is_empty() {
                chart = chart.with_value_prefix(&dataset.value_prefix);
            }
            chart = chart
                .with_label(&dataset.label)
                .with_data(dataset.categories);
        }
        None => {
            chart = chart.with_label("Sample").with_data(sample_data());
        }
    }

    Ok(chart)
}

fn sample_data() -> Vec<Category> {
    vec![
        Category::new("Rust", "cyan", 44.0),
        Category::new("Go", "magenta", 26.5),
        Category::new("Python", "yellow", 17.5),
        Category::new("Shell", "green", 8.0),
        Category::new("Other", "blue", 4.0),
    ]
}

fn animate(chart: &mut PieChart, fps: u64) -> Result<()> {
    let mut stdout = io::stdout();

    execute!(stdout, cursor::Hide)?;
    let res = run_frames(chart, fps, &mut stdout);
    execute!(stdout, cursor::Show)?;
    writeln!(stdout)?;

    res
}

fn run_frames(chart: &mut PieChart, fps: u64, stdout: &mut Stdout) -> Result<()> {
    let frame = Duration::from_millis(1000 / fps.max(1));

    loop {
        chart.update();
        execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        write!(stdout, "{}", chart.render())?;
        stdout.flush()?;

        if chart.is_animation_complete() {
            return Ok(());
        }
        thread::sleep(frame);
    }
}
