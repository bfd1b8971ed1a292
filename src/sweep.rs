// Sweep-in reveal animation state machine
use std::borrow::Cow;
use std::f64::consts::PI;
use std::time::{Duration, Instant};

use crate::chart::Category;

/// Animation state for the sweep-in reveal.
///
/// `Disabled` and `Complete` both expose a full 360° sweep; they differ in
/// that `Complete` can be rewound with [`SweepState::restart_at`] while
/// `Disabled` cannot, which makes "restart a disabled animation" a
/// structural no-op instead of a runtime check.
#[derive(Clone, Copy, Debug)]
pub enum SweepState {
    /// Animation turned off; everything is visible immediately.
    Disabled,
    /// Reveal in progress.
    Sweeping { started: Instant, angle: f64 },
    /// Reveal finished; frozen until restarted.
    Complete,
}

impl SweepState {
    pub(crate) fn new(animate: bool) -> Self {
        Self::new_at(animate, Instant::now())
    }

    pub(crate) fn new_at(animate: bool, now: Instant) -> Self {
        if animate {
            Self::Sweeping {
                started: now,
                angle: 0.0,
            }
        } else {
            Self::Disabled
        }
    }

    /// Angular boundary, in degrees, up to which slices are revealed.
    pub fn sweep_angle(&self) -> f64 {
        match self {
            Self::Disabled | Self::Complete => 360.0,
            Self::Sweeping { angle, .. } => *angle,
        }
    }

    pub fn is_complete(&self) -> bool {
        !matches!(self, Self::Sweeping { .. })
    }

    /// Recompute the sweep angle from elapsed time. Once the duration has
    /// passed the state freezes at `Complete` and further calls are no-ops.
    pub(crate) fn update_at(&mut self, now: Instant, duration: Duration, aspect_ratio: f64) {
        let started = match *self {
            Self::Sweeping { started, .. } => started,
            _ => return,
        };
        if duration.is_zero() {
            *self = Self::Complete;
            return;
        }
        let progress = now.duration_since(started).as_secs_f64() / duration.as_secs_f64();
        if progress >= 1.0 {
            tracing::debug!("sweep animation complete");
            *self = Self::Complete;
            return;
        }
        *self = Self::Sweeping {
            started,
            angle: corrected_angle(progress, aspect_ratio),
        };
    }

    /// Rewind to the start of the reveal. No-op when disabled.
    pub(crate) fn restart_at(&mut self, now: Instant) {
        if matches!(self, Self::Disabled) {
            return;
        }
        *self = Self::Sweeping {
            started: now,
            angle: 0.0,
        };
    }

    /// The slices visible at the current sweep angle, in stored order.
    ///
    /// Slices whose arc lies entirely within the sweep are included as-is;
    /// the slice the sweep is currently cutting through is replaced by a
    /// partial copy whose value and end angle stop at the sweep boundary.
    pub(crate) fn visible<'a>(&self, categories: &'a [Category]) -> Cow<'a, [Category]> {
        let sweep_angle = match self {
            Self::Disabled => return Cow::Borrowed(categories),
            Self::Complete => 360.0,
            Self::Sweeping { angle, .. } => *angle,
        };

        let mut visible: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            if category.end_angle <= sweep_angle {
                visible.push(category.clone());
                continue;
            }
            let prev_end = visible.last().map_or(0.0, |c| c.end_angle);
            if sweep_angle > prev_end {
                let span = category.end_angle - prev_end;
                visible.push(Category {
                    name: category.name.clone(),
                    color: category.color.clone(),
                    value: category.value * (sweep_angle - prev_end) / span,
                    end_angle: sweep_angle,
                });
            }
            break;
        }
        Cow::Owned(visible)
    }
}

/// Map linear progress to a sweep angle that moves at a constant visual
/// rate on the stretched circle: walk the matching ellipse uniformly and
/// take the polar angle of the resulting point.
fn corrected_angle(progress: f64, aspect_ratio: f64) -> f64 {
    let uniform = progress * 2.0 * PI;
    let x = uniform.cos() / aspect_ratio;
    let y = uniform.sin();
    let mut degrees = y.atan2(x).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    degrees
}
