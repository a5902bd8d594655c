//! Decorative canvas layers
//!
//! Nothing here handles input: both programs keep the default `update`, so
//! clicks fall through to the widgets underneath.

use std::f32::consts::PI;

use iced::mouse::Cursor;
use iced::widget::canvas::{self, Path, Program};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use crate::state::data::Position;
use crate::Message;

/// Period of the large orbiting blobs, in seconds
const BLOB_PERIOD: f32 = 20.0;
/// Period of a glitter twinkle, in seconds
const GLITTER_PERIOD: f32 = 2.0;
/// Half period of a floating heart (it plays forward then in reverse)
const HEART_PERIOD: f32 = 3.0;
/// Full breath of the halo behind the landing heart, in seconds
const HALO_PERIOD: f32 = 2.0;
/// Parallax blobs move by pointer / PARALLAX_DIVISOR
const PARALLAX_DIVISOR: f32 = 30.0;

const HEART_COUNT: usize = 8;
const GLITTER_COUNT: usize = 15;

const PINK_100: Color = Color {
    r: 0.988,
    g: 0.906,
    b: 0.953,
    a: 1.0,
};
const PINK_200: Color = Color {
    r: 0.984,
    g: 0.812,
    b: 0.910,
    a: 1.0,
};
const PINK_400: Color = Color {
    r: 0.957,
    g: 0.447,
    b: 0.714,
    a: 1.0,
};
const PURPLE_100: Color = Color {
    r: 0.953,
    g: 0.910,
    b: 1.0,
    a: 1.0,
};
const PURPLE_200: Color = Color {
    r: 0.914,
    g: 0.835,
    b: 1.0,
    a: 1.0,
};

/// Background: orbiting blobs, pointer parallax, hearts and glitter
#[derive(Debug, Clone, Copy)]
pub struct Backdrop {
    pub pointer: Position,
    /// Seconds since the page opened
    pub elapsed: f32,
}

impl Program<Message> for Backdrop {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let size = bounds.size();

        // Two large blobs drifting out and back over one period
        let swell = pulse(self.elapsed / BLOB_PERIOD);
        frame.fill(
            &Path::circle(
                Point::new(size.width + 30.0 * swell, -30.0 * swell),
                160.0 * (1.0 + 0.2 * swell),
            ),
            with_alpha(PINK_200, 0.6),
        );
        frame.fill(
            &Path::circle(
                Point::new(-30.0 * swell, size.height + 30.0 * swell),
                160.0 * (1.2 - 0.2 * swell),
            ),
            with_alpha(PURPLE_200, 0.6),
        );

        // Parallax blobs follow the pointer in opposite directions
        let dx = self.pointer.x / PARALLAX_DIVISOR;
        let dy = self.pointer.y / PARALLAX_DIVISOR;
        frame.fill(
            &Path::circle(Point::new(size.width - 160.0 + dx, 160.0 + dy), 80.0),
            with_alpha(PINK_100, 0.5),
        );
        frame.fill(
            &Path::circle(Point::new(160.0 - dx, size.height - 160.0 - dy), 80.0),
            with_alpha(PURPLE_100, 0.5),
        );

        for i in 0..HEART_COUNT {
            let anchor = scatter(i, size);
            // Mirror-repeat: 0 -> 1 over one period, back to 0 over the next
            let t = pulse(self.elapsed / (2.0 * HEART_PERIOD));
            let scale = 0.8 + 0.2 * t;
            let lift = -20.0 * t;
            let heart_size = 12.0 + 4.0 * (i % 3) as f32;

            frame.fill(
                &heart(Point::new(anchor.x, anchor.y + lift), heart_size * scale),
                with_alpha(PINK_400, 0.2 + 0.3 * t),
            );
        }

        for i in 0..GLITTER_COUNT {
            let anchor = scatter(i + HEART_COUNT, size);
            let phase = self.elapsed / GLITTER_PERIOD + i as f32 * 0.13;
            let twinkle = pulse(phase);
            let radius = (1.0 + (i % 5) as f32 * 0.5) * twinkle;

            if radius > 0.05 {
                frame.fill(
                    &Path::circle(anchor, radius),
                    with_alpha(Color::WHITE, twinkle),
                );
            }
        }

        vec![frame.into_geometry()]
    }
}

/// Pulsing circle drawn behind the landing heart
#[derive(Debug, Clone, Copy)]
pub struct HeartHalo {
    /// Seconds since the page opened
    pub elapsed: f32,
}

impl Program<Message> for HeartHalo {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let (scale, alpha) = halo(self.elapsed);

        // Sized so the fully swollen circle still fits the bounds
        let radius = bounds.width.min(bounds.height) / 2.0 / 1.5 * scale;
        frame.fill(&Path::circle(frame.center(), radius), with_alpha(PINK_200, alpha));

        vec![frame.into_geometry()]
    }
}

/// Halo scale (1.0 to 1.5) and opacity (0.2 to 0.5) at `elapsed` seconds
fn halo(elapsed: f32) -> (f32, f32) {
    let t = pulse(elapsed / HALO_PERIOD);
    (1.0 + 0.5 * t, 0.2 + 0.3 * t)
}

/// Click sparkles, each scaled and faded over its lifetime
#[derive(Debug, Clone, Default)]
pub struct SparkleLayer {
    /// Position and lifetime progress (0.0 to 1.0) of every live sparkle
    sparkles: Vec<(Position, f32)>,
}

impl SparkleLayer {
    pub fn new(sparkles: Vec<(Position, f32)>) -> Self {
        Self { sparkles }
    }
}

impl Program<Message> for SparkleLayer {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        for (position, progress) in &self.sparkles {
            // 0 -> 1 -> 0 over the lifetime
            let strength = 1.0 - (2.0 * progress - 1.0).abs();
            if strength <= 0.0 {
                continue;
            }

            let center = Point::new(position.x - bounds.x, position.y - bounds.y);
            frame.fill(&star(center, 16.0 * strength), with_alpha(PINK_400, strength));
        }

        vec![frame.into_geometry()]
    }
}

/// 0 -> 1 -> 0 once per unit of `t`, smooth at both ends
fn pulse(t: f32) -> f32 {
    (PI * t.rem_euclid(1.0)).sin()
}

/// Stable pseudo-random placement inside `size` for decoration `i`
fn scatter(i: usize, size: Size) -> Point {
    // Golden-ratio sequences spread points evenly without clumping
    const PHI: f32 = 0.618_034;
    let x = (0.1 + i as f32 * PHI).fract();
    let y = (0.27 + i as f32 * PHI * PHI).fract();
    Point::new(x * size.width, y * size.height)
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color {
        a: alpha.clamp(0.0, 1.0),
        ..color
    }
}

fn heart(center: Point, size: f32) -> Path {
    let (cx, cy) = (center.x, center.y);
    Path::new(|builder| {
        builder.move_to(Point::new(cx, cy + size * 0.35));
        builder.bezier_curve_to(
            Point::new(cx - size * 0.9, cy - size * 0.25),
            Point::new(cx - size * 0.45, cy - size * 0.95),
            Point::new(cx, cy - size * 0.45),
        );
        builder.bezier_curve_to(
            Point::new(cx + size * 0.45, cy - size * 0.95),
            Point::new(cx + size * 0.9, cy - size * 0.25),
            Point::new(cx, cy + size * 0.35),
        );
        builder.close();
    })
}

/// Four-pointed star with concave sides
fn star(center: Point, radius: f32) -> Path {
    let tips = [
        Point::new(center.x, center.y - radius),
        Point::new(center.x + radius, center.y),
        Point::new(center.x, center.y + radius),
        Point::new(center.x - radius, center.y),
    ];

    Path::new(|builder| {
        builder.move_to(tips[0]);
        for tip in tips.iter().cycle().skip(1).take(4) {
            builder.quadratic_curve_to(center, *tip);
        }
        builder.close();
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_rises_and_falls() {
        assert!(pulse(0.0).abs() < 1e-6);
        assert!((pulse(0.5) - 1.0).abs() < 1e-6);
        assert!(pulse(1.0).abs() < 1e-5);
        assert!((pulse(2.25) - pulse(0.25)).abs() < 1e-5);
    }

    #[test]
    fn test_halo_breathes_every_two_seconds() {
        let (scale, alpha) = halo(0.0);
        assert!((scale - 1.0).abs() < 1e-5 && (alpha - 0.2).abs() < 1e-5);

        let (scale, alpha) = halo(1.0);
        assert!((scale - 1.5).abs() < 1e-5 && (alpha - 0.5).abs() < 1e-5);

        let (scale, _) = halo(2.0);
        assert!((scale - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_scatter_stays_inside_bounds() {
        let size = Size::new(800.0, 600.0);
        for i in 0..HEART_COUNT + GLITTER_COUNT {
            let point = scatter(i, size);
            assert!((0.0..800.0).contains(&point.x));
            assert!((0.0..600.0).contains(&point.y));
        }
    }
}
