//! Layout tweens keyed by tile id.
//!
//! Every tile keeps its identity across layout changes, so a tile that grows
//! into the spotlight animates from where it was instead of reappearing.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use lumina_core::catalog::TileId;
use ratatui::layout::Rect;

/// `cubic-bezier(x1, y1, x2, y2)` easing with fixed end points (0,0) and (1,1).
#[derive(Debug, Clone, Copy)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// The layout easing used for every tile move.
pub const EASE: CubicBezier = CubicBezier::new(0.25, 0.1, 0.25, 1.0);

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn curve(a: f64, b: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    }

    fn slope(a: f64, b: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * a + 6.0 * u * t * (b - a) + 3.0 * t * t * (1.0 - b)
    }

    /// Progress at time fraction `x` in `[0, 1]`.
    pub fn ease(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        // Newton first, bisection if the slope flattens out.
        let mut t = x;
        for _ in 0..8 {
            let err = Self::curve(self.x1, self.x2, t) - x;
            if err.abs() < 1e-6 {
                return Self::curve(self.y1, self.y2, t);
            }
            let d = Self::slope(self.x1, self.x2, t);
            if d.abs() < 1e-6 {
                break;
            }
            t = (t - err / d).clamp(0.0, 1.0);
        }
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..32 {
            let v = Self::curve(self.x1, self.x2, t);
            if (v - x).abs() < 1e-6 {
                break;
            }
            if v < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        Self::curve(self.y1, self.y2, t)
    }
}

fn lerp(a: u16, b: u16, p: f64) -> u16 {
    let v = f64::from(a) + (f64::from(b) - f64::from(a)) * p;
    v.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

fn lerp_rect(from: Rect, to: Rect, p: f64) -> Rect {
    Rect {
        x: lerp(from.x, to.x, p),
        y: lerp(from.y, to.y, p),
        width: lerp(from.width, to.width, p),
        height: lerp(from.height, to.height, p),
    }
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: Rect,
    to: Rect,
    start: Instant,
}

pub struct LayoutAnimator {
    duration: Duration,
    tweens: HashMap<TileId, Tween>,
}

impl LayoutAnimator {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            tweens: HashMap::new(),
        }
    }

    fn progress(&self, tween: &Tween, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(tween.start);
        EASE.ease(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    /// Rectangle to draw `id` at right now.
    pub fn rect(&self, id: &TileId, now: Instant) -> Option<Rect> {
        let tween = self.tweens.get(id)?;
        Some(lerp_rect(tween.from, tween.to, self.progress(tween, now)))
    }

    /// Point `id` at `target`. A tile seen for the first time appears in place;
    /// a tile already in motion continues from wherever it is now.
    pub fn retarget(&mut self, id: &TileId, target: Rect, now: Instant) {
        let current = self.rect(id, now);
        match self.tweens.get_mut(id) {
            Some(tween) if tween.to == target => {}
            Some(tween) => {
                *tween = Tween {
                    from: current.unwrap_or(target),
                    to: target,
                    start: now,
                };
            }
            None => {
                self.tweens.insert(
                    id.clone(),
                    Tween {
                        from: target,
                        to: target,
                        start: now,
                    },
                );
            }
        }
    }

    /// Jump every tile to its target (terminal resize).
    pub fn snap(&mut self) {
        for tween in self.tweens.values_mut() {
            tween.from = tween.to;
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.tweens
            .values()
            .any(|t| t.from != t.to && self.progress(t, now) < 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: u16, y: u16, w: u16, h: u16) -> Rect {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn easing_hits_its_end_points_and_is_monotonic() {
        assert_eq!(EASE.ease(0.0), 0.0);
        assert_eq!(EASE.ease(1.0), 1.0);
        let mut last = 0.0;
        for i in 1..=20 {
            let v = EASE.ease(f64::from(i) / 20.0);
            assert!(v >= last, "not monotonic at {i}");
            last = v;
        }
        // ease curve runs ahead of linear in the middle
        assert!(EASE.ease(0.5) > 0.5);
    }

    #[test]
    fn first_sighting_does_not_animate() {
        let mut anim = LayoutAnimator::new(Duration::from_millis(500));
        let id = TileId::new("intro");
        let now = Instant::now();
        anim.retarget(&id, rect(0, 0, 10, 5), now);
        assert_eq!(anim.rect(&id, now), Some(rect(0, 0, 10, 5)));
        assert!(!anim.is_animating(now));
    }

    #[test]
    fn tween_runs_from_old_to_new_rect() {
        let mut anim = LayoutAnimator::new(Duration::from_millis(500));
        let id = TileId::new("intro");
        let t0 = Instant::now();
        anim.retarget(&id, rect(0, 0, 10, 4), t0);
        anim.retarget(&id, rect(20, 8, 40, 16), t0);

        assert_eq!(anim.rect(&id, t0), Some(rect(0, 0, 10, 4)));
        let mid = anim.rect(&id, t0 + Duration::from_millis(250)).unwrap();
        assert!(mid.x > 0 && mid.x < 20);
        assert!(anim.is_animating(t0 + Duration::from_millis(250)));
        assert_eq!(
            anim.rect(&id, t0 + Duration::from_millis(600)),
            Some(rect(20, 8, 40, 16))
        );
        assert!(!anim.is_animating(t0 + Duration::from_millis(600)));
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_position() {
        let mut anim = LayoutAnimator::new(Duration::from_millis(500));
        let id = TileId::new("blog");
        let t0 = Instant::now();
        anim.retarget(&id, rect(0, 0, 10, 4), t0);
        anim.retarget(&id, rect(40, 0, 10, 4), t0);
        let t1 = t0 + Duration::from_millis(250);
        let here = anim.rect(&id, t1).unwrap();
        anim.retarget(&id, rect(0, 20, 10, 4), t1);
        assert_eq!(anim.rect(&id, t1), Some(here));
    }

    #[test]
    fn zero_duration_snaps() {
        let mut anim = LayoutAnimator::new(Duration::ZERO);
        let id = TileId::new("gallery");
        let now = Instant::now();
        anim.retarget(&id, rect(0, 0, 1, 1), now);
        anim.retarget(&id, rect(5, 5, 2, 2), now);
        assert_eq!(anim.rect(&id, now), Some(rect(5, 5, 2, 2)));
        assert!(!anim.is_animating(now));
    }
}
