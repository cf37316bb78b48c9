// ============================================================================
// MARKER ANIMATION
// ============================================================================

/// Seconds a marker sweep takes from start to settle.
pub const SWEEP_DURATION: f64 = 1.2;

#[derive(Debug, Clone, Copy)]
struct Sweep {
    from: f64,
    to: f64,
    started_at: f64,
}

/// Eased sweep of the marker between dial angles.
///
/// The widget owns the authoritative marker angle; this tracks only what is
/// shown on screen, so headless callers and tests can skip it entirely.
#[derive(Debug, Clone)]
pub struct MarkerAnimator {
    displayed: f64,
    sweep: Option<Sweep>,
}

impl MarkerAnimator {
    pub fn new(angle: f64) -> Self {
        Self {
            displayed: angle,
            sweep: None,
        }
    }

    /// Angle shown as of the last `sample`.
    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    /// Angle the marker is heading to, or already at.
    pub fn target(&self) -> f64 {
        match self.sweep {
            Some(sweep) => sweep.to,
            None => self.displayed,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.sweep.is_none()
    }

    /// Start a sweep toward `to`. A retarget mid-flight departs from the
    /// currently displayed angle, not from the abandoned target.
    pub fn retarget(&mut self, to: f64, now: f64) {
        // Exact compare is fine: hosts pass the same computed target every
        // frame and only a genuinely new angle should restart the clock.
        if to == self.target() {
            return;
        }
        self.sweep = Some(Sweep {
            from: self.displayed,
            to,
            started_at: now,
        });
    }

    /// Jump straight to `angle`, cancelling any sweep in flight.
    pub fn snap(&mut self, angle: f64) {
        self.displayed = angle;
        self.sweep = None;
    }

    /// Advance to `now` (seconds on any monotonic clock) and return the
    /// angle to draw this frame.
    pub fn sample(&mut self, now: f64) -> f64 {
        if let Some(sweep) = self.sweep {
            let t = (now - sweep.started_at) / SWEEP_DURATION;
            if t >= 1.0 {
                self.displayed = sweep.to;
                self.sweep = None;
            } else {
                self.displayed = sweep.from + (sweep.to - sweep.from) * smoothstep(t);
            }
        }
        self.displayed
    }
}

/// Cubic ease-in-out, flat at both ends.
fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn settles_exactly_on_target() {
        let mut anim = MarkerAnimator::new(PI);
        anim.retarget(2.0 * PI, 0.0);
        assert!(!anim.is_settled());
        assert!((anim.sample(SWEEP_DURATION) - 2.0 * PI).abs() < 1e-12);
        assert!(anim.is_settled());
        // Stays put afterwards.
        assert!((anim.sample(10.0) - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn halfway_in_time_is_halfway_in_angle() {
        let mut anim = MarkerAnimator::new(0.0);
        anim.retarget(1.0, 0.0);
        let v = anim.sample(SWEEP_DURATION / 2.0);
        assert!((v - 0.5).abs() < 1e-9);
        // The accessor reads back what sample just drew.
        assert!((anim.displayed() - v).abs() < 1e-12);
    }

    #[test]
    fn eases_in_and_out() {
        let mut anim = MarkerAnimator::new(0.0);
        anim.retarget(1.0, 0.0);
        let early = anim.sample(0.1 * SWEEP_DURATION);
        assert!(early < 0.1);
        let late = anim.sample(0.9 * SWEEP_DURATION);
        assert!(late > 0.9);
    }

    #[test]
    fn retarget_departs_from_displayed_angle() {
        let mut anim = MarkerAnimator::new(0.0);
        anim.retarget(1.0, 0.0);
        let mid = anim.sample(SWEEP_DURATION / 2.0);
        anim.retarget(0.0, SWEEP_DURATION / 2.0);
        let restart = anim.sample(SWEEP_DURATION / 2.0);
        assert!((restart - mid).abs() < 1e-9);
        assert!(anim.target().abs() < 1e-12);
        assert!(anim.sample(1.5 * SWEEP_DURATION).abs() < 1e-12);
    }

    #[test]
    fn retarget_to_current_target_is_ignored() {
        let mut anim = MarkerAnimator::new(0.0);
        anim.retarget(1.0, 0.0);
        anim.sample(SWEEP_DURATION / 2.0);
        // Same destination must not restart the clock.
        anim.retarget(1.0, 100.0);
        assert!((anim.sample(SWEEP_DURATION) - 1.0).abs() < 1e-12);
        assert!(anim.is_settled());
    }

    #[test]
    fn snap_cancels_the_sweep() {
        let mut anim = MarkerAnimator::new(0.0);
        anim.retarget(1.0, 0.0);
        anim.snap(PI);
        assert!(anim.is_settled());
        // Visible immediately, before any sample.
        assert!((anim.displayed() - PI).abs() < 1e-12);
        assert!((anim.sample(0.5) - PI).abs() < 1e-12);
    }
}
