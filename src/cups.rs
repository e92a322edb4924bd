//! The physical row of cups, as opposed to the controller's idea of where the ball is.

use std::time::Duration;

#[cfg(test)]
use mock_instant::Instant;
#[cfg(not(test))]
use std::time::Instant;

use crate::game::Slot;

/// Something that can show two cups trading places.
///
/// The controller never waits for this: a new swap may arrive before the last one finished, in which case the old one
/// should just be snapped to its end.
pub trait Animator {
    /// Visually swap the cups at slots `a` and `b`, taking `duration` to do it.
    fn swap(&mut self, a: Slot, b: Slot, duration: Duration);
}

struct InFlight {
    a: Slot,
    b: Slot,
    started: Instant,
    duration: Duration,
}

impl InFlight {
    /// How far along, from 0 to 1.
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = Instant::now()
            .checked_duration_since(self.started)
            .unwrap_or(Duration::ZERO);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

/// An ordered row of identified cups.
///
/// Each cup has a fixed id (its starting slot). [`Animator::swap`] trades the ids in two slots right away, so
/// [`Self::cup_at`] is always the settled order; the in-flight animation only affects [`Self::position`].
pub struct CupRow {
    order: Vec<usize>,
    anim: Option<InFlight>,
}

impl CupRow {
    pub fn new(cups: usize) -> Self {
        Self {
            order: (0..cups).collect(),
            anim: None,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The id of the cup sitting in `slot`.
    pub fn cup_at(&self, slot: Slot) -> usize {
        self.order[slot]
    }

    /// Which slot the cup with id `cup` is in.
    pub fn slot_of(&self, cup: usize) -> Option<Slot> {
        self.order.iter().position(|&c| c == cup)
    }

    /// Cup ids, in slot order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Whether a swap is still visibly moving.
    pub fn is_animating(&self) -> bool {
        self.anim.as_ref().map_or(false, |a| a.progress() < 1.0)
    }

    /// Snap any in-flight swap to its end.
    pub fn finish(&mut self) {
        self.anim = None;
    }

    /// Where the cup settled in `slot` should be drawn right now, in (fractional) slots.
    ///
    /// Outside of a swap, that's just `slot`. Mid-swap, the two cups involved slide linearly towards each other's
    /// starting point.
    pub fn position(&self, slot: Slot) -> f32 {
        let Some(anim) = &self.anim else {
            return slot as f32;
        };
        let t = anim.progress();
        let (from, to) = if slot == anim.b {
            (anim.a, anim.b)
        } else if slot == anim.a {
            (anim.b, anim.a)
        } else {
            return slot as f32;
        };
        from as f32 + (to as f32 - from as f32) * t
    }
}

impl Animator for CupRow {
    fn swap(&mut self, a: Slot, b: Slot, duration: Duration) {
        if a == b || a >= self.order.len() || b >= self.order.len() {
            tracing::trace!(a, b, "ignoring degenerate swap");
            return;
        }
        self.finish();
        self.order.swap(a, b);
        self.anim = Some(InFlight {
            a,
            b,
            started: Instant::now(),
            duration,
        });
    }
}
