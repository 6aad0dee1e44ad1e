//! Timed sequence playback
//!
//! Playback is a list of `(delay, cue)` steps run by a [`Scheduler`]. The
//! scheduler owns no clock: the host advances it (the browser from its
//! animation frame loop, tests and the headless demo by hand), so timing is
//! deterministic and pending steps can be dropped on a level restart.

use super::state::LevelOutcome;

/// Fixed delays that do not depend on difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Pause before the first tile of a sequence (ms)
    pub lead_in_ms: u32,
    /// How long a clicked tile stays highlighted (ms)
    pub click_feedback_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            lead_in_ms: 1000,
            click_feedback_ms: 250,
        }
    }
}

/// A timed side effect for the controller to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Play the tile's tone and highlight it
    Show(usize),
    /// Remove the tile's highlight
    Hide(usize),
    /// Playback finished; accept clicks
    InputReady,
    /// Click feedback finished on a deciding click
    Resolve(LevelOutcome),
}

/// Steps that replay `sequence`: lead-in, then per tile show for `speed_ms`
/// and rest for `speed_ms / 2`, then [`Cue::InputReady`].
pub fn playback_cues(sequence: &[usize], speed_ms: u32, timing: &Timing) -> Vec<(u32, Cue)> {
    let mut steps = Vec::with_capacity(sequence.len() * 2 + 1);
    let mut delay = timing.lead_in_ms;
    for &tile in sequence {
        steps.push((delay, Cue::Show(tile)));
        steps.push((speed_ms, Cue::Hide(tile)));
        delay = speed_ms / 2;
    }
    steps.push((delay, Cue::InputReady));
    steps
}

/// Total time from playback start until input is accepted (ms)
pub fn playback_duration_ms(length: usize, speed_ms: u32, timing: &Timing) -> u64 {
    let per_tile = u64::from(speed_ms) + u64::from(speed_ms / 2);
    u64::from(timing.lead_in_ms) + per_tile * length as u64
}

#[derive(Debug, Clone)]
struct Timer<A> {
    due_ms: u64,
    order: u64,
    action: A,
}

/// Caller-clocked timer queue.
///
/// Actions fire in due-time order; actions due at the same instant fire in the
/// order they were scheduled.
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    now_ms: u64,
    next_order: u64,
    pending: Vec<Timer<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_order: 0,
            pending: Vec::new(),
        }
    }

    /// Time elapsed since the scheduler was created (ms)
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `action` once `delay_ms` has passed
    pub fn schedule_after(&mut self, delay_ms: u32, action: A) {
        self.schedule_at(self.now_ms + u64::from(delay_ms), action);
    }

    /// Queue `(delay, action)` steps back to back: each delay counts from the
    /// previous step. Returns the due time of the last step.
    pub fn run_in_order<I>(&mut self, steps: I) -> u64
    where
        I: IntoIterator<Item = (u32, A)>,
    {
        let mut due = self.now_ms;
        for (delay_ms, action) in steps {
            due += u64::from(delay_ms);
            self.schedule_at(due, action);
        }
        due
    }

    fn schedule_at(&mut self, due_ms: u64, action: A) {
        let order = self.next_order;
        self.next_order += 1;
        let idx = self
            .pending
            .partition_point(|t| (t.due_ms, t.order) <= (due_ms, order));
        self.pending.insert(
            idx,
            Timer {
                due_ms,
                order,
                action,
            },
        );
    }

    /// Move the clock forward and return every action that came due
    pub fn advance(&mut self, dt_ms: u32) -> Vec<A> {
        self.now_ms += u64::from(dt_ms);
        let due = self.pending.partition_point(|t| t.due_ms <= self.now_ms);
        self.pending.drain(..due).map(|t| t.action).collect()
    }

    /// Time until the next pending action (ms)
    pub fn next_due_in(&self) -> Option<u64> {
        self.pending
            .first()
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
    }

    /// Drop every pending action
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Cancelling {} pending timers", self.pending.len());
        }
        self.pending.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_cues_layout() {
        let timing = Timing::default();
        let cues = playback_cues(&[2, 0], 400, &timing);
        assert_eq!(
            cues,
            vec![
                (1000, Cue::Show(2)),
                (400, Cue::Hide(2)),
                (200, Cue::Show(0)),
                (400, Cue::Hide(0)),
                (200, Cue::InputReady),
            ]
        );
        let total: u64 = cues.iter().map(|(d, _)| u64::from(*d)).sum();
        assert_eq!(total, playback_duration_ms(2, 400, &timing));
    }

    #[test]
    fn test_empty_sequence_is_lead_in_only() {
        let timing = Timing::default();
        assert_eq!(
            playback_cues(&[], 450, &timing),
            vec![(1000, Cue::InputReady)]
        );
    }

    #[test]
    fn test_odd_speed_gap_rounds_down() {
        let timing = Timing {
            lead_in_ms: 0,
            click_feedback_ms: 0,
        };
        let cues = playback_cues(&[1], 101, &timing);
        assert_eq!(cues[2], (50, Cue::InputReady));
    }

    #[test]
    fn test_scheduler_fires_in_order_with_fake_clock() {
        let mut sched = Scheduler::new();
        let end = sched.run_in_order([(100, 'a'), (50, 'b'), (0, 'c')]);
        assert_eq!(end, 150);

        assert!(sched.advance(99).is_empty());
        assert_eq!(sched.advance(1), vec!['a']);
        assert_eq!(sched.next_due_in(), Some(50));
        assert_eq!(sched.advance(50), vec!['b', 'c']);
        assert!(sched.is_idle());
    }

    #[test]
    fn test_scheduler_large_step_fires_everything_due() {
        let mut sched = Scheduler::new();
        sched.run_in_order([(10, 1), (10, 2), (10, 3)]);
        assert_eq!(sched.advance(25), vec![1, 2]);
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn test_scheduler_interleaves_overlapping_timers() {
        let mut sched = Scheduler::new();
        sched.schedule_after(250, "release-a");
        sched.advance(100);
        sched.schedule_after(250, "release-b");
        sched.schedule_after(100, "early");
        // "early" is due at 200, "release-a" at 250, "release-b" at 350
        assert_eq!(sched.advance(150), vec!["early", "release-a"]);
        assert_eq!(sched.next_due_in(), Some(100));
        assert_eq!(sched.advance(100), vec!["release-b"]);
    }

    #[test]
    fn test_scheduler_ties_keep_insertion_order() {
        let mut sched = Scheduler::new();
        sched.schedule_after(10, "first");
        sched.schedule_after(10, "second");
        assert_eq!(sched.advance(10), vec!["first", "second"]);
    }

    #[test]
    fn test_cancel_all() {
        let mut sched = Scheduler::new();
        sched.run_in_order(playback_cues(&[0, 1, 2], 300, &Timing::default()));
        assert!(!sched.is_idle());
        sched.cancel_all();
        assert!(sched.is_idle());
        assert!(sched.advance(10_000).is_empty());
        assert_eq!(sched.next_due_in(), None);
    }
}
