use std::time::Duration;

use crate::{
    effect::Effect,
    timer::{TimerId, TimerOwner, TimerQueue},
};

pub const AUTO_ADVANCE: Duration = Duration::from_millis(4000);
/// Pause after a dot click before auto-advance restarts.
pub const RESUME_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Advancing(TimerId),
    Resuming(TimerId),
}

impl Pending {
    fn id(self) -> TimerId {
        match self {
            Pending::Advancing(id) | Pending::Resuming(id) => id,
        }
    }
}

/// One group of slides and dots. Holds at most one live timer.
#[derive(Debug)]
pub struct Slideshow {
    id: usize,
    slides: usize,
    current: usize,
    pending: Option<Pending>,
}

impl Slideshow {
    pub fn new(id: usize, slides: usize) -> Self {
        Self {
            id,
            slides,
            current: 0,
            pending: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Active flag per slide, the same flags apply to the dots.
    pub fn active_flags(&self) -> Vec<bool> {
        (0..self.slides).map(|index| index == self.current).collect()
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.pending.map(Pending::id)
    }

    /// Shows the first slide and starts auto-advance. A slideshow without slides stays idle.
    pub fn start(&mut self, timers: &mut TimerQueue) -> Option<Effect> {
        if self.slides == 0 {
            return None;
        }

        self.current = 0;
        self.restart(timers, false);
        Some(self.active())
    }

    pub fn on_timer(&mut self, id: TimerId, timers: &mut TimerQueue) -> Option<Effect> {
        match self.pending {
            Some(Pending::Advancing(live)) if live == id => {
                self.current = (self.current + 1) % self.slides;
                Some(self.active())
            }
            Some(Pending::Resuming(live)) if live == id => {
                self.restart(timers, false);
                None
            }
            _ => None,
        }
    }

    /// Jumps to `index` and restarts auto-advance after [`RESUME_DELAY`].
    pub fn select(&mut self, index: usize, timers: &mut TimerQueue) -> Option<Effect> {
        if index >= self.slides {
            return None;
        }

        self.current = index;
        self.restart(timers, true);
        Some(self.active())
    }

    fn restart(&mut self, timers: &mut TimerQueue, delayed: bool) {
        if let Some(pending) = self.pending.take() {
            timers.cancel(pending.id());
        }

        let owner = TimerOwner::Slideshow(self.id);
        self.pending = Some(if delayed {
            Pending::Resuming(timers.schedule_once(RESUME_DELAY, owner))
        } else {
            Pending::Advancing(timers.schedule_every(AUTO_ADVANCE, owner))
        });
    }

    fn active(&self) -> Effect {
        Effect::SlideActive {
            slideshow: self.id,
            index: self.current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(show: &mut Slideshow, timers: &mut TimerQueue, elapsed: Duration) -> Vec<usize> {
        let until = timers.now().saturating_add(elapsed);
        let mut shown = Vec::new();

        while let Some(fired) = timers.pop_due(until) {
            if let Some(Effect::SlideActive { index, .. }) = show.on_timer(fired.id, timers) {
                shown.push(index);
            }
        }

        timers.settle(until);
        shown
    }

    #[test]
    fn test_auto_advance_wraps() {
        let mut timers = TimerQueue::new();
        let mut show = Slideshow::new(0, 3);

        assert_eq!(
            show.start(&mut timers),
            Some(Effect::SlideActive {
                slideshow: 0,
                index: 0
            })
        );
        assert_eq!(run(&mut show, &mut timers, AUTO_ADVANCE * 4), vec![1, 2, 0, 1]);
    }

    #[test]
    fn test_exactly_one_active() {
        let mut timers = TimerQueue::new();
        let mut show = Slideshow::new(0, 4);
        show.start(&mut timers);

        for index in 0..4 {
            show.select(index, &mut timers);
            let flags = show.active_flags();

            assert_eq!(flags.iter().filter(|&&on| on).count(), 1);
            assert!(flags[index]);
        }
    }

    #[test]
    fn test_select_resets_timer() {
        let mut timers = TimerQueue::new();
        let mut show = Slideshow::new(0, 3);
        show.start(&mut timers);

        assert!(run(&mut show, &mut timers, Duration::from_millis(3500)).is_empty());
        assert_eq!(
            show.select(2, &mut timers),
            Some(Effect::SlideActive {
                slideshow: 0,
                index: 2
            })
        );
        assert_eq!(timers.len(), 1);

        // Old interval would have fired at 4000ms.
        assert!(run(&mut show, &mut timers, Duration::from_millis(4000)).is_empty());
        // Resumed at 4500ms, first advance at 8500ms.
        assert_eq!(run(&mut show, &mut timers, Duration::from_millis(1000)), vec![0]);
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn test_repeated_clicks_keep_one_timer() {
        let mut timers = TimerQueue::new();
        let mut show = Slideshow::new(0, 3);
        show.start(&mut timers);

        for index in [1, 2, 0, 1] {
            show.select(index, &mut timers);
            run(&mut show, &mut timers, Duration::from_millis(500));
            assert_eq!(timers.len(), 1);
        }

        assert_eq!(show.current(), 1);
    }

    #[test]
    fn test_out_of_range_and_empty() {
        let mut timers = TimerQueue::new();
        let mut show = Slideshow::new(0, 2);
        show.start(&mut timers);

        assert_eq!(show.select(5, &mut timers), None);
        assert_eq!(show.current(), 0);

        let mut empty = Slideshow::new(1, 0);
        assert_eq!(empty.start(&mut timers), None);
        assert_eq!(empty.timer(), None);
    }

    #[test]
    fn test_instances_are_isolated() {
        let mut timers = TimerQueue::new();
        let mut first = Slideshow::new(0, 3);
        let mut second = Slideshow::new(1, 2);
        first.start(&mut timers);
        second.start(&mut timers);

        first.select(2, &mut timers);

        assert_eq!(second.current(), 0);
        assert!(timers.is_active(second.timer().unwrap()));
        assert_eq!(timers.len(), 2);
    }
}
