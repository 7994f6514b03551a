//! Step-through player for a finished fill run.
//!
//! Autoplay is held as an owned [`Autoplay`] value: it exists only while playing
//! and is dropped on pause, on reaching the last step, on a jump to either end and
//! when the player itself goes away.

use std::time::Duration;

use crate::filler::{FillEvent, FillResult};
use crate::model::FillState;

/// Repeating tick source for autoplay.
#[derive(Clone, Debug, PartialEq)]
pub struct Autoplay {
    interval: Duration,
    elapsed: Duration,
}

impl Autoplay {
    pub fn start(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Advances the clock and returns how many ticks fell due.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut due = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            due += 1;
        }
        due
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackStatus<'a, C> {
    Initial,
    Deposit {
        iteration: usize,
        color: &'a C,
        tube_number: usize,
    },
    Complete,
}

pub struct FillPlayer<C> {
    result: FillResult<C>,
    current_step: usize,
    interval: Duration,
    autoplay: Option<Autoplay>,
}

impl<C> FillPlayer<C> {
    pub fn new(result: FillResult<C>, interval: Duration) -> Self {
        Self {
            result,
            current_step: 0,
            interval,
            autoplay: None,
        }
    }

    pub fn result(&self) -> &FillResult<C> {
        &self.result
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.result.total_steps()
    }

    fn last_step(&self) -> usize {
        self.total_steps().saturating_sub(1)
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 0
    }

    pub fn is_final_step(&self) -> bool {
        self.current_step == self.last_step()
    }

    pub fn is_playing(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn can_play(&self) -> bool {
        self.total_steps() > 1
    }

    pub fn current_state(&self) -> Option<&FillState<C>> {
        self.result.states.get(self.current_step)
    }

    pub fn current_event(&self) -> Option<&FillEvent<C>> {
        self.current_step
            .checked_sub(1)
            .and_then(|i| self.result.events.get(i))
    }

    pub fn progress(&self) -> f32 {
        if self.total_steps() <= 1 {
            return 1.0;
        }
        self.current_step as f32 / self.last_step() as f32
    }

    pub fn status(&self) -> PlaybackStatus<'_, C> {
        if self.is_first_step() {
            return PlaybackStatus::Initial;
        }
        if self.is_final_step() {
            return PlaybackStatus::Complete;
        }
        match self.current_event() {
            Some(event) => PlaybackStatus::Deposit {
                iteration: self.current_step,
                color: &event.color,
                tube_number: event.tube_index + 1,
            },
            None => PlaybackStatus::Initial,
        }
    }

    pub fn go_to_start(&mut self) {
        self.current_step = 0;
        self.pause();
    }

    pub fn go_to_end(&mut self) {
        self.current_step = self.last_step();
        self.pause();
    }

    pub fn step_forward(&mut self) {
        if self.current_step >= self.last_step() {
            self.pause();
            return;
        }
        self.current_step += 1;
    }

    pub fn step_backward(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    pub fn play(&mut self) {
        if !self.can_play() || self.is_playing() {
            return;
        }
        if self.is_final_step() {
            self.current_step = 0;
        }
        self.autoplay = Some(Autoplay::start(self.interval));
    }

    pub fn pause(&mut self) {
        self.autoplay = None;
    }

    pub fn toggle_play(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Feeds elapsed frame time to autoplay, stepping once per due tick.
    pub fn update(&mut self, dt: Duration) {
        let Some(autoplay) = self.autoplay.as_mut() else {
            return;
        };
        let due = autoplay.tick(dt);
        for _ in 0..due {
            if !self.is_playing() {
                break;
            }
            self.step_forward();
        }
        if self.is_final_step() {
            self.pause();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filler::simulate;

    const INTERVAL: Duration = Duration::from_millis(800);

    fn player(colors: &[&str]) -> FillPlayer<String> {
        let colors: Vec<String> = colors.iter().map(|s| s.to_string()).collect();
        FillPlayer::new(simulate(&colors, 4), INTERVAL)
    }

    #[test]
    fn autoplay_ticks_once_per_interval() {
        let mut autoplay = Autoplay::start(INTERVAL);
        assert_eq!(autoplay.tick(Duration::from_millis(500)), 0);
        assert_eq!(autoplay.tick(Duration::from_millis(500)), 1);
        assert_eq!(autoplay.tick(Duration::from_millis(1700)), 2);
    }

    #[test]
    fn stepping_is_bounded() {
        let mut p = player(&["red"]);
        assert_eq!(p.total_steps(), 5);
        p.step_backward();
        assert_eq!(p.current_step(), 0);
        for _ in 0..10 {
            p.step_forward();
        }
        assert_eq!(p.current_step(), 4);
        assert!(p.is_final_step());
    }

    #[test]
    fn current_event_trails_step_by_one() {
        let mut p = player(&["red", "blue"]);
        assert!(p.current_event().is_none());
        assert_eq!(p.status(), PlaybackStatus::Initial);
        p.step_forward();
        let event = p.current_event().unwrap().clone();
        assert_eq!(&event, &p.result().events[0]);
        assert_eq!(
            p.status(),
            PlaybackStatus::Deposit {
                iteration: 1,
                color: &event.color,
                tube_number: event.tube_index + 1,
            }
        );
        p.go_to_end();
        assert_eq!(p.status(), PlaybackStatus::Complete);
        assert_eq!(p.progress(), 1.0);
    }

    #[test]
    fn autoplay_runs_to_the_end_and_releases() {
        let mut p = player(&["red", "blue"]);
        p.toggle_play();
        assert!(p.is_playing());
        p.update(INTERVAL * 3);
        assert_eq!(p.current_step(), 3);
        p.update(INTERVAL * 20);
        assert!(p.is_final_step());
        assert!(!p.is_playing());
    }

    #[test]
    fn play_from_end_rewinds() {
        let mut p = player(&["red"]);
        p.go_to_end();
        p.toggle_play();
        assert!(p.is_playing());
        assert_eq!(p.current_step(), 0);
    }

    #[test]
    fn jumps_and_pause_release_autoplay() {
        let mut p = player(&["red", "blue"]);
        p.play();
        p.go_to_start();
        assert!(!p.is_playing());
        p.play();
        p.toggle_play();
        assert!(!p.is_playing());
        p.update(INTERVAL * 5);
        assert_eq!(p.current_step(), 0);
    }

    #[test]
    fn empty_run_cannot_play() {
        let mut p = FillPlayer::new(simulate::<String>(&[], 4), INTERVAL);
        assert_eq!(p.total_steps(), 1);
        assert!(p.is_first_step() && p.is_final_step());
        p.toggle_play();
        assert!(!p.is_playing());
        assert_eq!(p.progress(), 1.0);
        assert_eq!(p.status(), PlaybackStatus::Initial);
    }
}
