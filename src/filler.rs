//! Randomized fill simulation.
//!
//! Every fillable tube receives `capacity` units of its assigned colour, one unit
//! per event. Each round offers every incomplete tube exactly once, in a freshly
//! shuffled order, so the event log differs between runs while the final grid is
//! always the same.

use std::collections::VecDeque;

use macroquad::prelude::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{FillState, FluidPacket};

/// One unit of `color` deposited into the lowest empty slot of `tube_index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillEvent<C> {
    pub tube_index: usize,
    pub color: C,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillResult<C> {
    /// `states[0]` is the empty grid, `states[k]` the grid after `events[k - 1]`.
    pub states: Vec<FillState<C>>,
    pub events: Vec<FillEvent<C>>,
    pub selected_colors: Vec<C>,
}

impl<C> FillResult<C> {
    pub fn total_steps(&self) -> usize {
        self.states.len()
    }

    pub fn final_state(&self) -> Option<&FillState<C>> {
        self.states.last()
    }
}

impl<C: AsRef<str>> FillResult<C> {
    pub fn get_event_log_representation(&self) -> String {
        self.events
            .iter()
            .enumerate()
            .map(|(i, event)| {
                format!(
                    "{}: {} -> tube {}",
                    i + 1,
                    event.color.as_ref(),
                    event.tube_index + 1
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Runs a fill simulation using thread-local entropy.
pub fn simulate<C: Clone>(selected_colors: &[C], capacity: usize) -> FillResult<C> {
    simulate_with_rng(selected_colors, capacity, &mut rand::rng())
}

/// Runs a fill simulation drawing every shuffle from `rng`.
///
/// Tube `i` is filled with `selected_colors[i]`. Remaining units are tracked per
/// tube, so a colour listed twice fills both of its tubes.
pub fn simulate_with_rng<C, R>(selected_colors: &[C], capacity: usize, rng: &mut R) -> FillResult<C>
where
    C: Clone,
    R: Rng + ?Sized,
{
    let tube_count = selected_colors.len();
    let mut state = FillState::new(tube_count, capacity);
    let mut inventory = vec![capacity; tube_count];
    let mut remaining = tube_count * capacity;

    let mut states = Vec::with_capacity(remaining + 1);
    let mut events = Vec::with_capacity(remaining);
    states.push(state.clone());

    let mut queue: VecDeque<usize> = VecDeque::with_capacity(tube_count);
    while remaining > 0 {
        if queue.is_empty() {
            let mut round: Vec<usize> = (0..tube_count).filter(|&i| inventory[i] > 0).collect();
            round.shuffle(rng);
            queue.extend(round);
        }

        let Some(tube_index) = queue.pop_front() else {
            warn!("Fill stopped with {} units unplaced: no tube has inventory left.", remaining);
            break;
        };

        let color = &selected_colors[tube_index];
        if !state.fluid_containers[tube_index].add_fluid(FluidPacket::new(color.clone())) {
            debug!("Tube {} has no room left, dropping its inventory.", tube_index);
            inventory[tube_index] = 0;
            continue;
        }
        inventory[tube_index] -= 1;
        remaining -= 1;

        events.push(FillEvent {
            tube_index,
            color: color.clone(),
        });
        states.push(state.clone());
    }

    debug!(
        "Filled {} tubes of capacity {} in {} events.",
        tube_count,
        capacity,
        events.len()
    );

    FillResult {
        states,
        events,
        selected_colors: selected_colors.to_vec(),
    }
}
