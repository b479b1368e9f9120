//! Fixed timestep driver
//!
//! Real elapsed time goes into an accumulator and comes out as zero or more
//! fixed ticks per rendered frame. A stall longer than [`MAX_FRAME_DT`]
//! worth of real time is dropped instead of replayed, so the simulation
//! never spirals trying to catch up.

use super::level::{LevelError, LevelSource};
use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, SIM_DT};

/// Accumulator turning frame times into fixed simulation ticks
#[derive(Debug, Default)]
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume `elapsed` seconds of real time, ticking as many fixed steps
    /// as fit
    ///
    /// Edge intents (pause, reset, continue) are cleared after the first
    /// tick of the frame consumes them; held intents pass through untouched.
    /// Returns how many ticks ran.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        source: &LevelSource,
        input: &mut TickInput,
        elapsed: f32,
    ) -> Result<u32, LevelError> {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DT);
        let mut ticks = 0;
        while self.accumulator >= SIM_DT {
            tick(state, source, input, SIM_DT)?;
            self.accumulator -= SIM_DT;
            ticks += 1;
            input.pause = false;
            input.reset = false;
            input.advance = false;
        }
        Ok(ticks)
    }
}
