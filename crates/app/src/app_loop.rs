//! Fixed-rate stepping of the simulation inside the variable-rate render
//! loop, plus the glue that keeps gateway calls off the loop thread.

use manor_core::Game;
use manor_core::tuning::TICK_MS;
use manor_gateway::GatewayDriver;

use crate::audio::AudioSink;
use crate::frame_input::FrameInput;

/// Caps how many ticks one long frame may run so a stall does not spiral
/// into a catch-up burst.
const MAX_TICKS_PER_FRAME: u32 = 10;

/// Converts variable frame times into whole fixed ticks.
#[derive(Default)]
pub struct TickAccumulator {
    carry: f32,
}

impl TickAccumulator {
    pub fn ticks_for(&mut self, dt_secs: f32) -> u32 {
        let tick_secs = TICK_MS as f32 / 1000.0;
        self.carry += dt_secs.max(0.0);
        let mut ticks = 0;
        while self.carry >= tick_secs && ticks < MAX_TICKS_PER_FRAME {
            self.carry -= tick_secs;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            // A frame that long means we were suspended; drop the backlog.
            self.carry = 0.0;
        }
        ticks
    }
}

pub struct AppSession {
    pub game: Game,
    driver: GatewayDriver,
    audio: Box<dyn AudioSink>,
    accumulator: TickAccumulator,
}

impl AppSession {
    pub fn new(game: Game, driver: GatewayDriver, audio: Box<dyn AudioSink>) -> Self {
        Self { game, driver, audio, accumulator: TickAccumulator::default() }
    }

    /// One rendered frame: merge finished requests, apply player intents,
    /// run the due fixed ticks, and flush audio cues. Everything that
    /// mutates game state happens here, on this thread, in this order.
    pub fn frame(&mut self, dt_secs: f32, input: &FrameInput) {
        while let Some(resolution) = self.driver.poll() {
            self.game.resolve_request(resolution);
        }

        for &(dx, dy) in &input.moves {
            self.game.move_player(dx, dy);
        }
        if input.toggle_flashlight {
            self.game.toggle_flashlight();
        }

        for _ in 0..self.accumulator.ticks_for(dt_secs) {
            if let Some(ticket) = self.game.advance() {
                self.driver.dispatch(ticket);
            }
        }

        for cue in self.game.drain_cues() {
            self.audio.cue(cue);
        }
    }
}
