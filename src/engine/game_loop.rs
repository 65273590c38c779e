/// Game loop timing and the simulation tick counter
///
/// Implements a fixed timestep loop with variable rendering: each rendered
/// frame runs however many simulation ticks have come due, so animation and
/// physics advance at a consistent rate regardless of display refresh.
use std::time::{Duration, Instant};

/// Simulation ticks per second
pub const TICK_RATE: u32 = 60;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Maximum number of ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Source of the current simulation tick
pub trait TickSource {
    fn current_tick(&self) -> u64;
}

/// Monotonic tick counter advanced once per simulation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickCounter {
    tick: u64,
}

impl TickCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the next tick and return it
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

impl TickSource for TickCounter {
    fn current_tick(&self) -> u64 {
        self.tick
    }
}

impl TickSource for u64 {
    fn current_tick(&self) -> u64 {
        *self
    }
}

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of simulation ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Drop time we could not catch up on rather than bursting later
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = Duration::ZERO;
        }

        ticks
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_tick_counter() {
        let mut ticks = TickCounter::new();
        assert_eq!(ticks.current_tick(), 0);
        assert_eq!(ticks.advance(), 1);
        assert_eq!(ticks.advance(), 2);
        assert_eq!(ticks.current_tick(), 2);

        assert_eq!(17u64.current_tick(), 17);
    }

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.fps(), 0.0);
    }

    #[test]
    fn test_frame_counting() {
        let mut game_loop = GameLoop::new();
        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 1);

        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_ticks_accumulate() {
        let mut game_loop = GameLoop::new();
        thread::sleep(FIXED_TIMESTEP_DURATION * 2);

        let ticks = game_loop.begin_frame();
        assert!(ticks >= 1);
    }

    #[test]
    fn test_max_ticks_limit() {
        let mut game_loop = GameLoop::new();

        // 300ms would allow 18 ticks
        thread::sleep(Duration::from_millis(300));

        let ticks = game_loop.begin_frame();
        assert_eq!(ticks, MAX_TICKS_PER_FRAME);

        // The backlog is dropped, not replayed
        let next = game_loop.begin_frame();
        assert!(next <= 1);
    }
}
