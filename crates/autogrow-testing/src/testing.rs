use autogrow_core::{Runtime, RuntimeHandle};
use autogrow_foundation::{post_keyboard_event, KeyboardEvent, KeyboardEventKind};
use autogrow_runtime_std::StdRuntime;
use autogrow_ui_graphics::Size;

/// One 60 Hz frame.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;

/// Logical size of the reference phone screen.
pub const DEFAULT_SCREEN: Size = Size::new(390.0, 844.0);

const MAX_PUMP_ITERATIONS: usize = 1_000;

/// Headless harness for driving widgets in tests.
///
/// Owns a runtime with a virtual frame clock: time only moves when the test
/// advances it, so animations and deferred passes are deterministic. Keyboard
/// helpers post notifications for a screen of the configured size.
pub struct InputTestRule {
    runtime: StdRuntime,
    frame_time_nanos: u64,
    screen: Size,
}

impl InputTestRule {
    pub fn new() -> Self {
        Self::with_screen(DEFAULT_SCREEN)
    }

    pub fn with_screen(screen: Size) -> Self {
        Self {
            runtime: StdRuntime::new(),
            frame_time_nanos: 0,
            screen,
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.runtime()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.runtime_handle()
    }

    pub fn screen(&self) -> Size {
        self.screen
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    pub fn frame_time_millis(&self) -> u64 {
        self.frame_time_nanos / autogrow_core::NANOS_PER_MILLI
    }

    /// Whether the runtime asked the host for a frame since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.runtime.take_frame_request()
    }

    /// Runs pending UI tasks without advancing time.
    pub fn run_ui_tasks(&self) {
        self.runtime.runtime().drain_ui();
    }

    /// Runs UI tasks, then one frame at the current virtual time.
    pub fn run_frame(&mut self) {
        let runtime = self.runtime.runtime();
        runtime.drain_ui();
        runtime.drain_frame_callbacks(self.frame_time_nanos);
    }

    /// Moves time forward by one frame and runs it.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_INTERVAL_NANOS;
        self.run_frame();
    }

    /// Runs frames until `millis` of virtual time have passed.
    pub fn advance_time_by(&mut self, millis: u64) {
        let target = self.frame_time_nanos + millis * autogrow_core::NANOS_PER_MILLI;
        while self.frame_time_nanos + FRAME_INTERVAL_NANOS <= target {
            self.advance_frame();
        }
        if self.frame_time_nanos < target {
            self.frame_time_nanos = target;
            self.run_frame();
        }
    }

    /// Drives frames until no UI tasks or frame callbacks remain.
    ///
    /// Panics if work keeps rescheduling itself.
    pub fn pump_until_idle(&mut self) {
        let runtime = self.runtime.runtime();
        for _ in 0..MAX_PUMP_ITERATIONS {
            runtime.drain_ui();
            if !runtime.has_frame_callbacks() {
                if !runtime.has_pending_ui() {
                    return;
                }
                continue;
            }
            self.advance_frame();
        }
        panic!("pump_until_idle: runtime still busy after {MAX_PUMP_ITERATIONS} iterations");
    }

    /// Advances frames only while the runtime keeps asking the host for one,
    /// as a platform loop woken by the scheduler would. Returns the number of
    /// frames run.
    ///
    /// Panics if frames keep being requested.
    pub fn run_requested_frames(&mut self) -> usize {
        let mut frames = 0;
        while self.take_frame_request() {
            assert!(
                frames < MAX_PUMP_ITERATIONS,
                "run_requested_frames: frames still requested after {MAX_PUMP_ITERATIONS} frames"
            );
            self.advance_frame();
            frames += 1;
        }
        frames
    }

    pub fn is_idle(&self) -> bool {
        let runtime = self.runtime.runtime();
        !runtime.has_pending_ui() && !runtime.has_frame_callbacks()
    }

    /// Posts a will-show notification for a keyboard `height` tall.
    pub fn show_keyboard(&self, height: f32) {
        self.post_keyboard(KeyboardEventKind::WillShow, height);
    }

    /// Posts a did-change-frame notification for a keyboard `height` tall.
    pub fn change_keyboard_frame(&self, height: f32) {
        self.post_keyboard(KeyboardEventKind::DidChangeFrame, height);
    }

    /// Posts a will-hide notification with the keyboard below the screen.
    pub fn hide_keyboard(&self) {
        self.post_keyboard(KeyboardEventKind::WillHide, 0.0);
    }

    fn post_keyboard(&self, kind: KeyboardEventKind, height: f32) {
        post_keyboard_event(KeyboardEvent::with_top(
            kind,
            self.screen.height - height,
            self.screen.width,
        ));
    }
}

impl Default for InputTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for tests that only need a rule for their duration.
pub fn run_input_test<R>(f: impl FnOnce(&mut InputTestRule) -> R) -> R {
    let mut rule = InputTestRule::new();
    f(&mut rule)
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
