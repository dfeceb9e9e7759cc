use super::fsm::Phase;

/// Observer notified synchronously by [`super::TimerFsm`] as it changes.
///
/// Every method defaults to a no-op so hosts only implement what they render.
/// When one operation fires both, `on_phase` is called before `on_task`.
pub trait TimerHooks {
    fn on_phase(&mut self, _phase: Phase) {}

    fn on_tick(&mut self, _seconds_remaining: u32) {}

    fn on_task(&mut self, _task: &str) {}
}

/// Hooks that ignore every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHooks;

impl TimerHooks for NullHooks {}

impl<H: TimerHooks + ?Sized> TimerHooks for &mut H {
    fn on_phase(&mut self, phase: Phase) {
        (**self).on_phase(phase)
    }

    fn on_tick(&mut self, seconds_remaining: u32) {
        (**self).on_tick(seconds_remaining)
    }

    fn on_task(&mut self, task: &str) {
        (**self).on_task(task)
    }
}

impl<H: TimerHooks + ?Sized> TimerHooks for Box<H> {
    fn on_phase(&mut self, phase: Phase) {
        (**self).on_phase(phase)
    }

    fn on_tick(&mut self, seconds_remaining: u32) {
        (**self).on_tick(seconds_remaining)
    }

    fn on_task(&mut self, task: &str) {
        (**self).on_task(task)
    }
}

/// Notification captured by [`RecordingHooks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookCall {
    Phase(Phase),
    Tick(u32),
    Task(String),
}

/// Hooks that keep every notification in order, for tests and replay tooling.
#[derive(Debug, Clone, Default)]
pub struct RecordingHooks {
    pub calls: Vec<HookCall>,
}

impl RecordingHooks {
    pub fn phases(&self) -> Vec<Phase> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HookCall::Phase(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn ticks(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HookCall::Tick(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn tasks(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HookCall::Task(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl TimerHooks for RecordingHooks {
    fn on_phase(&mut self, phase: Phase) {
        self.calls.push(HookCall::Phase(phase));
    }

    fn on_tick(&mut self, seconds_remaining: u32) {
        self.calls.push(HookCall::Tick(seconds_remaining));
    }

    fn on_task(&mut self, task: &str) {
        self.calls.push(HookCall::Task(task.to_string()));
    }
}
