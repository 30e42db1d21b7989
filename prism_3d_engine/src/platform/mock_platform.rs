/// Mock Platform for unit tests (no window system required)
///
/// Events are scripted into a queue, every call is recorded, and context
/// creation, driver vendor and swap interval behavior are configurable.
/// State is shared through `Rc<RefCell<_>>` so tests can inspect it after the
/// application (and the platform it owns) is dropped.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;
use crate::error::{Error, Result};
use super::platform::{
    ContextAttributes, ContextHandle, Platform, PlatformEvent, WindowDesc, WindowId,
};

/// Recorded platform call
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Init,
    Shutdown,
    CreateWindow(WindowId, String),
    DestroyWindow(WindowId),
    SetContextAttributes(ContextAttributes),
    CreateContext(WindowId),
    DestroyContext(ContextHandle),
    SwapBuffers(WindowId),
    SetSwapInterval(i32),
    WaitEvent,
    Delay(Duration),
    SetMouseLocked(Option<WindowId>),
}

/// How the mock reacts to swap interval requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapIntervalMode {
    Accept,
    /// `set_swap_interval` fails
    Reject,
    /// `set_swap_interval` succeeds but the interval does not change
    Ignore,
}

pub struct MockState {
    pub events: VecDeque<PlatformEvent>,
    /// Events that "arrive" while the loop blocks in `wait_event`
    pub events_on_wait: VecDeque<PlatformEvent>,
    pub calls: Vec<MockCall>,
    pub fail_init: bool,
    pub fail_window_creation: bool,
    /// Number of upcoming `create_context` calls that fail
    pub failing_context_attempts: usize,
    pub vendor: String,
    pub swap_interval_mode: SwapIntervalMode,
    pub swap_interval: i32,
    pub now: Duration,
    /// Added to the clock after every `ticks()` read, simulating work
    pub tick_step: Duration,
    pub modifier_state: u16,
    next_window: u32,
    next_context: u32,
}

impl MockState {
    pub fn count(&self, predicate: impl Fn(&MockCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn context_attributes(&self) -> Vec<ContextAttributes> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                MockCall::SetContextAttributes(attributes) => Some(attributes.clone()),
                _ => None,
            })
            .collect()
    }
}

pub struct MockPlatform {
    state: Rc<RefCell<MockState>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState {
                events: VecDeque::new(),
                events_on_wait: VecDeque::new(),
                calls: Vec::new(),
                fail_init: false,
                fail_window_creation: false,
                failing_context_attempts: 0,
                vendor: "Mock Vendor".to_string(),
                swap_interval_mode: SwapIntervalMode::Accept,
                swap_interval: 0,
                now: Duration::ZERO,
                tick_step: Duration::ZERO,
                modifier_state: 0,
                next_window: 1,
                next_context: 1,
            })),
        }
    }

    /// Shared handle to the mock state
    pub fn state(&self) -> Rc<RefCell<MockState>> {
        self.state.clone()
    }

    fn record(&self, call: MockCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl Platform for MockPlatform {
    fn init(&mut self) -> Result<()> {
        self.record(MockCall::Init);
        if self.state.borrow().fail_init {
            return Err(Error::PlatformError("mock video subsystem unavailable".to_string()));
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        self.record(MockCall::Shutdown);
    }

    fn create_window(&mut self, desc: &WindowDesc) -> Result<WindowId> {
        let mut state = self.state.borrow_mut();
        if state.fail_window_creation {
            return Err(Error::PlatformError("mock window creation failed".to_string()));
        }
        let id = WindowId(state.next_window);
        state.next_window += 1;
        state.calls.push(MockCall::CreateWindow(id, desc.title.clone()));
        Ok(id)
    }

    fn destroy_window(&mut self, window: WindowId) {
        self.record(MockCall::DestroyWindow(window));
    }

    fn set_context_attributes(&mut self, attributes: &ContextAttributes) {
        self.record(MockCall::SetContextAttributes(attributes.clone()));
    }

    fn create_context(&mut self, window: WindowId) -> Result<ContextHandle> {
        let mut state = self.state.borrow_mut();
        state.calls.push(MockCall::CreateContext(window));
        if state.failing_context_attempts > 0 {
            state.failing_context_attempts -= 1;
            return Err(Error::PlatformError("mock context creation failed".to_string()));
        }
        let handle = ContextHandle(state.next_context);
        state.next_context += 1;
        Ok(handle)
    }

    fn destroy_context(&mut self, context: ContextHandle) {
        self.record(MockCall::DestroyContext(context));
    }

    fn context_vendor(&self, _context: ContextHandle) -> String {
        self.state.borrow().vendor.clone()
    }

    fn swap_buffers(&mut self, window: WindowId) {
        self.record(MockCall::SwapBuffers(window));
    }

    fn set_swap_interval(&mut self, interval: i32) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(MockCall::SetSwapInterval(interval));
        match state.swap_interval_mode {
            SwapIntervalMode::Accept => {
                state.swap_interval = interval;
                Ok(())
            }
            SwapIntervalMode::Reject => Err(Error::PlatformError("swap interval not supported".to_string())),
            SwapIntervalMode::Ignore => Ok(()),
        }
    }

    fn swap_interval(&self) -> i32 {
        self.state.borrow().swap_interval
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.state.borrow_mut().events.pop_front()
    }

    fn wait_event(&mut self) {
        let mut state = self.state.borrow_mut();
        state.calls.push(MockCall::WaitEvent);
        let arrived: Vec<_> = state.events_on_wait.drain(..).collect();
        state.events.extend(arrived);
    }

    fn ticks(&self) -> Duration {
        let mut state = self.state.borrow_mut();
        let now = state.now;
        let step = state.tick_step;
        state.now += step;
        now
    }

    fn delay(&mut self, duration: Duration) {
        let mut state = self.state.borrow_mut();
        state.calls.push(MockCall::Delay(duration));
        state.now += duration;
    }

    fn modifier_state(&self) -> u16 {
        self.state.borrow().modifier_state
    }

    fn set_mouse_locked(&mut self, window: Option<WindowId>) {
        self.record(MockCall::SetMouseLocked(window));
    }
}
