//! Status indicator driven by a periodic timer.
//!
//! The indicator is a single on-board LED, separate from the strip. The main
//! loop only sets the [`StatusState`]; a timer callback calls
//! [`StatusCell::tick`] every heartbeat period and writes the returned level
//! to the pin.

use core::cell::RefCell;

use critical_section::Mutex;

/// What the node is doing, as shown by the indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusState {
    /// Idle and connected: a double blink every twelve ticks
    #[default]
    Waiting,
    /// Running a command: toggle every four ticks
    Command,
    /// Rendering is unavailable: steady on
    Error,
}

const WAITING_PERIOD: u8 = 12;
const COMMAND_PERIOD: u8 = 4;

/// Indicator state machine
#[derive(Debug, Clone, Default)]
pub struct Heartbeat {
    state: StatusState,
    counter: u8,
    led_on: bool,
}

impl Heartbeat {
    pub const fn new() -> Self {
        Self {
            state: StatusState::Waiting,
            counter: 0,
            led_on: false,
        }
    }

    pub const fn state(&self) -> StatusState {
        self.state
    }

    pub const fn is_on(&self) -> bool {
        self.led_on
    }

    /// Switch state and restart the blink sequence
    pub fn set_state(&mut self, state: StatusState) {
        if self.state == state {
            return;
        }
        self.state = state;
        self.counter = 0;
        match state {
            StatusState::Waiting | StatusState::Command => self.led_on = false,
            StatusState::Error => self.led_on = true,
        }
    }

    /// Advance one timer period and return the LED level
    pub fn tick(&mut self) -> bool {
        self.counter = self.counter.wrapping_add(1);
        match self.state {
            StatusState::Waiting => match self.counter {
                2 | 5 => self.led_on = true,
                3 | 6 => self.led_on = false,
                WAITING_PERIOD => self.counter = 0,
                _ => {}
            },
            StatusState::Command => {
                if self.counter >= COMMAND_PERIOD {
                    self.led_on = !self.led_on;
                    self.counter = 0;
                }
            }
            StatusState::Error => {}
        }
        self.led_on
    }
}

/// [`Heartbeat`] shared between the main loop and a timer interrupt
pub struct StatusCell {
    inner: Mutex<RefCell<Heartbeat>>,
}

impl StatusCell {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Heartbeat::new())),
        }
    }

    pub fn state(&self) -> StatusState {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().state())
    }

    pub fn set_state(&self, state: StatusState) {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().set_state(state));
    }

    /// Advance the heartbeat; call from the timer callback
    pub fn tick(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().tick())
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}
