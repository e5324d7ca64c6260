//! Single-slot command mailbox shared with the inbound-message handler.
//!
//! Holds at most one pending payload; a newer payload overwrites an
//! undispatched one. Posting also raises the "command available" flag that
//! running effects poll to cancel themselves. Synchronized with
//! `critical-section`, so `post` may be called from a network callback or
//! interrupt while the main loop is rendering.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;

use crate::error::MailboxOverrun;

/// Capacity of the inbound and outbound command buffers
pub const COMMAND_BUFFER_SIZE: usize = 512;

struct Slot<const CAP: usize> {
    payload: Vec<u8, CAP>,
    available: bool,
}

pub struct CommandMailbox<const CAP: usize = COMMAND_BUFFER_SIZE> {
    inner: Mutex<RefCell<Slot<CAP>>>,
}

impl<const CAP: usize> CommandMailbox<CAP> {
    /// Create an empty mailbox.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Slot {
                payload: Vec::new(),
                available: false,
            })),
        }
    }

    /// Store a payload, replacing any pending one, and raise the flag.
    ///
    /// Payloads longer than `CAP` are rejected without touching the slot.
    pub fn post(&self, payload: &[u8]) -> Result<(), MailboxOverrun> {
        if payload.len() > CAP {
            return Err(MailboxOverrun {
                len: payload.len(),
                capacity: CAP,
            });
        }
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow(cs).borrow_mut();
            slot.payload.clear();
            // Length checked above
            let _ = slot.payload.extend_from_slice(payload);
            slot.available = true;
        });
        Ok(())
    }

    /// Whether a command is waiting; effects treat this as cancellation.
    pub fn is_available(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().available)
    }

    /// Take the pending payload and clear the flag.
    pub fn take(&self) -> Option<Vec<u8, CAP>> {
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow(cs).borrow_mut();
            if !slot.available {
                return None;
            }
            slot.available = false;
            Some(core::mem::take(&mut slot.payload))
        })
    }
}

impl<const CAP: usize> Default for CommandMailbox<CAP> {
    fn default() -> Self {
        Self::new()
    }
}
