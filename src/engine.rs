//! Cooperative effect runner.
//!
//! Effects are async routines driven by the [`Engine`]. The only suspension
//! point is [`Host::idle`], reached through the engine's pause primitives,
//! which also poll the mailbox flag and enforce the duration ceiling of the
//! running effect. Exactly one effect runs at a time and nothing preempts it:
//! a new command only raises the flag the next pause observes.

use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::config::NodeConfig;
use crate::effect::{EffectSlot, Limits};
use crate::host::Host;
use crate::hue::HueClock;
use crate::mailbox::CommandMailbox;
use crate::pixel_buffer::PixelBuffer;
use crate::random::Random;

/// How an effect run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Repeat count reached, duration elapsed, or the effect is one-shot
    Completed,
    /// A new command arrived
    Cancelled,
}

/// Reason a pause did not return normally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Halt {
    /// A new command arrived; stop immediately
    Cancelled,
    /// Duration ceiling reached; finish like a completed run
    Expired,
}

pub(crate) type Step = Result<(), Halt>;

/// Turn a cycle result into "keep going?", letting cancellation through
pub(crate) fn proceed(step: Step) -> Result<bool, Halt> {
    match step {
        Ok(()) => Ok(true),
        Err(Halt::Expired) => Ok(false),
        Err(Halt::Cancelled) => Err(Halt::Cancelled),
    }
}

/// Cycle bookkeeping for one effect run
#[derive(Debug, Clone)]
pub(crate) struct Cycles {
    repeat: u16,
    count: u16,
    deadline: Option<Instant>,
}

impl Cycles {
    /// Count one cycle
    pub(crate) fn record(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// Whether the repeat count or the duration ceiling has been reached
    pub(crate) fn is_done(&self, now: Instant) -> bool {
        (self.repeat > 0 && self.count >= self.repeat)
            || self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Count one cycle and report whether the run is over
    pub(crate) fn finish(&mut self, now: Instant) -> bool {
        self.record();
        self.is_done(now)
    }
}

pub struct Engine<'a, D: OutputDriver, H: Host, const MAX_LEDS: usize> {
    strip: PixelBuffer<D, MAX_LEDS>,
    host: H,
    mailbox: &'a CommandMailbox,
    hue: HueClock,
    rng: Random,
    idle_slice: Duration,
    deadline: Option<Instant>,
}

impl<'a, D: OutputDriver, H: Host, const MAX_LEDS: usize> Engine<'a, D, H, MAX_LEDS> {
    pub fn new(
        strip: PixelBuffer<D, MAX_LEDS>,
        host: H,
        mailbox: &'a CommandMailbox,
        config: &NodeConfig,
    ) -> Self {
        Self {
            strip,
            host,
            mailbox,
            hue: HueClock::new(config.hue_update_interval),
            rng: Random::new(config.rng_seed),
            idle_slice: config.idle_slice.max(Duration::from_ticks(1)),
            deadline: None,
        }
    }

    /// Run one effect to completion or cancellation
    pub async fn run(&mut self, effect: &EffectSlot) -> Outcome {
        let result = effect.render(self).await;
        self.deadline = None;
        match result {
            Ok(()) | Err(Halt::Expired) => Outcome::Completed,
            Err(Halt::Cancelled) => Outcome::Cancelled,
        }
    }

    pub fn strip(&self) -> &PixelBuffer<D, MAX_LEDS> {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut PixelBuffer<D, MAX_LEDS> {
        &mut self.strip
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn hue(&self) -> &HueClock {
        &self.hue
    }

    pub fn hue_mut(&mut self) -> &mut HueClock {
        &mut self.hue
    }

    pub(crate) fn rng(&mut self) -> &mut Random {
        &mut self.rng
    }

    pub(crate) fn now(&self) -> Instant {
        self.host.now()
    }

    /// Wrapping millisecond clock for the beat functions
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn now_ms(&self) -> u32 {
        self.now().as_millis() as u32
    }

    /// Active strip length as a signed index bound
    pub(crate) fn len(&self) -> i32 {
        i32::try_from(self.strip.len()).unwrap_or(i32::MAX)
    }

    /// Current global hue, advanced to `now`
    pub(crate) fn hue_tick(&mut self) -> u8 {
        let now = self.now();
        self.hue.tick(now)
    }

    /// Apply a per-command hue interval; 0 keeps the current one
    pub(crate) fn apply_hue_update(&mut self, interval_ms: u8) {
        if interval_ms > 0 {
            self.hue
                .set_interval(Duration::from_millis(u64::from(interval_ms)));
        }
    }

    /// Start a run, arming the duration ceiling
    pub(crate) fn begin(&mut self, limits: Limits) -> Cycles {
        self.deadline = (limits.duration_ms > 0)
            .then(|| self.now() + Duration::from_millis(u64::from(limits.duration_ms)));
        Cycles {
            repeat: limits.repeat,
            count: 0,
            deadline: self.deadline,
        }
    }

    /// Yield one idle slice with no effect running
    pub(crate) async fn idle(&mut self) {
        self.host.idle(self.idle_slice).await;
    }

    fn cancelled(&self) -> bool {
        self.mailbox.is_available()
    }

    /// Yield once and observe cancellation
    pub(crate) async fn checkpoint(&mut self) -> Step {
        self.host.idle(Duration::from_ticks(0)).await;
        if self.cancelled() {
            return Err(Halt::Cancelled);
        }
        Ok(())
    }

    /// Wait `ms`, see [`pause_until`](Self::pause_until)
    pub(crate) async fn pause(&mut self, ms: u32) -> Step {
        let target = self.now() + Duration::from_millis(u64::from(ms));
        self.pause_until(target).await
    }

    /// Wait until `target`, yielding at least once.
    ///
    /// Returns early with [`Halt::Cancelled`] as soon as a command is
    /// pending, and with [`Halt::Expired`] when the duration ceiling falls
    /// before `target`.
    pub(crate) async fn pause_until(&mut self, target: Instant) -> Step {
        let (target, expires) = match self.deadline {
            Some(deadline) if deadline < target => (deadline, true),
            _ => (target, false),
        };

        let mut yielded = false;
        loop {
            if self.cancelled() {
                return Err(Halt::Cancelled);
            }
            let now = self.now();
            if now >= target {
                break;
            }
            let slice = target.saturating_duration_since(now).min(self.idle_slice);
            self.host.idle(slice).await;
            yielded = true;
        }

        if !yielded {
            self.checkpoint().await?;
        }
        if expires {
            return Err(Halt::Expired);
        }
        Ok(())
    }

    /// Wait `ms` ignoring both cancellation and the duration ceiling.
    ///
    /// Still yields to the host so networking keeps running.
    pub(crate) async fn hold(&mut self, ms: u32) {
        let target = self.now() + Duration::from_millis(u64::from(ms));
        let mut yielded = false;
        loop {
            let now = self.now();
            if now >= target {
                break;
            }
            let slice = target.saturating_duration_since(now).min(self.idle_slice);
            self.host.idle(slice).await;
            yielded = true;
        }
        if !yielded {
            self.host.idle(Duration::from_ticks(0)).await;
        }
    }
}
