use std::{
    fmt,
    sync::mpsc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};

use crate::{
    error::{DateTimeError, DecodeError},
    ubx_packets::{Frame, GnssFixType, NavPvt, NavPvtFlags, NavPvtValidFlags, Position, Velocity},
};

/// Source of receive timestamps for the [`FixTracker`]
pub trait Clock {
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by [`Instant::now`]
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

pub trait FixHandler {
    fn handle(&mut self, fix: &NavigationFix);
}

/// Implement handler for simple callbacks / closures
impl<F: FnMut(&NavigationFix)> FixHandler for F {
    fn handle(&mut self, fix: &NavigationFix) {
        self(fix)
    }
}

/// Forward every fix to a channel. A disconnected receiving side is ignored.
impl FixHandler for mpsc::Sender<NavigationFix> {
    fn handle(&mut self, fix: &NavigationFix) {
        if self.send(*fix).is_err() {
            log::trace!("fix channel closed, dropping fix #{}", fix.fix_number);
        }
    }
}

/// A NAV-PVT solution as seen by the tracker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationFix {
    pvt: NavPvt,
    received_at: Instant,
    fix_number: u32,
}

impl NavigationFix {
    pub fn pvt(&self) -> &NavPvt {
        &self.pvt
    }

    /// When the frame carrying this solution was handed to the tracker
    pub fn received_at(&self) -> Instant {
        self.received_at
    }

    /// Value of [`FixTracker::fix_number`] right after this fix was counted
    pub fn fix_number(&self) -> u32 {
        self.fix_number
    }

    pub fn fix_type(&self) -> GnssFixType {
        self.pvt.fix_type()
    }

    pub fn position(&self) -> Position {
        Position::from(&self.pvt)
    }

    pub fn velocity(&self) -> Velocity {
        Velocity::from(&self.pvt)
    }

    pub fn datetime(&self) -> Result<DateTime<Utc>, DateTimeError> {
        DateTime::<Utc>::try_from(&self.pvt)
    }
}

/// Decides whether the last fix counts as a usable position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixValidityPolicy {
    /// Every bit set here must also be set in the solution's `valid` field
    pub required_valid: NavPvtValidFlags,
    /// Also require [`NavPvtFlags::GPS_FIX_OK`]
    pub require_gnss_fix_ok: bool,
    /// Accept 2-D fixes
    pub allow_2d: bool,
}

impl Default for FixValidityPolicy {
    fn default() -> Self {
        Self {
            required_valid: NavPvtValidFlags::VALID_DATE,
            require_gnss_fix_ok: false,
            allow_2d: true,
        }
    }
}

impl FixValidityPolicy {
    pub fn accepts(&self, pvt: &NavPvt) -> bool {
        let fix_type = pvt.fix_type();
        fix_type.has_position()
            && (self.allow_2d || fix_type != GnssFixType::Fix2D)
            && pvt.valid().contains(self.required_valid)
            && (!self.require_gnss_fix_ok || pvt.flags().contains(NavPvtFlags::GPS_FIX_OK))
    }
}

/// Counts decoded frames, keeps the latest NAV-PVT solution and notifies a handler
/// whenever a new one arrives.
pub struct FixTracker<C: Clock = MonotonicClock> {
    clock: C,
    policy: FixValidityPolicy,
    message_number: u32,
    fix_number: u32,
    last_fix: Option<NavigationFix>,
    handler: Option<Box<dyn FixHandler + Send>>,
}

impl Default for FixTracker<MonotonicClock> {
    fn default() -> Self {
        Self::with_clock(MonotonicClock)
    }
}

impl<C: Clock + fmt::Debug> fmt::Debug for FixTracker<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixTracker")
            .field("clock", &self.clock)
            .field("policy", &self.policy)
            .field("message_number", &self.message_number)
            .field("fix_number", &self.fix_number)
            .field("last_fix", &self.last_fix)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl FixTracker<MonotonicClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> FixTracker<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            policy: FixValidityPolicy::default(),
            message_number: 0,
            fix_number: 0,
            last_fix: None,
            handler: None,
        }
    }

    pub fn with_policy(mut self, policy: FixValidityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &FixValidityPolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: FixValidityPolicy) {
        self.policy = policy;
    }

    /// Register the handler called for every new fix, replacing any previous one
    pub fn set_fix_handler<H: FixHandler + Send + 'static>(&mut self, handler: H) {
        self.handler = Some(Box::new(handler));
    }

    pub fn clear_fix_handler(&mut self) {
        self.handler = None;
    }

    /// Account for one checksum-valid frame.
    ///
    /// The frame is always counted. A NAV-PVT frame whose payload cannot be decoded
    /// leaves the last fix untouched and is reported back as an error.
    pub fn observe(&mut self, frame: &Frame) -> Result<(), DecodeError> {
        self.message_number = self.message_number.saturating_add(1);
        if !frame.is::<NavPvt>() {
            return Ok(());
        }

        let pvt = NavPvt::from_payload(frame.payload())?;
        self.fix_number = self.fix_number.saturating_add(1);
        let fix = NavigationFix {
            pvt,
            received_at: self.clock.now(),
            fix_number: self.fix_number,
        };
        log::debug!(
            "fix #{}: {} with {} satellites",
            fix.fix_number,
            pvt.fix_type(),
            pvt.num_satellites()
        );
        self.last_fix = Some(fix);
        if let Some(handler) = self.handler.as_mut() {
            handler.handle(&fix);
        }
        Ok(())
    }

    /// Number of checksum-valid frames seen so far, of any class
    pub fn message_number(&self) -> u32 {
        self.message_number
    }

    /// Number of NAV-PVT solutions decoded so far
    pub fn fix_number(&self) -> u32 {
        self.fix_number
    }

    pub fn last_fix(&self) -> Option<&NavigationFix> {
        self.last_fix.as_ref()
    }

    /// Whether the last fix passes the validity policy, `false` before the first fix
    pub fn is_valid_fix_position(&self) -> bool {
        self.last_fix
            .as_ref()
            .is_some_and(|fix| self.policy.accepts(&fix.pvt))
    }

    /// Time since the last fix was received, `None` before the first fix
    pub fn position_fix_age(&self) -> Option<Duration> {
        self.last_fix
            .as_ref()
            .map(|fix| self.clock.now().saturating_duration_since(fix.received_at))
    }
}
