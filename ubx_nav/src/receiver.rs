use std::time::Duration;

use crate::{
    parser::{Parser, ParserBuilder},
    tracker::{Clock, FixHandler, FixTracker, FixValidityPolicy, MonotonicClock, NavigationFix},
    ubx_packets::Frame,
};

/// One UBX byte stream: a [`Parser`] whose frames go straight into a [`FixTracker`].
///
/// Dropped frames and undecodable NAV-PVT payloads are logged at `warn` level, the
/// caller only sees the frames that made it through.
#[derive(Debug)]
pub struct Receiver<C: Clock = MonotonicClock> {
    parser: Parser,
    tracker: FixTracker<C>,
}

impl Default for Receiver<MonotonicClock> {
    fn default() -> Self {
        Self::new(Parser::default(), FixTracker::default())
    }
}

impl<C: Clock> Receiver<C> {
    pub fn new(parser: Parser, tracker: FixTracker<C>) -> Self {
        Self { parser, tracker }
    }

    pub fn with_clock(clock: C) -> Self {
        Self::new(ParserBuilder::new().build(), FixTracker::with_clock(clock))
    }

    pub fn with_policy(mut self, policy: FixValidityPolicy) -> Self {
        self.tracker.set_policy(policy);
        self
    }

    /// Push one byte from the transport, returns the frame it completed, if any
    pub fn feed(&mut self, byte: u8) -> Option<Frame> {
        match self.parser.feed(byte)? {
            Ok(frame) => {
                if let Err(err) = self.tracker.observe(&frame) {
                    log::warn!(
                        "class 0x{:02x} id 0x{:02x}: {}",
                        frame.class(),
                        frame.msg_id(),
                        err
                    );
                }
                Some(frame)
            },
            Err(err) => {
                log::warn!("dropping frame: {}", err);
                None
            },
        }
    }

    /// Feed a whole chunk, returns the number of frames it completed
    pub fn feed_all(&mut self, bytes: &[u8]) -> usize {
        bytes
            .iter()
            .filter(|&&byte| self.feed(byte).is_some())
            .count()
    }

    /// Drop a partially received frame, counters and the last fix are kept
    pub fn reset(&mut self) {
        self.parser.reset();
    }

    pub fn set_fix_handler<H: FixHandler + Send + 'static>(&mut self, handler: H) {
        self.tracker.set_fix_handler(handler);
    }

    pub fn clear_fix_handler(&mut self) {
        self.tracker.clear_fix_handler();
    }

    pub fn message_number(&self) -> u32 {
        self.tracker.message_number()
    }

    pub fn fix_number(&self) -> u32 {
        self.tracker.fix_number()
    }

    pub fn last_fix(&self) -> Option<&NavigationFix> {
        self.tracker.last_fix()
    }

    pub fn is_valid_fix_position(&self) -> bool {
        self.tracker.is_valid_fix_position()
    }

    pub fn position_fix_age(&self) -> Option<Duration> {
        self.tracker.position_fix_age()
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn tracker(&self) -> &FixTracker<C> {
        &self.tracker
    }
}
