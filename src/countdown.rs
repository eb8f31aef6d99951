/// Seconds a submission outcome stays on screen before the page reloads.
pub const REVEAL_SECONDS: u32 = 10;

/// The reveal countdown as an explicit state machine.
///
/// A single countdown is armed per page load: `arm` only fires from `Idle`,
/// so a second submission while one is running neither cancels nor restarts
/// it. Whoever drives the ticks performs the page reload once `Expired` is
/// reached; nothing else leaves that state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Idle,
    Counting(u32),
    Expired,
}

impl Countdown {
    /// Starts the countdown at [`REVEAL_SECONDS`]. No-op outside `Idle`.
    pub fn arm(self) -> Self {
        match self {
            Countdown::Idle => Countdown::Counting(REVEAL_SECONDS),
            other => other,
        }
    }

    /// Advances by one second. `Counting(1)` ticks into `Expired`, which
    /// displays as zero.
    pub fn tick(self) -> Self {
        match self {
            Countdown::Counting(n) if n > 1 => Countdown::Counting(n - 1),
            Countdown::Counting(_) => Countdown::Expired,
            other => other,
        }
    }

    /// The value to display, or `None` when no countdown is running.
    pub fn seconds_left(&self) -> Option<u32> {
        match self {
            Countdown::Idle => None,
            Countdown::Counting(n) => Some(*n),
            Countdown::Expired => Some(0),
        }
    }

    pub fn is_counting(&self) -> bool {
        matches!(self, Countdown::Counting(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_from_idle() {
        assert_eq!(Countdown::Idle.arm(), Countdown::Counting(REVEAL_SECONDS));
    }

    #[test]
    fn test_arm_is_single_shot() {
        // Re-arming a running or finished countdown leaves it untouched.
        assert_eq!(Countdown::Counting(4).arm(), Countdown::Counting(4));
        assert_eq!(Countdown::Expired.arm(), Countdown::Expired);
    }

    #[test]
    fn test_full_tick_sequence() {
        let mut countdown = Countdown::Idle.arm();
        let mut displayed = vec![countdown.seconds_left().unwrap()];
        while countdown.is_counting() {
            countdown = countdown.tick();
            displayed.push(countdown.seconds_left().unwrap());
        }
        assert_eq!(displayed, vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(countdown, Countdown::Expired);
    }

    #[test]
    fn test_terminal_states_do_not_tick() {
        assert_eq!(Countdown::Idle.tick(), Countdown::Idle);
        assert_eq!(Countdown::Expired.tick(), Countdown::Expired);
    }

    #[test]
    fn test_seconds_left() {
        assert_eq!(Countdown::Idle.seconds_left(), None);
        assert_eq!(Countdown::Counting(7).seconds_left(), Some(7));
        assert_eq!(Countdown::Expired.seconds_left(), Some(0));
    }
}
