/// Auto-dismiss window for the message overlay, in seconds.
pub const DISMISS_WINDOW_SEC: f64 = 5.0;

/// Pre-resolved click target. The subject is always tested before the
/// background catcher, so a click can hit at most one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Subject,
    Background,
}

/// Ordered hit resolution: the subject ray test wins whenever it reports a
/// hit; only a miss falls through to the background catcher.
#[inline]
pub fn resolve_hit(subject_hit: Option<f32>) -> HitTarget {
    match subject_hit {
        Some(_) => HitTarget::Subject,
        None => HitTarget::Background,
    }
}

/// Per-subject message overlay state machine.
///
/// Clicking the subject opens the overlay (or cycles to the next message)
/// and re-arms the single dismiss timer; clicking the background or letting
/// the timer fire closes it. The timer is a deadline plus a generation
/// counter: every (re)arm bumps the generation, so a fire delivered for a
/// superseded arm is discarded instead of closing a freshly re-opened
/// overlay.
pub struct MessageBoard {
    messages: Vec<String>,
    open: bool,
    index: usize,
    deadline: Option<f64>,
    generation: u64,
}

impl MessageBoard {
    pub fn new(messages: Vec<String>) -> Self {
        Self {
            messages,
            open: false,
            index: 0,
            deadline: None,
            generation: 0,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    pub fn message_index(&self) -> usize {
        self.index
    }

    pub fn current_message(&self) -> Option<&str> {
        if self.open {
            self.messages.get(self.index).map(String::as_str)
        } else {
            None
        }
    }

    #[inline]
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Generation of the currently armed timer.
    #[inline]
    pub fn timer_generation(&self) -> u64 {
        self.generation
    }

    /// Apply a click that has already been hit-tested.
    pub fn click(&mut self, target: HitTarget, now_sec: f64) {
        match target {
            HitTarget::Subject => {
                if self.messages.is_empty() {
                    // Nothing to show; stay closed rather than opening an
                    // empty overlay.
                    return;
                }
                if self.open {
                    self.index = (self.index + 1) % self.messages.len();
                } else {
                    self.open = true;
                    self.index = 0;
                }
                self.arm(now_sec);
            }
            HitTarget::Background => {
                if self.open {
                    self.close();
                }
            }
        }
    }

    /// Poll the dismiss timer from the frame loop. Returns true on the frame
    /// the overlay auto-closed.
    pub fn timer_poll(&mut self, now_sec: f64) -> bool {
        match self.deadline {
            Some(d) if self.open && now_sec >= d => {
                self.fire(self.generation)
            }
            _ => false,
        }
    }

    /// Deliver a timer fire for a specific arm generation. Last schedule
    /// wins: a fire carrying a stale generation lost the race to a rearm and
    /// is dropped.
    pub fn fire(&mut self, generation: u64) -> bool {
        if !self.open || generation != self.generation {
            return false;
        }
        self.close();
        true
    }

    /// Fraction of the dismiss window remaining, for the countdown
    /// indicator. 1 right after a click, 0 at (or past) the deadline.
    pub fn countdown(&self, now_sec: f64) -> f32 {
        match self.deadline {
            Some(d) if self.open => {
                (((d - now_sec) / DISMISS_WINDOW_SEC).clamp(0.0, 1.0)) as f32
            }
            _ => 0.0,
        }
    }

    /// Cancel-and-replace: the previous timer (if any) is dead as of this
    /// call, and exactly one deadline is pending afterwards.
    fn arm(&mut self, now_sec: f64) {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(now_sec + DISMISS_WINDOW_SEC);
    }

    fn close(&mut self) {
        self.open = false;
        self.deadline = None;
        self.generation = self.generation.wrapping_add(1);
    }
}
