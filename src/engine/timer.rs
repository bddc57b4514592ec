/// Fire-once delayed callback
/// - counts down scene time (the `delta` handed to update), so a paused scene
///   never fires and dropping the owner cancels it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    remaining: f32,
    fired: bool,
}

impl Timer {
    pub fn new(delay_ms: f32) -> Self {
        Timer {
            remaining: delay_ms,
            fired: false,
        }
    }

    /// Returns true on exactly one tick: the one where the delay runs out
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.fired {
            return false;
        }
        self.remaining -= delta;
        if self.remaining <= 0.0 {
            self.fired = true;
            return true;
        }
        false
    }

    #[cfg(test)]
    pub fn is_done(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_when_delay_elapses() {
        let mut timer = Timer::new(3000.0);
        assert!(!timer.tick(1000.0));
        assert!(!timer.tick(1999.0));
        assert!(timer.tick(1.0));
        assert!(timer.is_done());
        assert!(!timer.tick(5000.0));
    }

    #[test]
    fn zero_delay_fires_on_first_tick() {
        let mut timer = Timer::new(0.0);
        assert!(timer.tick(0.0));
    }
}
