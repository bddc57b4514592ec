use crate::config::EconomyConfig;

/// What a call into [`Resources`] changed, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomyEvent {
    EatingLost,
    HeartLost,
    /// every counter went back to its maximum
    Restarted,
}

/// Hearts, eating points and coding points plus the decay timer
///
/// ┌──────────────── Decay Flow ────────────────────────────┐
/// │  every full interval : eating - 1 (floor 0)            │
/// │  eating == 0         : heart - 1                       │
/// │  hearts == 0         : restart (all counters to max)   │
/// └────────────────────────────────────────────────────────┘
#[derive(Debug, Clone, PartialEq)]
pub struct Resources {
    hearts: u8,
    eating: u8,
    coding: u8,
    decay_timer: f32,
    config: EconomyConfig,
}

impl Resources {
    pub fn new(config: EconomyConfig) -> Self {
        Resources {
            hearts: config.max_hearts,
            eating: config.max_eating,
            coding: config.max_coding,
            decay_timer: 0.0,
            config,
        }
    }

    pub fn hearts(&self) -> u8 {
        self.hearts
    }

    pub fn eating(&self) -> u8 {
        self.eating
    }

    pub fn coding(&self) -> u8 {
        self.coding
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    /// Advance the decay timer; one decay step per full interval elapsed
    pub fn tick(&mut self, delta: f32) -> Vec<EconomyEvent> {
        let mut events = Vec::new();
        let interval = self.config.decay_interval_ms;
        if interval <= 0.0 {
            return events;
        }

        self.decay_timer += delta;
        while self.decay_timer >= interval {
            self.decay_timer -= interval;
            self.decay(&mut events);
        }
        events
    }

    fn decay(&mut self, events: &mut Vec<EconomyEvent>) {
        if self.eating > 0 {
            self.eating -= 1;
            events.push(EconomyEvent::EatingLost);
        }
        // the interval that empties the plate already costs a heart
        if self.eating == 0 {
            self.lose_heart(events);
        }
    }

    fn lose_heart(&mut self, events: &mut Vec<EconomyEvent>) {
        self.hearts = self.hearts.saturating_sub(1);
        events.push(EconomyEvent::HeartLost);
        log!("Lost a heart, {} left", self.hearts);

        if self.hearts == 0 {
            log!("Out of hearts, restarting resources");
            self.restart();
            events.push(EconomyEvent::Restarted);
        }
    }

    fn restart(&mut self) {
        self.hearts = self.config.max_hearts;
        self.eating = self.config.max_eating;
        self.coding = self.config.max_coding;
        self.decay_timer = 0.0;
    }

    /// Eating restores one point, capped at the maximum
    pub fn eat(&mut self) {
        self.eating = (self.eating + 1).min(self.config.max_eating);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EconomyEvent::*;

    fn resources() -> Resources {
        Resources::new(EconomyConfig::default())
    }

    #[test]
    fn no_decay_before_a_full_interval() {
        let mut resources = resources();
        assert!(resources.tick(9999.0).is_empty());
        assert_eq!(resources.eating(), 3);
        assert_eq!(resources.tick(1.0), vec![EatingLost]);
        assert_eq!(resources.eating(), 2);
    }

    #[test]
    fn small_steps_add_up_to_one_decay_per_interval() {
        let mut resources = resources();
        let mut lost = 0;
        for _ in 0..1250 {
            lost += resources
                .tick(1000.0 / 60.0)
                .iter()
                .filter(|event| **event == EatingLost)
                .count();
        }
        // 1250 steps of 16.67ms, a little over two intervals
        assert_eq!(lost, 2);
        assert_eq!(resources.eating(), 1);
        assert_eq!(resources.hearts(), 5);
    }

    #[test]
    fn large_delta_counts_every_interval() {
        let mut resources = resources();
        let events = resources.tick(20000.0);
        assert_eq!(events, vec![EatingLost, EatingLost]);
        assert_eq!(resources.eating(), 1);
    }

    #[test]
    fn empty_plate_costs_one_heart_per_interval() {
        let mut resources = resources();
        assert_eq!(resources.tick(30000.0), vec![EatingLost, EatingLost, EatingLost, HeartLost]);
        assert_eq!(resources.eating(), 0);
        assert_eq!(resources.hearts(), 4);

        assert_eq!(resources.tick(10000.0), vec![HeartLost]);
        assert_eq!(resources.hearts(), 3);
        assert_eq!(resources.tick(10000.0), vec![HeartLost]);
        assert_eq!(resources.hearts(), 2);
    }

    #[test]
    fn losing_the_last_heart_restarts_exactly_once() {
        let mut resources = resources();
        resources.tick(60000.0);
        assert_eq!(resources.hearts(), 1);

        let events = resources.tick(10000.0);
        assert_eq!(events, vec![HeartLost, Restarted]);
        assert_eq!(resources.hearts(), 5);
        assert_eq!(resources.eating(), 3);
        assert_eq!(resources.coding(), 3);

        // fresh timer after the restart
        assert!(resources.tick(9999.0).is_empty());
    }

    #[test]
    fn eating_is_capped() {
        let mut resources = resources();
        resources.tick(10000.0);
        resources.eat();
        resources.eat();
        assert_eq!(resources.eating(), 3);
    }
}
