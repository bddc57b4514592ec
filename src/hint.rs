use crate::config::HintConfig;
use crate::engine::Timer;
use rand::seq::SliceRandom;
use rand::Rng;

/// One idle episode runs from the moment the player stops until they move
/// again; at most one bubble is shown per episode
#[derive(Debug, Clone, PartialEq)]
enum Bubble {
    Waiting,
    Showing { text: &'static str, timer: Timer },
    Spent,
}

#[derive(Debug, Clone)]
pub struct IdleHint {
    pool: &'static [&'static str],
    idle: f32,
    bubble: Bubble,
    config: HintConfig,
}

impl IdleHint {
    pub fn new(pool: &'static [&'static str], config: HintConfig) -> Self {
        IdleHint {
            pool,
            idle: 0.0,
            bubble: Bubble::Waiting,
            config,
        }
    }

    pub fn update(&mut self, moving: bool, delta: f32, rng: &mut impl Rng) {
        if moving {
            self.idle = 0.0;
            self.bubble = Bubble::Waiting;
            return;
        }

        self.idle += delta;
        let next = match &mut self.bubble {
            Bubble::Waiting if self.idle >= self.config.idle_threshold_ms => {
                match self.pool.choose(rng) {
                    Some(text) => Some(Bubble::Showing {
                        text: *text,
                        timer: Timer::new(self.config.display_ms),
                    }),
                    None => Some(Bubble::Spent),
                }
            }
            Bubble::Showing { timer, .. } => timer.tick(delta).then_some(Bubble::Spent),
            _ => None,
        };
        if let Some(bubble) = next {
            self.bubble = bubble;
        }
    }

    #[cfg(test)]
    pub fn idle_time(&self) -> f32 {
        self.idle
    }

    /// Text of the visible bubble, if any
    pub fn bubble(&self) -> Option<&'static str> {
        match self.bubble {
            Bubble::Showing { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const POOL: &[&str] = &["one", "two", "three"];

    fn hint() -> (IdleHint, StdRng) {
        (
            IdleHint::new(POOL, HintConfig::default()),
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn bubble_appears_after_threshold() {
        let (mut hint, mut rng) = hint();
        hint.update(false, 4999.0, &mut rng);
        assert_eq!(hint.bubble(), None);
        hint.update(false, 1.0, &mut rng);
        let text = hint.bubble().expect("bubble after 5s idle");
        assert!(POOL.contains(&text));
    }

    #[test]
    fn movement_resets_timer_and_removes_bubble() {
        let (mut hint, mut rng) = hint();
        hint.update(false, 6000.0, &mut rng);
        assert!(hint.bubble().is_some());

        hint.update(true, 16.0, &mut rng);
        assert_eq!(hint.idle_time(), 0.0);
        assert_eq!(hint.bubble(), None);
    }

    #[test]
    fn bubble_expires_and_does_not_return_in_same_episode() {
        let (mut hint, mut rng) = hint();
        hint.update(false, 5000.0, &mut rng);
        assert!(hint.bubble().is_some());
        hint.update(false, 2999.0, &mut rng);
        assert!(hint.bubble().is_some());
        hint.update(false, 1.0, &mut rng);
        assert_eq!(hint.bubble(), None);

        for _ in 0..100 {
            hint.update(false, 1000.0, &mut rng);
            assert_eq!(hint.bubble(), None);
        }
    }

    #[test]
    fn new_episode_can_show_again() {
        let (mut hint, mut rng) = hint();
        hint.update(false, 9000.0, &mut rng);
        hint.update(false, 9000.0, &mut rng);
        hint.update(true, 16.0, &mut rng);
        hint.update(false, 5000.0, &mut rng);
        assert!(hint.bubble().is_some());
    }

    #[test]
    fn empty_pool_never_shows() {
        let mut hint = IdleHint::new(&[], HintConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        hint.update(false, 10000.0, &mut rng);
        assert_eq!(hint.bubble(), None);
    }
}
