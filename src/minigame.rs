use crate::config::{AnimationConfig, ScooterConfig};
use crate::engine::{Point, Rect, Size, Timer};
use crate::sprite::rider::{Action, Rider};
use crate::sprite::state::Timing;
use crate::ui::{styles, Notices};
use rand::seq::SliceRandom;
use rand::Rng;

pub const SCOLDS: &[&str] = &[
    "Ты что, не видишь препятствие?",
    "Скорость не главное, главное - контроль!",
    "Может, стоит сойти с самоката?",
    "Ты точно умеешь кататься?",
    "Попробуй еще раз, но медленнее!",
];

/// How an obstacle has to be avoided
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Height {
    /// on the road, jump over it
    Low,
    /// at head height, slide under it
    High,
}

#[derive(Debug, PartialEq)]
pub struct ObstacleKind {
    pub key: &'static str,
    pub height: Height,
    /// spawn height as a fraction of the viewport
    pub y_ratio: f32,
    pub scale: f32,
}

pub static OBSTACLES: [ObstacleKind; 4] = [
    ObstacleKind {
        key: "pizza",
        height: Height::Low,
        y_ratio: 0.85,
        scale: 0.08,
    },
    ObstacleKind {
        key: "paper",
        height: Height::Low,
        y_ratio: 0.85,
        scale: 0.12,
    },
    ObstacleKind {
        key: "deadline",
        height: Height::High,
        y_ratio: 0.6,
        scale: 0.2,
    },
    ObstacleKind {
        key: "bug",
        height: Height::High,
        y_ratio: 0.6,
        scale: 0.15,
    },
];

pub const COLLECTIBLE_KEY: &str = "energy";
pub const COLLECTIBLE_Y_RATIO: f32 = 0.7;
pub const COLLECTIBLE_SCALE: f32 = 0.15;
pub const ROAD_Y_RATIO: f32 = 0.85;

/// Whether a nearby obstacle hits the rider
/// - low obstacles are cleared only in the middle of a jump
/// - high obstacles are cleared for the whole slide
pub fn collides(height: Height, action: Action, safe_jump: (f32, f32)) -> bool {
    match (height, action) {
        (Height::Low, Action::Jumping { progress }) => {
            !(progress >= safe_jump.0 && progress <= safe_jump.1)
        }
        (Height::High, Action::Sliding) => false,
        _ => true,
    }
}

/// Obstacles come faster every difficulty step, down to a floor
pub fn obstacle_interval(elapsed: f32, config: &ScooterConfig) -> f32 {
    let steps = (elapsed / config.difficulty_step_ms).floor();
    (config.base_spawn_ms - config.spawn_step_ms * steps).max(config.min_spawn_ms)
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: &'static ObstacleKind,
    pub position: Point,
}

/// Keys held this tick; edges are detected by the run
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Controls {
    pub jump: bool,
    pub slide: bool,
    pub tapped: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Collision { key: &'static str, distance: f32 },
    Collected,
    Ended { score: i32 },
    Return,
}

#[derive(Debug, Clone)]
enum Phase {
    Running,
    Ended { auto_return: Timer, returned: bool },
}

/// One 30 second ride
#[derive(Debug, Clone)]
pub struct Run {
    config: ScooterConfig,
    viewport: Size,
    phase: Phase,
    elapsed: f32,
    score: i32,
    rider: Rider,
    obstacles: Vec<Obstacle>,
    collectibles: Vec<Point>,
    obstacle_timer: Timer,
    collectible_timer: Timer,
    notices: Notices,
    held: Controls,
}

impl Run {
    pub fn new(config: ScooterConfig, animation: &AnimationConfig, viewport: Size, rng: &mut impl Rng) -> Self {
        let rider = Rider::new(
            Self::rider_anchor(&config, viewport),
            Timing::new(animation, &config),
            config.rider_scale,
            Size {
                width: config.rider_width,
                height: config.rider_height,
            },
        );
        Run {
            obstacle_timer: Timer::new(obstacle_interval(0.0, &config)),
            collectible_timer: Timer::new(Self::collectible_interval(&config, rng)),
            config,
            viewport,
            phase: Phase::Running,
            elapsed: 0.0,
            score: 0,
            rider,
            obstacles: vec![],
            collectibles: vec![],
            notices: Notices::default(),
            held: Controls::default(),
        }
    }

    pub fn rider_anchor(config: &ScooterConfig, viewport: Size) -> Point {
        Point {
            x: config.rider_x,
            y: viewport.height * ROAD_Y_RATIO - 20.0,
        }
    }

    fn collectible_interval(config: &ScooterConfig, rng: &mut impl Rng) -> f32 {
        rng.gen_range(config.collectible_min_ms..=config.collectible_max_ms)
    }

    pub fn update(&mut self, controls: Controls, delta: f32, rng: &mut impl Rng) -> Vec<RunEvent> {
        let mut events = vec![];
        self.notices.tick(delta);

        match &mut self.phase {
            Phase::Ended {
                auto_return,
                returned,
            } => {
                let timed_out = auto_return.tick(delta);
                if !*returned && (controls.tapped || timed_out) {
                    *returned = true;
                    events.push(RunEvent::Return);
                }
                return events;
            }
            Phase::Running => {}
        }

        self.elapsed += delta;
        if self.elapsed >= self.config.duration_ms {
            self.phase = Phase::Ended {
                auto_return: Timer::new(self.config.auto_return_ms),
                returned: false,
            };
            events.push(RunEvent::Ended { score: self.score });
            return events;
        }

        // rising edges only, holding a key does not chain actions
        if controls.jump && !self.held.jump {
            self.rider.jump();
        } else if controls.slide && !self.held.slide {
            self.rider.slide();
        }
        self.held = controls;
        self.rider.update(delta);

        self.spawn(delta, rng);
        self.advance_entities(delta);
        self.resolve_obstacles(&mut events, rng);
        self.resolve_collectibles(&mut events);

        let despawn_x = self.config.despawn_x;
        self.obstacles.retain(|obstacle| obstacle.position.x >= despawn_x);
        self.collectibles.retain(|collectible| collectible.x >= despawn_x);
        events
    }

    fn spawn(&mut self, delta: f32, rng: &mut impl Rng) {
        let x = self.viewport.width + self.config.spawn_margin;
        if self.obstacle_timer.tick(delta) {
            if let Some(kind) = OBSTACLES.choose(rng) {
                self.obstacles.push(Obstacle {
                    kind,
                    position: Point {
                        x,
                        y: self.viewport.height * kind.y_ratio,
                    },
                });
            }
            self.obstacle_timer = Timer::new(obstacle_interval(self.elapsed, &self.config));
        }
        if self.collectible_timer.tick(delta) {
            self.collectibles.push(Point {
                x,
                y: self.viewport.height * COLLECTIBLE_Y_RATIO,
            });
            self.collectible_timer = Timer::new(Self::collectible_interval(&self.config, rng));
        }
    }

    fn advance_entities(&mut self, delta: f32) {
        let dx = self.config.entity_speed * delta / 1000.0;
        for obstacle in self.obstacles.iter_mut() {
            obstacle.position.x -= dx;
        }
        for collectible in self.collectibles.iter_mut() {
            collectible.x -= dx;
        }
    }

    /// Obstacles count as near while inside a horizontal band around the
    /// rider, so high obstacles above the road stay within reach
    fn resolve_obstacles(&mut self, events: &mut Vec<RunEvent>, rng: &mut impl Rng) {
        let rider_x = self.rider.anchor().x;
        let action = self.rider.action();
        let safe_jump = (self.config.safe_jump_from, self.config.safe_jump_to);
        let proximity = self.config.proximity;

        let mut hits = vec![];
        self.obstacles.retain(|obstacle| {
            let distance = (obstacle.position.x - rider_x).abs();
            let hit = distance < proximity && collides(obstacle.kind.height, action, safe_jump);
            if hit {
                hits.push((obstacle.kind.key, distance));
            }
            !hit
        });

        for (key, distance) in hits {
            self.score -= self.config.hit_penalty;
            log!(
                "Collision with {} at {:.0}px while {}",
                key,
                distance,
                self.rider.state_name()
            );
            if let Some(scold) = SCOLDS.choose(rng) {
                self.notices.push(
                    *scold,
                    Point {
                        x: self.viewport.width / 2.0,
                        y: self.viewport.height * 0.3,
                    },
                    styles::SCOLD,
                    self.config.scold_ms,
                );
            }
            events.push(RunEvent::Collision { key, distance });
        }
    }

    fn resolve_collectibles(&mut self, events: &mut Vec<RunEvent>) {
        let rider = self.rider.bounding_box();
        let side = self.config.collectible_size;
        let size = Size {
            width: side,
            height: side,
        };
        let before = self.collectibles.len();
        self.collectibles
            .retain(|collectible| !Rect::centered_on(*collectible, size).intersects(&rider));
        for _ in self.collectibles.len()..before {
            self.score += self.config.collect_bonus;
            events.push(RunEvent::Collected);
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running)
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Whole seconds left, rounded up
    pub fn seconds_left(&self) -> u32 {
        ((self.config.duration_ms - self.elapsed).max(0.0) / 1000.0).ceil() as u32
    }

    pub fn rider(&self) -> &Rider {
        &self.rider
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn collectibles(&self) -> &[Point] {
        &self.collectibles
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const VIEWPORT: Size = Size {
        width: 800.0,
        height: 600.0,
    };
    const STEP: f32 = 1000.0 / 60.0;

    fn run() -> (Run, StdRng) {
        let mut rng = StdRng::seed_from_u64(3);
        let run = Run::new(
            ScooterConfig::default(),
            &AnimationConfig::default(),
            VIEWPORT,
            &mut rng,
        );
        (run, rng)
    }

    fn place_obstacle(run: &mut Run, kind: usize) {
        let x = run.rider().anchor().x + 10.0;
        run.obstacles.push(Obstacle {
            kind: &OBSTACLES[kind],
            position: Point { x, y: 510.0 },
        });
    }

    #[test]
    fn low_obstacle_is_cleared_mid_jump_only() {
        let safe = (0.3, 0.7);
        assert!(!collides(Height::Low, Action::Jumping { progress: 0.5 }, safe));
        assert!(!collides(Height::Low, Action::Jumping { progress: 0.3 }, safe));
        assert!(collides(Height::Low, Action::Jumping { progress: 0.1 }, safe));
        assert!(collides(Height::Low, Action::Jumping { progress: 0.8 }, safe));
        assert!(collides(Height::Low, Action::Riding, safe));
        assert!(collides(Height::Low, Action::Sliding, safe));
    }

    #[test]
    fn high_obstacle_is_cleared_by_any_slide() {
        let safe = (0.3, 0.7);
        assert!(!collides(Height::High, Action::Sliding, safe));
        assert!(collides(Height::High, Action::Riding, safe));
        assert!(collides(Height::High, Action::Jumping { progress: 0.5 }, safe));
    }

    #[test]
    fn mid_jump_passes_a_nearby_low_obstacle() {
        let (mut run, mut rng) = run();
        run.update(Controls { jump: true, ..Controls::default() }, 0.0, &mut rng);
        // 600ms is the apex of the 1200ms jump
        for _ in 0..6 {
            run.update(Controls::default(), 100.0, &mut rng);
        }
        assert!(matches!(run.rider().action(), Action::Jumping { .. }));
        run.obstacles.clear();
        place_obstacle(&mut run, 0);

        let events = run.update(Controls::default(), 0.0, &mut rng);
        assert!(events.is_empty());
        assert_eq!(run.score(), 0);
        assert_eq!(run.obstacles().len(), 1);
    }

    #[test]
    fn riding_into_a_low_obstacle_costs_points_and_removes_it() {
        let (mut run, mut rng) = run();
        place_obstacle(&mut run, 0);

        let events = run.update(Controls::default(), 0.0, &mut rng);
        assert!(matches!(
            events.as_slice(),
            [RunEvent::Collision { key: "pizza", .. }]
        ));
        assert_eq!(run.score(), -10);
        assert!(run.obstacles().is_empty());
        assert!(!run.notices().is_empty());
    }

    #[test]
    fn sliding_passes_a_high_obstacle() {
        let (mut run, mut rng) = run();
        run.update(Controls { slide: true, ..Controls::default() }, 0.0, &mut rng);
        place_obstacle(&mut run, 2);
        let events = run.update(Controls::default(), 100.0, &mut rng);
        assert!(events.iter().all(|e| !matches!(e, RunEvent::Collision { .. })));
        assert_eq!(run.score(), 0);
    }

    #[test]
    fn overhead_obstacle_hits_a_rider_below_it() {
        let (mut run, mut rng) = run();
        let rider = run.rider().anchor();
        let kind = &OBSTACLES[2];
        let overhead = Point {
            x: rider.x + 10.0,
            y: VIEWPORT.height * kind.y_ratio,
        };
        // well over the proximity distance as the crow flies
        assert!(overhead.distance(&rider) > run.config.proximity);
        run.obstacles.push(Obstacle { kind, position: overhead });
        run.obstacles.push(Obstacle {
            kind,
            position: Point {
                x: rider.x + run.config.proximity,
                ..overhead
            },
        });

        let events = run.update(Controls::default(), 0.0, &mut rng);
        assert!(matches!(
            events.as_slice(),
            [RunEvent::Collision { key: "deadline", .. }]
        ));
        assert_eq!(run.obstacles().len(), 1);
    }

    #[test]
    fn spawn_interval_shortens_to_a_floor() {
        let config = ScooterConfig::default();
        assert_eq!(obstacle_interval(0.0, &config), 3000.0);
        assert_eq!(obstacle_interval(4999.0, &config), 3000.0);
        assert_eq!(obstacle_interval(5000.0, &config), 2800.0);
        assert_eq!(obstacle_interval(25_000.0, &config), 2000.0);
        let slow = ScooterConfig {
            difficulty_step_ms: 1000.0,
            ..ScooterConfig::default()
        };
        assert_eq!(obstacle_interval(20_000.0, &slow), 1200.0);
    }

    #[test]
    fn collectible_adds_points_on_overlap() {
        let (mut run, mut rng) = run();
        run.collectibles.push(run.rider().anchor());
        let events = run.update(Controls::default(), 0.0, &mut rng);
        assert_eq!(events, vec![RunEvent::Collected]);
        assert_eq!(run.score(), 20);
        assert!(run.collectibles().is_empty());
    }

    #[test]
    fn entities_spawn_offscreen_right_and_despawn_past_the_left_edge() {
        let (mut run, mut rng) = run();
        run.update(Controls::default(), 2990.0, &mut rng);
        assert!(run.obstacles().is_empty());
        run.update(Controls::default(), 10.0, &mut rng);
        assert_eq!(run.obstacles()[0].position.x, 845.0);
        run.update(Controls::default(), 2000.0, &mut rng);
        assert!(run.obstacles().is_empty());
    }

    #[test]
    fn run_ends_once_and_returns_once() {
        let (mut run, mut rng) = run();
        let mut ended = 0;
        let mut returned = 0;
        let mut frozen = None;
        let mut elapsed = 0.0;
        while elapsed < 40_000.0 {
            for event in run.update(Controls::default(), STEP, &mut rng) {
                match event {
                    RunEvent::Ended { .. } => {
                        ended += 1;
                        frozen = Some((run.obstacles().len(), run.collectibles().len()));
                    }
                    RunEvent::Return => returned += 1,
                    _ => {}
                }
            }
            elapsed += STEP;
        }
        assert_eq!(ended, 1);
        assert_eq!(returned, 1);
        // nothing spawned or moved out after the end
        assert_eq!(frozen, Some((run.obstacles().len(), run.collectibles().len())));
        assert_eq!(run.seconds_left(), 0);
    }

    #[test]
    fn tap_returns_before_the_auto_return() {
        let (mut run, mut rng) = run();
        let events = run.update(Controls::default(), 30_000.0, &mut rng);
        assert!(matches!(events.as_slice(), [RunEvent::Ended { .. }]));

        let tap = Controls {
            tapped: true,
            ..Controls::default()
        };
        assert_eq!(run.update(tap, STEP, &mut rng), vec![RunEvent::Return]);
        assert!(run.update(tap, STEP, &mut rng).is_empty());
        assert!(run.update(Controls::default(), 5000.0, &mut rng).is_empty());
    }
}
