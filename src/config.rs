use crate::browser;
use serde::{Deserialize, Serialize};

/// Tunables, overridable from `config.json` next to the page
/// - every level is `#[serde(default)]`, so a partial file only overrides the
///   fields it names
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub animation: AnimationConfig,
    pub hint: HintConfig,
    pub economy: EconomyConfig,
    pub scooter: ScooterConfig,
}

impl GameConfig {
    const PATH: &'static str = "config.json";

    pub async fn load() -> Self {
        match browser::fetch_json::<GameConfig>(Self::PATH).await {
            Ok(config) => {
                log!("Loaded game config from {}", Self::PATH);
                config
            }
            Err(err) => {
                warn!("Using default game config, {} unavailable: {:#}", Self::PATH, err);
                GameConfig::default()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// a walk cycle advances once its timer exceeds this
    pub walk_frame_ms: f32,
    pub scooter_frame_ms: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            walk_frame_ms: 120.0,
            scooter_frame_ms: 150.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HintConfig {
    pub idle_threshold_ms: f32,
    pub display_ms: f32,
}

impl Default for HintConfig {
    fn default() -> Self {
        HintConfig {
            idle_threshold_ms: 5000.0,
            display_ms: 3000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub max_hearts: u8,
    pub max_eating: u8,
    pub max_coding: u8,
    pub decay_interval_ms: f32,
    pub restart_notice_ms: f32,
    pub snack_notice_ms: f32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        EconomyConfig {
            max_hearts: 5,
            max_eating: 3,
            max_coding: 3,
            decay_interval_ms: 10000.0,
            restart_notice_ms: 3000.0,
            snack_notice_ms: 2000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScooterConfig {
    pub duration_ms: f32,
    pub base_spawn_ms: f32,
    pub spawn_step_ms: f32,
    pub difficulty_step_ms: f32,
    pub min_spawn_ms: f32,
    pub collectible_min_ms: f32,
    pub collectible_max_ms: f32,
    /// px/s, entities move right to left
    pub entity_speed: f32,
    pub spawn_margin: f32,
    pub despawn_x: f32,
    pub proximity: f32,
    pub hit_penalty: i32,
    pub collect_bonus: i32,
    pub scold_ms: f32,
    /// one way of the yoyo jump; the full jump takes twice as long
    pub jump_ms: f32,
    pub jump_height: f32,
    pub slide_ms: f32,
    pub safe_jump_from: f32,
    pub safe_jump_to: f32,
    pub auto_return_ms: f32,
    pub rider_x: f32,
    pub rider_scale: f32,
    pub rider_width: f32,
    pub rider_height: f32,
    pub collectible_size: f32,
}

impl Default for ScooterConfig {
    fn default() -> Self {
        ScooterConfig {
            duration_ms: 30000.0,
            base_spawn_ms: 3000.0,
            spawn_step_ms: 200.0,
            difficulty_step_ms: 5000.0,
            min_spawn_ms: 1200.0,
            collectible_min_ms: 3000.0,
            collectible_max_ms: 5000.0,
            entity_speed: 500.0,
            spawn_margin: 50.0,
            despawn_x: -100.0,
            proximity: 80.0,
            hit_penalty: 10,
            collect_bonus: 20,
            scold_ms: 1000.0,
            jump_ms: 600.0,
            jump_height: 200.0,
            slide_ms: 500.0,
            safe_jump_from: 0.3,
            safe_jump_to: 0.7,
            auto_return_ms: 3000.0,
            rider_x: 200.0,
            rider_scale: 0.3,
            rider_width: 120.0,
            rider_height: 120.0,
            collectible_size: 60.0,
        }
    }
}
