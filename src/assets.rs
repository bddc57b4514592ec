use crate::engine::{self, image_size, Size};
use futures::future::join_all;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use web_sys::HtmlImageElement;

/// Every texture the game references, as (key, path)
/// - walk cycles: up has 3 frames, down/left/right have 4
pub static CATALOG: Lazy<Vec<(String, String)>> = Lazy::new(|| {
    let fixed = [
        ("player_idle", "/walking/static.png"),
        ("cloud1", "/street/cloud.png"),
        ("cloud2", "/street/cloud2.png"),
        ("cloud3", "/street/cloud3.png"),
        ("satbayev", "/street/satbayev.png"),
        ("unihub", "/street/unihub.png"),
        ("cu", "/street/cu.png"),
        ("coridor", "/building/coridor.png"),
        ("unihub_inside", "/building/unihub.png"),
        ("cu_inside", "/building/cu.png"),
        ("unihub_kitchen", "/building/unihub2.png"),
        ("unihub_cafeteria", "/building/unihub2.png"),
        ("lecture_hall", "/building/lecture-hall.png"),
        ("heart", "/other/heart.png"),
        ("eat", "/other/eat.png"),
        ("code", "/other/code.png"),
        ("lagman", "/havchik/lagman.png"),
        ("plov", "/havchik/plov.png"),
        ("manti", "/havchik/manti.png"),
        ("bug", "/escooter-minigame/bug.PNG"),
        ("pizza", "/escooter-minigame/pizza.png"),
        ("deadline", "/escooter-minigame/deadline.png"),
        ("paper", "/escooter-minigame/paper.png"),
        ("energy", "/escooter-minigame/energy-drink-can.PNG"),
    ];

    let mut catalog: Vec<(String, String)> = fixed
        .iter()
        .map(|(key, path)| (key.to_string(), path.to_string()))
        .collect();

    for (direction, frames) in [("up", 3), ("down", 4), ("right", 4), ("left", 4)] {
        for i in 1..=frames {
            catalog.push((
                format!("walk_{}{}", direction, i),
                format!("/walking/walking-{}{}.png", direction, i),
            ));
        }
    }
    for i in 1..=3 {
        catalog.push((
            format!("escooter-sprite-{}", i),
            format!("/escooter-minigame/escooter-sprite-{}.png", i),
        ));
    }
    catalog
});

/// Loaded textures by key; a key that failed to load is simply absent
#[derive(Debug, Default)]
pub struct Assets {
    images: HashMap<String, HtmlImageElement>,
}

impl Assets {
    /// Load the whole catalog concurrently
    /// - a failed image is logged and skipped, never fatal
    pub async fn load() -> Self {
        let loads = CATALOG.iter().map(|(key, path)| async move {
            (key.clone(), path.as_str(), engine::load_image(path).await)
        });

        let mut images = HashMap::new();
        for (key, path, result) in join_all(loads).await {
            match result {
                Ok(image) => {
                    images.insert(key, image);
                }
                Err(err) => warn!("Failed to load texture '{}' from {}: {:#}", key, path, err),
            }
        }
        log!("Loaded {} of {} textures", images.len(), CATALOG.len());
        Assets { images }
    }

    pub fn get(&self, key: &str) -> Option<&HtmlImageElement> {
        self.images.get(key)
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    pub fn size(&self, key: &str) -> Option<Size> {
        self.get(key).map(image_size)
    }
}
