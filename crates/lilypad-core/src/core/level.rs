use crate::api::types::ObstacleId;
use crate::components::obstacle::Obstacle;

/// Flat storage for the course's obstacles.
///
/// The set is fixed once setup finishes: ids are plain indices into the
/// Vec and stay valid for the whole run. Hazards swap animation frames
/// in place; nothing moves, spawns, or despawns mid-game.
pub struct Level {
    obstacles: Vec<Obstacle>,
}

impl Level {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::with_capacity(256),
        }
    }

    /// Add an obstacle during setup. Returns its permanent id.
    pub fn push(&mut self, obstacle: Obstacle) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len() as u32);
        self.obstacles.push(obstacle);
        id
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.obstacles.get_mut(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> {
        self.obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| (ObstacleId(i as u32), o))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObstacleId, &mut Obstacle)> {
        self.obstacles
            .iter_mut()
            .enumerate()
            .map(|(i, o)| (ObstacleId(i as u32), o))
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}
