//! Physics module - bodies, terrain and collision.

mod body;
mod direction;
mod obstacles;
mod platforms;
mod plugin;
mod tiles;

pub use body::{Aabb, PhysicsBody, SideHits};
pub use direction::{Heading, Side};
pub use obstacles::{Obstacle, ObstacleKind, Obstacles, SolidBlock};
pub use platforms::{move_platforms, Axis, MovingPlatform};
pub use plugin::{actor_physics, Actor, PhysicsPlugin};
pub use tiles::{Terrain, TileMap};
