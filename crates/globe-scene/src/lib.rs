//! Scene content for the globe viewer: node hierarchy, sphere and star
//! geometry, and the per-frame transform update policy.

pub mod animation;
pub mod graph;
pub mod smoothing;
pub mod sphere;
pub mod stars;
pub mod transform;

pub use animation::{Animator, FrameTime, MotionParams};
pub use graph::{GlobeScene, NodeId, NodeKind, SceneGraph, SceneNode, SceneParams};
pub use smoothing::ExpSmoother;
pub use sphere::{SphereMesh, generate_uv_sphere};
pub use stars::{StarFieldParams, generate_star_positions};
pub use transform::Transform;
