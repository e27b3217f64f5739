pub mod object3d;
pub mod scene;
pub mod scene_mesh;
pub mod transform;

pub use object3d::ObjectId;
pub use scene::Scene;
pub use scene_mesh::SceneMesh;
pub use transform::Transform;
