pub mod camera;
pub mod melody;
pub mod mesh;
pub mod palette;
pub mod scene;
pub mod scheduler;
pub mod snow;
pub mod timeline;
pub mod tree;
pub mod twinkle;

pub use melody::{Melody, Note};
pub use scene::{DrawInstance, Lighting, PointLight, Scene};
pub use scheduler::{LookaheadScheduler, PlayerParams, ScheduledNote, VoiceSet};

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static SNOW_WGSL: &str = include_str!("../../shaders/snow.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
