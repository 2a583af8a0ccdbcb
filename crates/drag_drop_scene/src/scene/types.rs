//! 资源（Resource）、组件（Component）与消息（Message）的集中定义。

mod camera;
mod config;
mod input;
mod node;
mod state;

pub use camera::SceneCamera;
pub use config::SceneSettings;
pub use input::{PanGestureMessage, PanInput, PointerSource};
pub use node::{FallbackVisual, HudText, SceneNode};
pub use state::SceneState;
