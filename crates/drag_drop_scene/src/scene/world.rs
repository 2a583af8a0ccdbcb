//! 世界（World）侧逻辑：相机、节点实体、手势、动作推进、渲染同步。
//!
//! 关键点：
//! - 手势识别与控制器都只认视图坐标（左上角原点），坐标换算在控制器里完成。
//! - 节点的真实状态在 `SceneState` 里，实体的 `Transform` 每帧从它同步过来。

mod camera;
mod gesture;
mod images;
mod spawn;
mod sync;

pub use camera::setup_camera;
pub use gesture::{apply_pan_gestures, recognize_pan_gesture};
pub use images::{fallback_for_failed_images, sync_node_sizes_from_images};
pub use spawn::spawn_scene_nodes;
pub use sync::{advance_actions, sync_node_transforms};

use scene_core::{NodeId, SceneNodes};

/// 日志/HUD 里显示的节点名。
pub(crate) fn node_label(nodes: &SceneNodes, id: NodeId) -> String {
    match nodes.name(id) {
        Some(name) => name.rsplit('/').next().unwrap_or(name).to_string(),
        None => format!("{id:?}"),
    }
}
