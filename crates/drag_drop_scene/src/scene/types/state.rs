use bevy::prelude::*;
use scene_core::{ActionRunner, SceneController};
use scene_format::SceneConfig;

/// 场景控制器（节点、选中状态、动作）。
///
/// 所有修改都发生在 Update 里串行执行的系统中。
#[derive(Resource)]
pub struct SceneState {
    pub controller: SceneController<ActionRunner>,
}

impl SceneState {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            controller: SceneController::new(
                config.viewport(),
                &config.layout(),
                config.motion(),
                ActionRunner::new(),
            ),
        }
    }
}
