use std::path::PathBuf;

use bevy::prelude::*;
use scene_format::SceneConfig;

use crate::scene::persistence::ConfigSource;

/// 启动时读到的场景配置。
#[derive(Resource)]
pub struct SceneSettings {
    pub config: SceneConfig,
    pub path: PathBuf,
    pub source: ConfigSource,
}
