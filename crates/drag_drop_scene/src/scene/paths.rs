//! 与 workspace/assets 路径相关的工具函数。

use std::path::PathBuf;

pub const SCENE_CONFIG_FILE: &str = "scene.ron";

/// workspace 的 `assets/` 目录绝对路径。
///
/// `CARGO_MANIFEST_DIR` 指向 `crates/drag_drop_scene`，因此向上两级即可到 workspace 根。
pub fn workspace_assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

pub fn scene_config_path() -> PathBuf {
    workspace_assets_dir().join(SCENE_CONFIG_FILE)
}
