use bevy::prelude::*;

/// 标记场景相机（放在视口中心，使世界坐标与场景坐标一致：左下角为原点）。
#[derive(Component)]
pub struct SceneCamera;
