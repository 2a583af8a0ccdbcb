use bevy::prelude::*;

use crate::scene::types::{SceneCamera, SceneState};

/// 初始化场景相机：放在视口中心，世界坐标即场景坐标。
pub fn setup_camera(mut commands: Commands, scene: Res<SceneState>) {
    let center = scene.controller.viewport() * 0.5;
    commands.spawn((
        Camera2d,
        Transform::from_translation(Vec3::new(center.x, center.y, 1000.0)),
        SceneCamera,
    ));
}
