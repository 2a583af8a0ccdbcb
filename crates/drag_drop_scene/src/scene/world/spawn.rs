//! 生成背景与精灵实体。

use bevy::prelude::*;
use scene_core::NodeId;

use crate::scene::types::{SceneNode, SceneState};

use super::node_label;

const SPRITE_BASE_Z: f32 = 1.0;
const SPRITE_Z_STEP: f32 = 0.01;

/// 按控制器里的节点生成实体；位置由 `sync_node_transforms` 每帧同步。
pub fn spawn_scene_nodes(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    scene: Res<SceneState>,
) {
    let nodes = scene.controller.nodes();

    commands.spawn((
        Sprite::from_image(asset_server.load(nodes.background.image.clone())),
        Transform::default(),
        SceneNode(NodeId::Background),
    ));

    for (i, sprite) in nodes.sprites.iter().enumerate() {
        // 后生成的在上层，与命中测试顺序一致
        let z = SPRITE_BASE_Z + i as f32 * SPRITE_Z_STEP;
        commands.spawn((
            Sprite::from_image(asset_server.load(sprite.image.clone())),
            Transform::from_xyz(0.0, 0.0, z),
            SceneNode(NodeId::Sprite(i)),
        ));
    }

    info!(
        "scene ready: {} + {} sprites ({})",
        node_label(nodes, NodeId::Background),
        nodes.sprites.len(),
        nodes
            .ids()
            .skip(1)
            .map(|id| node_label(nodes, id))
            .collect::<Vec<_>>()
            .join(", ")
    );
}
