//! 图片加载完成后的尺寸同步，以及加载失败时的占位处理。

use bevy::asset::LoadState;
use bevy::prelude::*;
use scene_core::NodeId;

use crate::scene::types::{FallbackVisual, SceneNode, SceneState};
use crate::scene::{FALLBACK_BACKGROUND, FALLBACK_SPRITES};

use super::node_label;

/// 图片加载完就把真实尺寸写进控制器（背景宽度决定可平移范围，精灵尺寸决定命中范围）。
pub fn sync_node_sizes_from_images(
    images: Res<Assets<Image>>,
    mut scene: ResMut<SceneState>,
    nodes_q: Query<(&SceneNode, &Sprite), Without<FallbackVisual>>,
) {
    for (node, sprite) in &nodes_q {
        let Some(image) = images.get(&sprite.image) else {
            continue;
        };
        let size = image.size().as_vec2();
        if scene.controller.resize_node(node.0, size) {
            info!(
                "{} loaded: {}x{}",
                node_label(scene.controller.nodes(), node.0),
                size.x,
                size.y
            );
        }
    }
}

fn fallback_color(id: NodeId) -> Color {
    match id {
        NodeId::Background => FALLBACK_BACKGROUND,
        NodeId::Sprite(i) => FALLBACK_SPRITES[i % FALLBACK_SPRITES.len()],
    }
}

/// 图片加载失败：换成配置里占位尺寸的纯色块，场景照常可用。
pub fn fallback_for_failed_images(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    scene: Res<SceneState>,
    mut nodes_q: Query<(Entity, &SceneNode, &mut Sprite), Without<FallbackVisual>>,
) {
    for (entity, node, mut sprite) in &mut nodes_q {
        if !matches!(
            asset_server.get_load_state(sprite.image.id()),
            Some(LoadState::Failed(_))
        ) {
            continue;
        }
        let nodes = scene.controller.nodes();
        let Some(size) = nodes.size(node.0) else {
            continue;
        };

        warn!(
            "image failed to load, drawing a placeholder: {}",
            node_label(nodes, node.0)
        );
        *sprite = Sprite::from_color(fallback_color(node.0), size);
        commands.entity(entity).insert(FallbackVisual);
    }
}
