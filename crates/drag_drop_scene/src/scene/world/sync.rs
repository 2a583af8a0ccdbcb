use bevy::prelude::*;
use scene_core::NodeId;

use crate::scene::types::{SceneNode, SceneState};

/// 推进控制器里的动作（惯性滑动、摆动、回正）。
pub fn advance_actions(time: Res<Time>, mut scene: ResMut<SceneState>) {
    scene.controller.advance(time.delta_secs());
}

/// 把节点位置/旋转写回实体。
///
/// 背景锚点在左下角，而 Bevy 精灵以中心为锚点，所以背景实体放在 `position + size / 2`。
pub fn sync_node_transforms(
    scene: Res<SceneState>,
    mut nodes_q: Query<(&SceneNode, &mut Transform)>,
) {
    let nodes = scene.controller.nodes();
    for (node, mut tf) in &mut nodes_q {
        let (center, rotation) = match node.0 {
            NodeId::Background => {
                let bg = &nodes.background;
                (bg.transform.position + bg.size * 0.5, bg.transform.rotation)
            }
            NodeId::Sprite(i) => {
                let (Some(center), Some(transform)) =
                    (nodes.sprite_scene_position(i), nodes.transform(node.0))
                else {
                    continue;
                };
                (center, transform.rotation)
            }
        };
        tf.translation.x = center.x;
        tf.translation.y = center.y;
        tf.rotation = Quat::from_rotation_z(rotation);
    }
}
