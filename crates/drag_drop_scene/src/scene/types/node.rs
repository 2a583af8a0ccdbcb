use bevy::prelude::*;
use scene_core::NodeId;

/// 把实体和控制器里的节点对应起来。
#[derive(Component, Clone, Copy, Debug)]
pub struct SceneNode(pub NodeId);

/// 图片加载失败，已换成纯色占位块。
#[derive(Component)]
pub struct FallbackVisual;

#[derive(Component)]
pub struct HudText;
