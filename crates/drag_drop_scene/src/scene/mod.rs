//! 拖拽/平移演示场景。
//!
//! 一张可横向滚动的背景，上面挂着几只可以拖动的小动物：
//! - 按住精灵拖动：精灵跟手移动，被选中的精灵会轻微摆动
//! - 按住背景拖动：背景在边界内横向滚动，松手后按速度做一小段减速滑动
//!
//! 说明：
//! - 场景逻辑全部在 `scene_core::SceneController`，这里只负责输入采集、渲染同步与资源加载。
//! - 相机放在视口中心，世界坐标 = 场景坐标（左下角为原点，Y 向上）。

mod paths;
mod persistence;
mod types;
mod ui;
mod world;

mod app;

use bevy::prelude::Color;

pub const CLEAR_COLOR: Color = Color::srgb(0.02, 0.02, 0.08);

/// 背景图加载失败时的占位色。
pub const FALLBACK_BACKGROUND: Color = Color::srgb(0.10, 0.16, 0.38);

/// 精灵图加载失败时的占位色（按下标循环）。
pub const FALLBACK_SPRITES: [Color; 4] = [
    Color::srgb(0.95, 0.75, 0.20),
    Color::srgb(0.90, 0.45, 0.30),
    Color::srgb(0.55, 0.80, 0.35),
    Color::srgb(0.35, 0.70, 0.90),
];

pub const HUD_TEXT: Color = Color::srgb(0.85, 0.85, 0.85);
pub const HUD_FONT_SIZE: f32 = 14.0;

pub use app::run;
