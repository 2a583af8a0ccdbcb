#![forbid(unsafe_code)]

// 纯逻辑 crate：拖拽/平移场景的数据结构与手势算法。
//
// 渲染、窗口、输入采集都在 drag_drop_scene 里；这里只保留可单测的部分：
// - 节点模型（背景层 + 可拖拽精灵）与命中测试
// - 动作调度（类似 SKAction：可取消、可重复、可缓动）
// - 平移手势识别与松手速度估计
// - 场景控制器（选中、拖拽、背景边界、惯性滑动）

pub mod action;
pub mod controller;
pub mod gesture;
pub mod node;

pub use bevy::math::Vec2;

pub use action::{Action, ActionRunner, Animator, Easing};
pub use controller::{MotionSettings, SceneController};
pub use gesture::{PanGesture, PanRecognizer, VelocityTracker, DRAG_SLOP};
pub use node::{BackgroundLayer, DraggableSprite, NodeId, NodeTransform, SceneLayout, SceneNodes, Selection};
