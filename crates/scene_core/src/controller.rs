//! 场景控制器：维护节点与选中状态，把平移手势翻译成精灵拖拽或背景滚动。

use bevy::math::Vec2;

use crate::action::{Action, ActionRunner, Animator, Easing};
use crate::gesture::PanGesture;
use crate::node::{NodeId, SceneLayout, SceneNodes, Selection};

/// 动画相关参数。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSettings {
    /// 背景松手后的惯性滑动时长，同时也是速度换算成位移的系数（秒）。
    pub scroll_duration: f32,
    /// 取消选中时转回 0 度的时长（秒）。
    pub settle_duration: f32,
    /// 选中精灵摆动的角度（度）。
    pub wobble_degrees: f32,
    /// 摆动每一步的时长（秒）。
    pub wobble_step: f32,
    /// 背景层固定的纵坐标（不做纵向滚动）。
    pub scene_origin_y: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            scroll_duration: 0.2,
            settle_duration: 0.1,
            wobble_degrees: 4.0,
            wobble_step: 0.1,
            scene_origin_y: 0.0,
        }
    }
}

impl MotionSettings {
    /// 选中精灵后的无限摆动：-N°，停一拍，+N°。
    pub fn idle_wobble(&self) -> Action {
        let angle = self.wobble_degrees.to_radians();
        Action::sequence(vec![
            Action::rotate_by(-angle, self.wobble_step),
            Action::rotate_by(0.0, self.wobble_step),
            Action::rotate_by(angle, self.wobble_step),
        ])
        .repeat_forever()
    }
}

pub struct SceneController<A = ActionRunner> {
    viewport: Vec2,
    nodes: SceneNodes,
    selection: Selection,
    motion: MotionSettings,
    animator: A,
}

impl<A: Animator> SceneController<A> {
    pub fn new(viewport: Vec2, layout: &SceneLayout, motion: MotionSettings, animator: A) -> Self {
        Self {
            viewport,
            nodes: SceneNodes::new(viewport, layout),
            selection: None,
            motion,
            animator,
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn nodes(&self) -> &SceneNodes {
        &self.nodes
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// 视图坐标（左上角原点，Y 向下）→ 场景坐标（左下角原点，Y 向上）。
    pub fn convert_point_from_view(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x, self.viewport.y - point.y)
    }

    /// 按阶段分发一次平移手势（坐标均为视图坐标）。结束阶段触发惯性滑动时返回滑动终点。
    pub fn handle_gesture(&mut self, gesture: PanGesture) -> Option<Vec2> {
        match gesture {
            PanGesture::Began { location } => {
                let location = self.convert_point_from_view(location);
                self.begin(location);
                None
            }
            PanGesture::Changed { translation } => {
                self.change(translation);
                None
            }
            PanGesture::Ended { velocity } => self.end(velocity),
        }
    }

    /// 手势开始：命中测试并切换选中节点（场景坐标）。
    ///
    /// 没命中或命中当前选中节点时什么都不做。
    pub fn begin(&mut self, location: Vec2) {
        let Some(hit) = self.nodes.node_at(location) else {
            return;
        };
        if self.selection == Some(hit) {
            return;
        }

        if let Some(previous) = self.selection {
            self.animator.cancel_all(previous);
            self.animator
                .run(previous, Action::rotate_to(0.0, self.motion.settle_duration));
        }

        self.selection = Some(hit);
        if hit.is_sprite() {
            self.animator.run(hit, self.motion.idle_wobble());
        }
    }

    /// 手势移动：`translation` 是视图坐标下的位移，先翻转 Y 轴。
    pub fn change(&mut self, translation: Vec2) {
        let delta = Vec2::new(translation.x, -translation.y);

        match self.selection {
            Some(sprite @ NodeId::Sprite(_)) => {
                if let Some(transform) = self.nodes.transform_mut(sprite) {
                    transform.position += delta;
                }
            }
            _ => {
                let candidate = self.nodes.background.transform.position + delta;
                self.nodes.background.transform.position = self.clamp(candidate);
            }
        }
    }

    /// 手势结束：背景（或尚未选中任何节点）时按松手速度做惯性滑动，返回滑动终点。
    ///
    /// 拖的是精灵时不做任何动画，精灵停在松手处。
    pub fn end(&mut self, velocity: Vec2) -> Option<Vec2> {
        if self.selection.is_some_and(NodeId::is_sprite) {
            return None;
        }

        let duration = self.motion.scroll_duration;
        let projected = velocity * duration;
        let target = self.clamp(self.nodes.background.transform.position + projected);

        self.animator.cancel_all(NodeId::Background);
        self.animator.run(
            NodeId::Background,
            Action::move_to(target, duration).with_easing(Easing::EaseOut),
        );
        Some(target)
    }

    /// 背景位置边界：只能向左平移（x ≤ 0），直到右边缘贴住视口右边；纵向固定。
    pub fn clamp(&self, candidate: Vec2) -> Vec2 {
        let layer_width = self.nodes.background.size.x;
        let mut x = candidate.x.min(0.0);
        x = x.max(-layer_width + self.viewport.x);
        Vec2::new(x, self.motion.scene_origin_y)
    }

    /// 推进所有动作。
    pub fn advance(&mut self, dt: f32) {
        self.animator.advance(dt, &mut self.nodes);
    }

    /// 图片加载完成后用真实尺寸替换占位尺寸。返回尺寸是否有变化。
    pub fn resize_node(&mut self, id: NodeId, size: Vec2) -> bool {
        let Some(current) = self.nodes.size_mut(id) else {
            return false;
        };
        if *current == size {
            return false;
        }
        *current = size;
        true
    }
}
