//! 节点动作（类似 SpriteKit 的 SKAction）：定时旋转、带缓动的移动、序列、无限重复。
//!
//! 控制器只通过 `Animator` 下发/取消动作；真正按帧推进的是 `ActionRunner`。
//! 测试里可以换成只记录调用的实现。

use std::collections::HashMap;

use bevy::math::Vec2;

use crate::node::{NodeId, NodeTransform, SceneNodes};

/// 一次重复动作在单帧内最多跑几轮（防止极短动作把一帧卡死）。
const MAX_REPEATS_PER_TICK: u32 = 64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    /// 减速到终点。
    EaseOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    RotateTo { angle: f32, duration: f32 },
    RotateBy { angle: f32, duration: f32 },
    MoveTo { target: Vec2, duration: f32, easing: Easing },
    Sequence(Vec<Action>),
    RepeatForever(Box<Action>),
}

impl Action {
    pub fn rotate_to(angle: f32, duration: f32) -> Self {
        Action::RotateTo { angle, duration }
    }

    pub fn rotate_by(angle: f32, duration: f32) -> Self {
        Action::RotateBy { angle, duration }
    }

    pub fn move_to(target: Vec2, duration: f32) -> Self {
        Action::MoveTo {
            target,
            duration,
            easing: Easing::Linear,
        }
    }

    /// 只对 `MoveTo` 生效，其余动作原样返回。
    pub fn with_easing(self, easing: Easing) -> Self {
        match self {
            Action::MoveTo {
                target, duration, ..
            } => Action::MoveTo {
                target,
                duration,
                easing,
            },
            other => other,
        }
    }

    pub fn sequence(steps: Vec<Action>) -> Self {
        Action::Sequence(steps)
    }

    pub fn repeat_forever(self) -> Self {
        Action::RepeatForever(Box::new(self))
    }

    /// 单轮时长（秒）；无限重复返回 `f32::INFINITY`（零时长的重复除外）。
    pub fn duration(&self) -> f32 {
        match self {
            Action::RotateTo { duration, .. }
            | Action::RotateBy { duration, .. }
            | Action::MoveTo { duration, .. } => duration.max(0.0),
            Action::Sequence(steps) => steps.iter().map(Action::duration).sum(),
            Action::RepeatForever(inner) => {
                if inner.duration() > 0.0 {
                    f32::INFINITY
                } else {
                    0.0
                }
            }
        }
    }
}

/// 动画服务：控制器通过它调度、取消节点上的动作。
pub trait Animator {
    /// 在节点上追加一个动作（不会取消已有动作）。
    fn run(&mut self, node: NodeId, action: Action);

    /// 取消节点上的全部动作，节点停在当前状态。
    fn cancel_all(&mut self, node: NodeId);

    /// 推进 `dt` 秒。
    fn advance(&mut self, dt: f32, nodes: &mut SceneNodes);
}

/// 正在执行的动作。`RotateTo`/`MoveTo` 的起点在第一次 tick 时才确定。
#[derive(Clone, Debug)]
enum Running {
    RotateTo {
        from: Option<f32>,
        to: f32,
        duration: f32,
        elapsed: f32,
    },
    RotateBy {
        angle: f32,
        duration: f32,
        elapsed: f32,
    },
    MoveTo {
        from: Option<Vec2>,
        target: Vec2,
        duration: f32,
        easing: Easing,
        elapsed: f32,
    },
    Sequence {
        steps: Vec<Action>,
        index: usize,
        current: Option<Box<Running>>,
    },
    Repeat {
        action: Action,
        current: Box<Running>,
    },
}

/// 推进计时；返回 (推进前进度, 推进后进度, 剩余时间)。剩余时间为 `None` 表示尚未结束。
fn step_timer(elapsed: &mut f32, duration: f32, dt: f32) -> (f32, f32, Option<f32>) {
    if duration <= 0.0 {
        return (0.0, 1.0, Some(dt));
    }
    let before = (*elapsed / duration).min(1.0);
    let total = *elapsed + dt;
    if total >= duration {
        *elapsed = duration;
        (before, 1.0, Some(total - duration))
    } else {
        *elapsed = total;
        (before, total / duration, None)
    }
}

impl Running {
    fn start(action: &Action) -> Self {
        match action {
            Action::RotateTo { angle, duration } => Running::RotateTo {
                from: None,
                to: *angle,
                duration: *duration,
                elapsed: 0.0,
            },
            Action::RotateBy { angle, duration } => Running::RotateBy {
                angle: *angle,
                duration: *duration,
                elapsed: 0.0,
            },
            Action::MoveTo {
                target,
                duration,
                easing,
            } => Running::MoveTo {
                from: None,
                target: *target,
                duration: *duration,
                easing: *easing,
                elapsed: 0.0,
            },
            Action::Sequence(steps) => Running::Sequence {
                steps: steps.clone(),
                index: 0,
                current: None,
            },
            Action::RepeatForever(inner) => Running::Repeat {
                action: (**inner).clone(),
                current: Box::new(Running::start(inner)),
            },
        }
    }

    /// 推进 `dt` 秒；结束时返回没用完的时间。
    fn tick(&mut self, dt: f32, node: &mut NodeTransform) -> Option<f32> {
        match self {
            Running::RotateTo {
                from,
                to,
                duration,
                elapsed,
            } => {
                let start = *from.get_or_insert(node.rotation);
                let (_, t, rest) = step_timer(elapsed, *duration, dt);
                node.rotation = start + (*to - start) * t;
                rest
            }
            Running::RotateBy {
                angle,
                duration,
                elapsed,
            } => {
                let (before, after, rest) = step_timer(elapsed, *duration, dt);
                node.rotation += *angle * (after - before);
                rest
            }
            Running::MoveTo {
                from,
                target,
                duration,
                easing,
                elapsed,
            } => {
                let start = *from.get_or_insert(node.position);
                let (_, t, rest) = step_timer(elapsed, *duration, dt);
                node.position = start.lerp(*target, easing.apply(t));
                rest
            }
            Running::Sequence {
                steps,
                index,
                current,
            } => {
                let mut dt = dt;
                loop {
                    if current.is_none() {
                        let Some(step) = steps.get(*index) else {
                            return Some(dt);
                        };
                        *current = Some(Box::new(Running::start(step)));
                    }
                    let Some(running) = current.as_mut() else {
                        return Some(dt);
                    };
                    match running.tick(dt, node) {
                        None => return None,
                        Some(rest) => {
                            dt = rest;
                            *index += 1;
                            *current = None;
                            if *index >= steps.len() {
                                return Some(dt);
                            }
                        }
                    }
                }
            }
            Running::Repeat { action, current } => {
                let zero_length = action.duration() <= 0.0;
                let mut dt = dt;
                let mut rounds = 0;
                loop {
                    match current.tick(dt, node) {
                        None => return None,
                        Some(rest) => {
                            **current = Running::start(action);
                            rounds += 1;
                            if zero_length || rest <= 0.0 || rounds >= MAX_REPEATS_PER_TICK {
                                return None;
                            }
                            dt = rest;
                        }
                    }
                }
            }
        }
    }
}

/// 默认的动画服务：按节点保存正在执行的动作，每帧推进。
#[derive(Debug, Default)]
pub struct ActionRunner {
    running: HashMap<NodeId, Vec<Running>>,
}

impl ActionRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self, node: NodeId) -> bool {
        self.running_count(node) > 0
    }

    pub fn running_count(&self, node: NodeId) -> usize {
        self.running.get(&node).map_or(0, Vec::len)
    }
}

impl Animator for ActionRunner {
    fn run(&mut self, node: NodeId, action: Action) {
        self.running
            .entry(node)
            .or_default()
            .push(Running::start(&action));
    }

    fn cancel_all(&mut self, node: NodeId) {
        self.running.remove(&node);
    }

    fn advance(&mut self, dt: f32, nodes: &mut SceneNodes) {
        for (id, actions) in self.running.iter_mut() {
            let Some(transform) = nodes.transform_mut(*id) else {
                actions.clear();
                continue;
            };
            actions.retain_mut(|a| a.tick(dt, transform).is_none());
        }
        self.running.retain(|_, actions| !actions.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SceneLayout;

    fn nodes() -> SceneNodes {
        SceneNodes::new(
            Vec2::new(400.0, 800.0),
            &SceneLayout {
                background_image: "bg".to_string(),
                background_size: Vec2::new(1200.0, 800.0),
                sprite_images: vec!["a".to_string()],
                sprite_size: Vec2::splat(64.0),
            },
        )
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn ease_out_decelerates() {
        assert_eq!(Easing::EaseOut.apply(0.0), 0.0);
        assert_eq!(Easing::EaseOut.apply(1.0), 1.0);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
        assert_eq!(Easing::EaseOut.apply(3.0), 1.0);
    }

    #[test]
    fn move_to_reaches_target_and_finishes() {
        let mut nodes = nodes();
        let mut runner = ActionRunner::new();
        let target = Vec2::new(-100.0, 0.0);
        runner.run(
            NodeId::Background,
            Action::move_to(target, 0.2).with_easing(Easing::EaseOut),
        );

        runner.advance(0.1, &mut nodes);
        let halfway = nodes.background.transform.position.x;
        // 减速曲线：一半时间已走完超过一半路程
        assert!(halfway < -50.0 && halfway > -100.0);
        assert!(runner.is_running(NodeId::Background));

        runner.advance(0.15, &mut nodes);
        assert_eq!(nodes.background.transform.position, target);
        assert!(!runner.is_running(NodeId::Background));
    }

    #[test]
    fn move_to_starts_from_position_at_first_tick() {
        let mut nodes = nodes();
        let mut runner = ActionRunner::new();
        runner.run(NodeId::Background, Action::move_to(Vec2::new(-100.0, 0.0), 1.0));
        nodes.background.transform.position.x = -50.0;

        runner.advance(0.5, &mut nodes);
        assert!(close(nodes.background.transform.position.x, -75.0));
    }

    #[test]
    fn sequence_carries_leftover_time_into_next_step() {
        let mut nodes = nodes();
        let mut runner = ActionRunner::new();
        let sprite = NodeId::Sprite(0);
        runner.run(
            sprite,
            Action::sequence(vec![Action::rotate_by(1.0, 0.25), Action::rotate_by(2.0, 0.25)]),
        );

        runner.advance(0.375, &mut nodes);
        assert!(close(nodes.sprites[0].transform.rotation, 2.0));

        runner.advance(0.125, &mut nodes);
        assert!(close(nodes.sprites[0].transform.rotation, 3.0));
        assert!(!runner.is_running(sprite));
    }

    #[test]
    fn repeat_forever_keeps_running_and_loops() {
        let mut nodes = nodes();
        let mut runner = ActionRunner::new();
        let sprite = NodeId::Sprite(0);
        let wobble = Action::sequence(vec![
            Action::rotate_by(-0.1, 0.125),
            Action::rotate_by(0.0, 0.125),
            Action::rotate_by(0.1, 0.125),
        ])
        .repeat_forever();
        assert_eq!(wobble.duration(), f32::INFINITY);
        runner.run(sprite, wobble);

        runner.advance(0.125, &mut nodes);
        assert!(close(nodes.sprites[0].transform.rotation, -0.1));

        // 一轮结束回到 0，再进入下一轮
        runner.advance(0.25, &mut nodes);
        assert!(close(nodes.sprites[0].transform.rotation, 0.0));
        runner.advance(0.0625, &mut nodes);
        assert!(close(nodes.sprites[0].transform.rotation, -0.05));
        assert!(runner.is_running(sprite));
    }

    #[test]
    fn zero_length_repeat_does_not_hang() {
        let mut nodes = nodes();
        let mut runner = ActionRunner::new();
        runner.run(NodeId::Sprite(0), Action::rotate_by(0.5, 0.0).repeat_forever());

        runner.advance(0.016, &mut nodes);
        assert!(close(nodes.sprites[0].transform.rotation, 0.5));
        assert!(runner.is_running(NodeId::Sprite(0)));
    }

    #[test]
    fn cancel_all_leaves_node_where_it_is() {
        let mut nodes = nodes();
        let mut runner = ActionRunner::new();
        let sprite = NodeId::Sprite(0);
        runner.run(sprite, Action::rotate_by(1.0, 1.0));
        runner.run(sprite, Action::rotate_by(1.0, 1.0));
        assert_eq!(runner.running_count(sprite), 2);

        runner.advance(0.5, &mut nodes);
        runner.cancel_all(sprite);
        runner.advance(0.5, &mut nodes);

        assert!(close(nodes.sprites[0].transform.rotation, 1.0));
        assert!(!runner.is_running(sprite));
    }

    #[test]
    fn rotate_to_settles_from_current_angle() {
        let mut nodes = nodes();
        nodes.sprites[0].transform.rotation = -0.4;
        let mut runner = ActionRunner::new();
        runner.run(NodeId::Sprite(0), Action::rotate_to(0.0, 0.1));

        runner.advance(0.05, &mut nodes);
        assert!(close(nodes.sprites[0].transform.rotation, -0.2));
        runner.advance(0.05, &mut nodes);
        assert_eq!(nodes.sprites[0].transform.rotation, 0.0);
    }

    #[test]
    fn actions_on_missing_nodes_are_dropped() {
        let mut nodes = nodes();
        let mut runner = ActionRunner::new();
        runner.run(NodeId::Sprite(9), Action::rotate_by(1.0, 1.0));
        runner.advance(0.1, &mut nodes);
        assert!(!runner.is_running(NodeId::Sprite(9)));
    }
}
