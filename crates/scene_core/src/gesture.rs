//! 平移手势识别：把指针的按下/移动/松开序列变成 Began/Changed/Ended 三个阶段。
//!
//! 所有坐标都是视图坐标（左上角为原点，Y 向下），时间单位为秒。

use std::collections::VecDeque;

use bevy::math::Vec2;

/// 指针离开按下点超过这个距离（逻辑像素）才算开始平移。
pub const DRAG_SLOP: f32 = 8.0;

/// 速度估计只看最近这段时间内的采样（秒）。
pub const VELOCITY_HORIZON: f32 = 0.1;

/// 一次平移手势的某个阶段。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanGesture {
    /// 手势开始；`location` 是按下点。
    Began { location: Vec2 },
    /// 距离上一次上报的位移。
    Changed { translation: Vec2 },
    /// 松手时的速度（像素/秒）。
    Ended { velocity: Vec2 },
}

/// 根据最近的采样估计指针速度。
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(f32, Vec2)>,
}

impl VelocityTracker {
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn add(&mut self, time: f32, position: Vec2) {
        // 时间回退（例如换了输入源）时丢弃旧采样
        if self.samples.back().is_some_and(|(t, _)| *t > time) {
            self.samples.clear();
        }
        self.samples.push_back((time, position));
        while self
            .samples
            .front()
            .is_some_and(|(t, _)| time - *t > VELOCITY_HORIZON)
        {
            self.samples.pop_front();
        }
    }

    pub fn velocity(&self) -> Vec2 {
        let (Some((t0, p0)), Some((t1, p1))) = (self.samples.front(), self.samples.back()) else {
            return Vec2::ZERO;
        };
        let dt = t1 - t0;
        if dt <= f32::EPSILON {
            return Vec2::ZERO;
        }
        (*p1 - *p0) / dt
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum PanPhase {
    #[default]
    Idle,
    /// 已按下，还没超过 slop。
    Pressed { start: Vec2 },
    /// 手势进行中；`last` 是上一次上报位移时的位置。
    Panning { last: Vec2 },
}

/// 单指针平移识别器（同一时间只跟踪一个手势）。
#[derive(Clone, Debug, Default)]
pub struct PanRecognizer {
    phase: PanPhase,
    tracker: VelocityTracker,
}

impl PanRecognizer {
    pub fn is_panning(&self) -> bool {
        matches!(self.phase, PanPhase::Panning { .. })
    }

    /// 指针按下。若上一次手势还没结束，直接丢弃它。
    pub fn press(&mut self, position: Vec2, time: f32) {
        self.phase = PanPhase::Pressed { start: position };
        self.tracker.clear();
        self.tracker.add(time, position);
    }

    /// 指针移动；返回本次产生的手势阶段（0~2 个）。
    pub fn moved(&mut self, position: Vec2, time: f32) -> Vec<PanGesture> {
        match self.phase {
            PanPhase::Idle => Vec::new(),
            PanPhase::Pressed { start } => {
                self.tracker.add(time, position);
                if position.distance(start) <= DRAG_SLOP {
                    return Vec::new();
                }
                self.phase = PanPhase::Panning { last: position };
                vec![
                    PanGesture::Began { location: start },
                    PanGesture::Changed {
                        translation: position - start,
                    },
                ]
            }
            PanPhase::Panning { last } => {
                self.tracker.add(time, position);
                if position == last {
                    return Vec::new();
                }
                self.phase = PanPhase::Panning { last: position };
                vec![PanGesture::Changed {
                    translation: position - last,
                }]
            }
        }
    }

    /// 指针松开。只有已开始的手势才会产生 `Ended`。
    pub fn release(&mut self, position: Vec2, time: f32) -> Vec<PanGesture> {
        let mut out = Vec::new();
        if self.is_panning() {
            out = self.moved(position, time);
            out.push(PanGesture::Ended {
                velocity: self.tracker.velocity(),
            });
        }
        self.phase = PanPhase::Idle;
        self.tracker.clear();
        out
    }

    /// 指针丢失（离开窗口、触摸被取消）：已开始的手势以零速度结束。
    pub fn cancel(&mut self) -> Option<PanGesture> {
        let was_panning = self.is_panning();
        self.phase = PanPhase::Idle;
        self.tracker.clear();
        was_panning.then_some(PanGesture::Ended {
            velocity: Vec2::ZERO,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_needs_two_samples() {
        let mut tracker = VelocityTracker::default();
        assert_eq!(tracker.velocity(), Vec2::ZERO);
        tracker.add(0.0, Vec2::new(10.0, 10.0));
        assert_eq!(tracker.velocity(), Vec2::ZERO);
        tracker.add(0.0625, Vec2::new(20.0, 5.0));
        assert_eq!(tracker.velocity(), Vec2::new(160.0, -80.0));
    }

    #[test]
    fn velocity_forgets_old_samples() {
        let mut tracker = VelocityTracker::default();
        tracker.add(0.0, Vec2::ZERO);
        tracker.add(1.0, Vec2::new(100.0, 0.0));
        // 只剩最近一个采样
        assert_eq!(tracker.velocity(), Vec2::ZERO);
        tracker.add(1.0625, Vec2::new(110.0, 0.0));
        assert_eq!(tracker.velocity(), Vec2::new(160.0, 0.0));
    }

    #[test]
    fn small_moves_stay_below_slop() {
        let mut pan = PanRecognizer::default();
        pan.press(Vec2::new(50.0, 50.0), 0.0);
        assert!(pan.moved(Vec2::new(53.0, 54.0), 0.01).is_empty());
        assert!(!pan.is_panning());
        // 没开始就松手：什么都不上报，之后的移动也不再产生手势
        assert!(pan.release(Vec2::new(53.0, 54.0), 0.02).is_empty());
        assert!(pan.moved(Vec2::new(90.0, 54.0), 0.03).is_empty());
    }

    #[test]
    fn pan_reports_began_at_press_point_then_deltas() {
        let mut pan = PanRecognizer::default();
        pan.press(Vec2::new(50.0, 50.0), 0.0);

        let first = pan.moved(Vec2::new(60.0, 50.0), 0.02);
        assert_eq!(
            first,
            vec![
                PanGesture::Began {
                    location: Vec2::new(50.0, 50.0)
                },
                PanGesture::Changed {
                    translation: Vec2::new(10.0, 0.0)
                },
            ]
        );

        let second = pan.moved(Vec2::new(65.0, 47.0), 0.04);
        assert_eq!(
            second,
            vec![PanGesture::Changed {
                translation: Vec2::new(5.0, -3.0)
            }]
        );
        assert!(pan.moved(Vec2::new(65.0, 47.0), 0.05).is_empty());
    }

    #[test]
    fn release_reports_final_delta_and_velocity() {
        let mut pan = PanRecognizer::default();
        pan.press(Vec2::new(0.0, 0.0), 0.0);
        pan.moved(Vec2::new(20.0, 0.0), 0.03125);
        let out = pan.release(Vec2::new(40.0, 0.0), 0.0625);

        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0],
            PanGesture::Changed {
                translation: Vec2::new(20.0, 0.0)
            }
        );
        assert_eq!(
            out[1],
            PanGesture::Ended {
                velocity: Vec2::new(640.0, 0.0)
            }
        );
        assert!(!pan.is_panning());
    }

    #[test]
    fn cancel_only_ends_a_started_pan() {
        let mut pan = PanRecognizer::default();
        assert_eq!(pan.cancel(), None);

        pan.press(Vec2::ZERO, 0.0);
        assert_eq!(pan.cancel(), None);

        pan.press(Vec2::ZERO, 0.0);
        pan.moved(Vec2::new(0.0, 30.0), 0.01);
        assert_eq!(
            pan.cancel(),
            Some(PanGesture::Ended {
                velocity: Vec2::ZERO
            })
        );
        assert!(pan.moved(Vec2::new(0.0, 60.0), 0.02).is_empty());
    }
}
