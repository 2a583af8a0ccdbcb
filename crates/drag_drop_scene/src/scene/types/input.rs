use bevy::prelude::*;
use scene_core::{PanGesture, PanRecognizer};

/// 正在驱动手势的指针。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch(u64),
}

/// 平移手势识别状态。
#[derive(Resource, Default)]
pub struct PanInput {
    pub recognizer: PanRecognizer,
    pub pointer: Option<PointerSource>,
    /// 本次按下时的 `Time::elapsed_secs_f64`；交给识别器的时间都相对它计算。
    pub epoch: f64,
}

/// 识别出的一次平移手势阶段（视图坐标）。
#[derive(Message, Clone, Copy, Debug)]
pub struct PanGestureMessage(pub PanGesture);
