//! 指针输入 → 平移手势 → 场景控制器。

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use scene_core::{PanGesture, PanRecognizer};

use crate::scene::types::{PanGestureMessage, PanInput, PointerSource, SceneState};

use super::node_label;

/// 跟踪当前触摸（只认第一根手指），返回产生的手势阶段。
fn track_touch(
    input: &mut PanInput,
    id: u64,
    touches: &Touches,
    now: f32,
) -> Vec<PanGesture> {
    if let Some(touch) = touches.get_pressed(id) {
        return input.recognizer.moved(touch.position(), now);
    }

    input.pointer = None;
    match touches.iter_just_released().find(|t| t.id() == id) {
        Some(touch) => input.recognizer.release(touch.position(), now),
        None => input.recognizer.cancel().into_iter().collect(),
    }
}

/// 跟踪鼠标左键；光标离开窗口视为手势中断。
fn track_mouse(
    recognizer: &mut PanRecognizer,
    buttons: &ButtonInput<MouseButton>,
    cursor: Option<Vec2>,
    now: f32,
) -> (Vec<PanGesture>, bool) {
    let Some(cursor) = cursor else {
        return (recognizer.cancel().into_iter().collect(), false);
    };
    if buttons.pressed(MouseButton::Left) {
        (recognizer.moved(cursor, now), true)
    } else {
        (recognizer.release(cursor, now), false)
    }
}

/// 平移手势识别：鼠标左键拖动或单指拖动。
pub fn recognize_pan_gesture(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut input: ResMut<PanInput>,
    mut gestures: MessageWriter<PanGestureMessage>,
) {
    // 运行久了 f32 秒数精度不够，速度估计改用相对按下时刻的时间
    let now = time.elapsed_secs_f64();
    let since_press = (now - input.epoch) as f32;
    let cursor = windows.single().ok().and_then(Window::cursor_position);

    let out = match input.pointer {
        Some(PointerSource::Touch(id)) => track_touch(&mut input, id, &touches, since_press),
        Some(PointerSource::Mouse) => {
            let (out, still_down) =
                track_mouse(&mut input.recognizer, &buttons, cursor, since_press);
            if !still_down {
                input.pointer = None;
            }
            out
        }
        None => {
            if let Some(touch) = touches.iter_just_pressed().next() {
                input.pointer = Some(PointerSource::Touch(touch.id()));
                input.epoch = now;
                input.recognizer.press(touch.position(), 0.0);
            } else if let Some(cursor) = cursor.filter(|_| buttons.just_pressed(MouseButton::Left)) {
                input.pointer = Some(PointerSource::Mouse);
                input.epoch = now;
                input.recognizer.press(cursor, 0.0);
            }
            Vec::new()
        }
    };

    for gesture in out {
        gestures.write(PanGestureMessage(gesture));
    }
}

/// 把手势交给场景控制器；选中节点变化或背景开始惯性滑动时记日志。
pub fn apply_pan_gestures(
    mut gestures: MessageReader<PanGestureMessage>,
    mut scene: ResMut<SceneState>,
) {
    for PanGestureMessage(gesture) in gestures.read() {
        let before = scene.controller.selection();
        if let Some(target) = scene.controller.handle_gesture(*gesture) {
            debug!("background fling: {gesture:?} target={target}");
        }

        let after = scene.controller.selection();
        if after != before {
            if let Some(id) = after {
                info!("selected: {}", node_label(scene.controller.nodes(), id));
            }
        }
    }
}
