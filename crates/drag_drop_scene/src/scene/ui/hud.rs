//! 右下角统计信息：FPS、节点数、当前选中。

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::scene::types::{HudText, SceneSettings, SceneState};
use crate::scene::world::node_label;
use crate::scene::{HUD_FONT_SIZE, HUD_TEXT};

pub fn setup_hud(mut commands: Commands, settings: Res<SceneSettings>) {
    let visibility = if settings.config.show_stats {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(HUD_TEXT),
        Node {
            position_type: PositionType::Absolute,
            right: px(8),
            bottom: px(8),
            ..default()
        },
        visibility,
        HudText,
    ));
}

fn hud_message(fps: Option<f64>, node_count: usize, selected: &str) -> String {
    let fps = fps.map_or_else(|| "--".to_string(), |v| format!("{v:.0}"));
    format!("{fps} fps\nnodes: {node_count}\nselected: {selected}")
}

pub fn update_hud_text(
    settings: Res<SceneSettings>,
    diagnostics: Res<DiagnosticsStore>,
    scene: Res<SceneState>,
    mut hud_q: Query<&mut Text, With<HudText>>,
) {
    if !settings.config.show_stats {
        return;
    }
    let Ok(mut text) = hud_q.single_mut() else {
        return;
    };

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed());
    let nodes = scene.controller.nodes();
    let selected = scene
        .controller
        .selection()
        .map_or_else(|| "-".to_string(), |id| node_label(nodes, id));

    let msg = hud_message(fps, nodes.node_count(), &selected);
    if text.0 != msg {
        text.0 = msg;
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::scene::persistence::ConfigSource;
    use scene_format::SceneConfig;

    fn spawn_hud(show_stats: bool) -> (Node, Visibility) {
        let mut config = SceneConfig::default();
        config.show_stats = show_stats;
        let mut app = App::new();
        app.insert_resource(SceneSettings {
            config,
            path: PathBuf::from("scene.ron"),
            source: ConfigSource::Loaded,
        })
        .add_systems(Startup, setup_hud);
        app.update();

        let world = app.world_mut();
        let mut q = world.query_filtered::<(&Node, &Visibility), With<HudText>>();
        let (node, visibility) = q.single(world).expect("one hud entity");
        (node.clone(), *visibility)
    }

    #[test]
    fn hud_sits_in_the_bottom_right_corner() {
        let (node, visibility) = spawn_hud(true);
        assert_eq!(node.position_type, PositionType::Absolute);
        assert_eq!(node.right, px(8));
        assert_eq!(node.bottom, px(8));
        assert_eq!(node.left, Val::Auto);
        assert_eq!(node.top, Val::Auto);
        assert_eq!(visibility, Visibility::Inherited);

        let (_, hidden) = spawn_hud(false);
        assert_eq!(hidden, Visibility::Hidden);
    }

    #[test]
    fn hud_message_formats_stats() {
        assert_eq!(
            hud_message(Some(59.6), 5, "cat.png"),
            "60 fps\nnodes: 5\nselected: cat.png"
        );
        assert_eq!(hud_message(None, 1, "-"), "-- fps\nnodes: 1\nselected: -");
    }
}
