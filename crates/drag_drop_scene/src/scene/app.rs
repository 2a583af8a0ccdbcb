//! 应用装配（Bevy App 构建与系统注册）。

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use super::{
	paths::{scene_config_path, workspace_assets_dir},
	persistence::{load_or_init_scene_config, ConfigSource},
	types::{PanGestureMessage, PanInput, SceneSettings, SceneState},
	ui,
	world,
	CLEAR_COLOR,
};

/// 配置在 App 构建前读取（窗口尺寸依赖它），日志插件此时还没初始化，所以放到 Startup 再报告。
fn report_config_source(settings: Res<SceneSettings>) {
	let path = settings.path.display();
	match &settings.source {
		ConfigSource::Loaded => info!("scene config: {path}"),
		ConfigSource::Created => info!("scene config not found, wrote defaults: {path}"),
		ConfigSource::Fallback(err) => warn!("scene config unusable ({path}): {err}; using defaults"),
	}
}

/// 运行演示场景。
pub fn run() {
	let assets_dir = workspace_assets_dir();
	let config_path = scene_config_path();
	let (config, source) = load_or_init_scene_config(&config_path);

	let viewport = config.viewport();
	let scene = SceneState::from_config(&config);

	App::new()
		.insert_resource(ClearColor(CLEAR_COLOR))
		.add_plugins(
			DefaultPlugins
				.set(AssetPlugin {
					// 用绝对路径避免 cwd 差异导致找不到资源
					file_path: assets_dir.to_string_lossy().to_string(),
					..default()
				})
				.set(WindowPlugin {
					primary_window: Some(Window {
						title: config.window.title.clone(),
						resolution: WindowResolution::new(viewport.x as u32, viewport.y as u32),
						// 场景尺寸固定为视口尺寸，不跟随窗口缩放
						resizable: false,
						..default()
					}),
					..default()
				}),
		)
		.add_plugins(FrameTimeDiagnosticsPlugin::default())
		// --- Resources ---
		.insert_resource(SceneSettings {
			config,
			path: config_path,
			source,
		})
		.insert_resource(scene)
		.init_resource::<PanInput>()
		.add_message::<PanGestureMessage>()
		.add_systems(
			Startup,
			(
				// --- Startup ---
				report_config_source,
				world::setup_camera,
				world::spawn_scene_nodes,
				ui::setup_hud,
			),
		)
		.add_systems(
			Update,
			(
				// --- World: images ---
				world::sync_node_sizes_from_images,
				world::fallback_for_failed_images,
				// --- World: gesture -> controller -> transforms ---
				world::recognize_pan_gesture,
				world::apply_pan_gestures,
				world::advance_actions,
				world::sync_node_transforms,
			)
				.chain(),
		)
		.add_systems(Update, ui::update_hud_text.after(world::sync_node_transforms))
		.run();
}
