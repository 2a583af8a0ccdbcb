//! 场景配置的读取/初始化（RON）。

use std::path::Path;

use scene_format::{decode_scene_config, encode_scene_config, SceneConfig};

/// 配置从哪里来（启动后写日志用）。
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigSource {
    Loaded,
    /// 文件不存在，已写入一份默认配置。
    Created,
    /// 读取或解析失败，使用默认配置。
    Fallback(String),
}

pub fn save_scene_config_to_file(config: &SceneConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    let text = encode_scene_config(config)?;
    std::fs::write(path, text).map_err(|e| e.to_string())?;
    Ok(())
}

pub fn load_scene_config_from_file(path: &Path) -> Result<SceneConfig, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    decode_scene_config(&text)
}

/// 读取配置；文件不存在时写入默认配置，出错时退回默认配置。
pub fn load_or_init_scene_config(path: &Path) -> (SceneConfig, ConfigSource) {
    if !path.exists() {
        let config = SceneConfig::default();
        return match save_scene_config_to_file(&config, path) {
            Ok(()) => (config, ConfigSource::Created),
            Err(err) => (config, ConfigSource::Fallback(err)),
        };
    }

    match load_scene_config_from_file(path) {
        Ok(config) => (config, ConfigSource::Loaded),
        Err(err) => (SceneConfig::default(), ConfigSource::Fallback(err)),
    }
}
