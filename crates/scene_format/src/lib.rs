#![forbid(unsafe_code)]

//! 场景配置文件（RON）：窗口、背景、精灵列表、动画参数。
//!
//! 每一段都有默认值，文件里可以只写想改的字段。

use serde::{Deserialize, Serialize};

use scene_core::{MotionSettings, SceneLayout, Vec2};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WindowSection {
    pub title: String,
    /// 视口尺寸（逻辑像素），也是场景尺寸。
    pub size: (f32, f32),
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: "Drag & Drop".to_string(),
            size: (480.0, 800.0),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BackgroundSection {
    /// 相对 assets 目录的图片路径。
    pub image: String,
    /// 图片加载完成前使用的尺寸（加载失败时也用它画占位色块）。
    pub fallback_size: (f32, f32),
}

impl Default for BackgroundSection {
    fn default() -> Self {
        Self {
            image: "blue-shooting-stars.png".to_string(),
            fallback_size: (1600.0, 800.0),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SpriteSection {
    pub images: Vec<String>,
    pub fallback_size: (f32, f32),
}

impl Default for SpriteSection {
    fn default() -> Self {
        Self {
            images: ["bird.png", "cat.png", "dog.png", "turtle.png"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fallback_size: (96.0, 96.0),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MotionSection {
    pub scroll_duration: f32,
    pub settle_duration: f32,
    pub wobble_degrees: f32,
    pub wobble_step: f32,
}

impl Default for MotionSection {
    fn default() -> Self {
        let motion = MotionSettings::default();
        Self {
            scroll_duration: motion.scroll_duration,
            settle_duration: motion.settle_duration,
            wobble_degrees: motion.wobble_degrees,
            wobble_step: motion.wobble_step,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowSection,
    pub background: BackgroundSection,
    pub sprites: SpriteSection,
    pub motion: MotionSection,
    /// 右下角显示 FPS / 节点数 / 当前选中节点。
    pub show_stats: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowSection::default(),
            background: BackgroundSection::default(),
            sprites: SpriteSection::default(),
            motion: MotionSection::default(),
            show_stats: true,
        }
    }
}

fn vec2(size: (f32, f32)) -> Vec2 {
    Vec2::new(size.0, size.1)
}

fn check_size(field: &str, size: (f32, f32)) -> Result<(), String> {
    if size.0.is_finite() && size.1.is_finite() && size.0 > 0.0 && size.1 > 0.0 {
        Ok(())
    } else {
        Err(format!("{field} must be positive, got {:?}", size))
    }
}

fn check_duration(field: &str, seconds: f32) -> Result<(), String> {
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(())
    } else {
        Err(format!("{field} must be a non-negative number of seconds, got {seconds}"))
    }
}

impl SceneConfig {
    pub fn viewport(&self) -> Vec2 {
        vec2(self.window.size)
    }

    pub fn layout(&self) -> SceneLayout {
        SceneLayout {
            background_image: self.background.image.clone(),
            background_size: vec2(self.background.fallback_size),
            sprite_images: self.sprites.images.clone(),
            sprite_size: vec2(self.sprites.fallback_size),
        }
    }

    pub fn motion(&self) -> MotionSettings {
        MotionSettings {
            scroll_duration: self.motion.scroll_duration,
            settle_duration: self.motion.settle_duration,
            wobble_degrees: self.motion.wobble_degrees,
            wobble_step: self.motion.wobble_step,
            ..MotionSettings::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        check_size("window.size", self.window.size)?;
        check_size("background.fallback_size", self.background.fallback_size)?;
        check_size("sprites.fallback_size", self.sprites.fallback_size)?;
        check_duration("motion.scroll_duration", self.motion.scroll_duration)?;
        check_duration("motion.settle_duration", self.motion.settle_duration)?;
        check_duration("motion.wobble_step", self.motion.wobble_step)?;
        if !self.motion.wobble_degrees.is_finite() {
            return Err("motion.wobble_degrees must be finite".to_string());
        }
        if self.background.image.trim().is_empty() {
            return Err("background.image is empty".to_string());
        }
        if let Some(i) = self.sprites.images.iter().position(|s| s.trim().is_empty()) {
            return Err(format!("sprites.images[{i}] is empty"));
        }
        Ok(())
    }
}

pub fn encode_scene_config(config: &SceneConfig) -> Result<String, String> {
    ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default()).map_err(|e| e.to_string())
}

/// 解析并校验配置文本。
pub fn decode_scene_config(text: &str) -> Result<SceneConfig, String> {
    let config = ron::from_str::<SceneConfig>(text).map_err(|e| e.to_string())?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_survive_encoding() {
        let config = SceneConfig::default();
        let text = encode_scene_config(&config).expect("encode");
        assert_eq!(decode_scene_config(&text).expect("decode"), config);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = decode_scene_config("(motion: (scroll_duration: 0.5), show_stats: false)")
            .expect("decode");
        assert_eq!(config.motion.scroll_duration, 0.5);
        assert_eq!(config.motion.wobble_degrees, 4.0);
        assert!(!config.show_stats);
        assert_eq!(config.sprites.images.len(), 4);
        assert_eq!(config.background.image, "blue-shooting-stars.png");
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(decode_scene_config("()").expect("decode"), SceneConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = decode_scene_config("(window: (size: (0.0, 800.0)))").unwrap_err();
        assert!(err.contains("window.size"), "{err}");

        let err = decode_scene_config("(motion: (scroll_duration: -1.0))").unwrap_err();
        assert!(err.contains("motion.scroll_duration"), "{err}");

        let err = decode_scene_config(r#"(sprites: (images: ["bird.png", " "]))"#).unwrap_err();
        assert!(err.contains("sprites.images[1]"), "{err}");

        assert!(decode_scene_config("(window: ").is_err());
    }

    #[test]
    fn converts_into_core_types() {
        let config = SceneConfig::default();
        let layout = config.layout();
        assert_eq!(layout.sprite_images, config.sprites.images);
        assert_eq!(layout.background_size, Vec2::new(1600.0, 800.0));
        assert_eq!(config.viewport(), Vec2::new(480.0, 800.0));
        assert_eq!(config.motion(), MotionSettings::default());
    }

    #[test]
    fn no_sprites_is_allowed() {
        let config = decode_scene_config("(sprites: (images: []))").expect("decode");
        assert!(config.layout().sprite_images.is_empty());
    }
}
