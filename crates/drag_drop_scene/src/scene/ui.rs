//! 屏幕叠加层（HUD）。

mod hud;

pub use hud::{setup_hud, update_hud_text};
