#![forbid(unsafe_code)]

mod scene;

pub use scene::run;
