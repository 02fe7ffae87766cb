pub mod composite;
pub mod driver;
pub mod ffmpeg;
