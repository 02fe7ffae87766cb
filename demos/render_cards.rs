use std::sync::Arc;

use slidecast::{
    FfmpegDriver, RenderSettings, Rgb8, Slide, TransitionKind, is_ffmpeg_on_path, render_custom,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let slides = vec![
        Arc::new(Slide::color(Rgb8::from_hex("#203a56")?, 3.0)?),
        Arc::new(Slide::color(Rgb8::from_hex("#7a2030")?, 3.0)?
            .with_transition(TransitionKind::Crossfade, 1.0)?),
        Arc::new(Slide::color(Rgb8::from_hex("#2d6a4f")?, 3.0)?
            .with_transition(TransitionKind::SpinIn, 1.0)?),
    ];

    if !is_ffmpeg_on_path() {
        eprintln!("ffmpeg not found on PATH; nothing to render");
        return Ok(());
    }

    let settings = RenderSettings::new("out/cards.mp4");
    let mut driver = FfmpegDriver::default();
    let out = render_custom(&slides, None, &settings, &mut driver, None, &mut |p| {
        eprintln!("{:5.1}% eta {:?}", p.fraction * 100.0, p.eta);
    })?;
    println!("wrote {}", out.display());
    Ok(())
}
