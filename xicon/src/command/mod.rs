use crate::task::TaskRunner;
use anyhow::Result;
use appicon::{Config, Contents, Font, GlyphPainter, Progress, Render, Scaler, IOS_APP_ICONS};

mod doctor;

pub use doctor::doctor;

pub fn draw(config: &Config, verbose: bool) -> Result<()> {
    let color = config.brand_color()?;
    let glyph = config.glyph()?;
    appicon::ensure_out_dir(config.out_dir())?;
    let painter = GlyphPainter::new(color, glyph, Font::resolve(config.font()));
    log::info!("drawing {:?} with {}", painter.glyph(), painter.font());
    let mut runner = TaskRunner::new(num_tasks(config, 0), verbose);
    write_icons(&painter, config, &mut runner)
}

pub fn resize(config: &Config, verbose: bool) -> Result<()> {
    let mut runner = TaskRunner::new(num_tasks(config, 1), verbose);
    runner.start_task(format!("Loading {}", config.source().display()));
    let scaler = Scaler::open(config.source())?;
    runner.end_task();
    appicon::ensure_out_dir(config.out_dir())?;
    write_icons(&scaler, config, &mut runner)
}

pub fn list() {
    for spec in &IOS_APP_ICONS {
        println!("{:>6}  {}", format!("{}px", spec.size), spec.filename);
    }
}

fn num_tasks(config: &Config, extra: u32) -> u32 {
    IOS_APP_ICONS.len() as u32 + u32::from(config.manifest) + extra
}

fn write_icons(renderer: &dyn Render, config: &Config, runner: &mut TaskRunner) -> Result<()> {
    let out_dir = config.out_dir();
    appicon::generate_with(renderer, out_dir, &IOS_APP_ICONS, |progress| match progress {
        Progress::Writing(spec) => runner.start_task(format!("Writing {}", spec.filename)),
        Progress::Written(_) => runner.end_task(),
    })?;
    if config.manifest {
        runner.start_task(format!("Writing {}", appicon::manifest::CONTENTS_JSON));
        Contents::new(&IOS_APP_ICONS)?.write(out_dir)?;
        runner.end_task();
    }
    Ok(())
}
