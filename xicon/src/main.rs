use anyhow::Result;
use appicon::config::CONFIG_FILE;
use appicon::Config;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

mod command;
mod task;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the optional config file
    #[clap(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,
    /// Print every step as it starts
    #[clap(short, long, global = true)]
    verbose: bool,
    #[clap(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
    tracing_log::LogTracer::init().ok();
    let env = std::env::var("XICON_LOG").unwrap_or_else(|_| "error".into());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_span_events(FmtSpan::ACTIVE | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    log_panics::init();
    let args = Args::parse();
    let config = Config::parse(&args.config)?;
    args.command.run(config, args.verbose)
}

#[derive(ClapArgs, Debug)]
struct OutputArgs {
    /// Asset catalog directory the icons are written to
    #[clap(long)]
    out_dir: Option<PathBuf>,
    /// Also write the asset catalog Contents.json
    #[clap(long)]
    manifest: bool,
}

impl OutputArgs {
    fn merge(&self, config: &mut Config) {
        if let Some(out_dir) = &self.out_dir {
            config.out_dir = Some(out_dir.clone());
        }
        config.manifest |= self.manifest;
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a letter glyph on the brand color for every icon size
    Draw {
        /// Fill color as #rrggbb
        #[clap(long)]
        color: Option<String>,
        /// Character drawn in the center
        #[clap(long)]
        glyph: Option<String>,
        /// TrueType/OpenType font file to draw the glyph with
        #[clap(long)]
        font: Option<PathBuf>,
        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Resize the source logo to every icon size
    Resize {
        /// Source logo image
        #[clap(long)]
        source: Option<PathBuf>,
        #[clap(flatten)]
        output: OutputArgs,
    },
    /// List the icon sizes and filenames
    List,
    /// Show which inputs and fonts resolve
    Doctor,
}

impl Commands {
    /// Flags given on the command line take precedence over the config file.
    fn merge(&self, config: &mut Config) {
        match self {
            Self::Draw {
                color,
                glyph,
                font,
                output,
            } => {
                if color.is_some() {
                    config.brand_color = color.clone();
                }
                if glyph.is_some() {
                    config.glyph = glyph.clone();
                }
                if font.is_some() {
                    config.font = font.clone();
                }
                output.merge(config);
            }
            Self::Resize { source, output } => {
                if source.is_some() {
                    config.source = source.clone();
                }
                output.merge(config);
            }
            Self::List | Self::Doctor => {}
        }
    }

    pub fn run(self, mut config: Config, verbose: bool) -> Result<()> {
        self.merge(&mut config);
        match self {
            Self::Draw { .. } => command::draw(&config, verbose)?,
            Self::Resize { .. } => command::resize(&config, verbose)?,
            Self::List => command::list(),
            Self::Doctor => command::doctor(&config),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn merged(argv: &[&str], mut config: Config) -> Config {
        let args = Args::try_parse_from(argv).unwrap();
        args.command.merge(&mut config);
        config
    }

    fn from_file() -> Config {
        Config {
            source: Some("assets/logo.png".into()),
            out_dir: Some("ios/AppIcon.appiconset".into()),
            brand_color: Some("#6366f1".into()),
            glyph: Some("K".into()),
            font: Some("fonts/Inter-Bold.ttf".into()),
            manifest: false,
        }
    }

    #[test]
    fn draw_flags_override_config() {
        let config = merged(
            &[
                "xicon", "draw", "--color", "#ffffff", "--glyph", "Q", "--out-dir", "out",
                "--manifest",
            ],
            from_file(),
        );
        assert_eq!(config.brand_color.as_deref(), Some("#ffffff"));
        assert_eq!(config.glyph.as_deref(), Some("Q"));
        assert_eq!(config.out_dir(), Path::new("out"));
        assert!(config.manifest);
        assert_eq!(config.font(), Some(Path::new("fonts/Inter-Bold.ttf")));
        assert_eq!(config.source(), Path::new("assets/logo.png"));
    }

    #[test]
    fn missing_flags_keep_config() {
        let config = merged(&["xicon", "draw"], from_file());
        assert_eq!(config.brand_color.as_deref(), Some("#6366f1"));
        assert_eq!(config.glyph.as_deref(), Some("K"));
        assert_eq!(config.out_dir(), Path::new("ios/AppIcon.appiconset"));
        assert!(!config.manifest);
    }

    #[test]
    fn manifest_from_config_is_not_cleared() {
        let mut config = from_file();
        config.manifest = true;
        let config = merged(&["xicon", "resize", "--source", "logo.png"], config);
        assert!(config.manifest);
        assert_eq!(config.source(), Path::new("logo.png"));
        assert_eq!(config.brand_color.as_deref(), Some("#6366f1"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["xicon", "resize", "--config", "other.toml", "-v"]).unwrap();
        assert_eq!(args.config, Path::new("other.toml"));
        assert!(args.verbose);
        let args = Args::try_parse_from(["xicon", "list"]).unwrap();
        assert_eq!(args.config, Path::new(CONFIG_FILE));
    }
}
