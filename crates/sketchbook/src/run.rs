use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use artworks::{catalog, SketchRoutine};
use gallery::{Registry, SlideshowConfig, SlideshowMode};
use renderer::GalleryOptions;
use sketchconfig::SketchConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, RunArgs};
use crate::commands;
use crate::paths::AppPaths;

pub fn run(args: Cli) -> Result<()> {
    initialise_tracing();

    let registry = catalog().context("failed to build the artwork catalog")?;
    match args.command {
        Some(Command::List(list)) => commands::list(&registry, &list),
        Some(Command::Render(render)) => commands::render(&registry, &render),
        Some(Command::Where) => {
            let paths = AppPaths::discover()?;
            commands::print_where(&paths, args.run.config.as_deref())
        }
        None => run_gallery(registry, &args.run),
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_gallery(registry: Registry<SketchRoutine>, args: &RunArgs) -> Result<()> {
    let config_path = resolve_config_path(args)?;
    let config = load_config(&config_path, args.config.is_some())?;
    let options = gallery_options(&config, args, &registry)?;
    tracing::info!(
        artworks = registry.len(),
        initial = options.initial.as_deref().unwrap_or("<first>"),
        size = ?options.window_size,
        fps = ?options.target_fps,
        "opening sketch gallery"
    );
    renderer::run_gallery(registry, options)
}

fn resolve_config_path(args: &RunArgs) -> Result<PathBuf> {
    match &args.config {
        Some(path) => Ok(path.clone()),
        None => Ok(AppPaths::discover()?.config_file()),
    }
}

/// An explicitly requested file must exist; the default location may be absent.
fn load_config(path: &std::path::Path, explicit: bool) -> Result<SketchConfig> {
    let config = if explicit {
        SketchConfig::from_path(path)
    } else {
        SketchConfig::load_or_default(path)
    }
    .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    tracing::debug!(path = %path.display(), "resolved configuration");
    Ok(config)
}

/// Merges the configuration file with command-line overrides.
pub(crate) fn gallery_options(
    config: &SketchConfig,
    args: &RunArgs,
    registry: &Registry<SketchRoutine>,
) -> Result<GalleryOptions> {
    let window = &config.window;
    let window_size = args.size.unwrap_or((window.width, window.height));
    // Both sides are logical pixels; the window scales them by the same factor.
    if window.sidebar_width >= window_size.0 {
        bail!(
            "window width {} leaves no room beside the {}px sidebar",
            window_size.0,
            window.sidebar_width
        );
    }

    let initial = args
        .artwork
        .clone()
        .or_else(|| config.default_artwork().map(str::to_string));
    if let Some(id) = &initial {
        if registry.position(id).is_none() {
            bail!("unknown artwork '{id}'; run `sketchbook list`");
        }
    }

    let fps = args.fps.or(config.gallery.fps);
    if let Some(fps) = fps {
        if !fps.is_finite() || fps < 0.0 {
            bail!("fps must be >= 0 (0 means uncapped)");
        }
    }
    let target_fps = fps.filter(|fps| *fps > 0.0);

    let slideshow = slideshow_config(config, args);
    if args.shuffle && slideshow.is_none() {
        tracing::warn!("--shuffle has no effect without a slideshow interval");
    }

    Ok(GalleryOptions {
        window_size,
        sidebar_width: window.sidebar_width,
        row_height: window.row_height,
        initial,
        debounce: config.gallery.debounce,
        target_fps,
        slideshow,
        seed: seed_from_clock(),
    })
}

fn slideshow_config(config: &SketchConfig, args: &RunArgs) -> Option<SlideshowConfig> {
    let file = config.slideshow.as_ref();
    let interval = args.slideshow.or(file.map(|slideshow| slideshow.interval))?;
    let mode = if args.shuffle {
        SlideshowMode::Shuffle
    } else {
        match file.map(|slideshow| slideshow.mode) {
            Some(sketchconfig::SlideshowMode::Shuffle) => SlideshowMode::Shuffle,
            Some(sketchconfig::SlideshowMode::Continuous) | None => SlideshowMode::Continuous,
        }
    };
    Some(SlideshowConfig {
        interval,
        mode,
        include_placeholders: file.is_some_and(|slideshow| slideshow.include_placeholders),
    })
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn registry() -> Registry<SketchRoutine> {
        catalog().unwrap()
    }

    #[test]
    fn flags_override_the_config_file() {
        let config = SketchConfig::from_toml_str(
            r#"
[gallery]
default = "wave"
fps = 30

[slideshow]
interval = "45s"
include_placeholders = true
"#,
        )
        .unwrap();
        let args = RunArgs {
            artwork: Some("spiral".into()),
            size: Some((1600, 900)),
            fps: Some(0.0),
            shuffle: true,
            ..RunArgs::default()
        };

        let options = gallery_options(&config, &args, &registry()).unwrap();
        assert_eq!(options.initial.as_deref(), Some("spiral"));
        assert_eq!(options.window_size, (1600, 900));
        assert_eq!(options.target_fps, None);
        let slideshow = options.slideshow.unwrap();
        assert_eq!(slideshow.interval, Duration::from_secs(45));
        assert_eq!(slideshow.mode, SlideshowMode::Shuffle);
        assert!(slideshow.include_placeholders);
    }

    #[test]
    fn config_values_apply_without_flags() {
        let config = SketchConfig::from_toml_str("[gallery]\ndefault = \"fractal\"\nfps = 24\n").unwrap();
        let options = gallery_options(&config, &RunArgs::default(), &registry()).unwrap();
        assert_eq!(options.initial.as_deref(), Some("fractal"));
        assert_eq!(options.target_fps, Some(24.0));
        assert_eq!(options.window_size, (1280, 800));
        assert!(options.slideshow.is_none());
    }

    #[test]
    fn slideshow_flag_alone_enables_continuous_mode() {
        let args = RunArgs {
            slideshow: Some(Duration::from_secs(10)),
            ..RunArgs::default()
        };
        let options = gallery_options(&SketchConfig::default(), &args, &registry()).unwrap();
        let slideshow = options.slideshow.unwrap();
        assert_eq!(slideshow.mode, SlideshowMode::Continuous);
        assert!(!slideshow.include_placeholders);
    }

    #[test]
    fn unknown_default_artwork_is_an_error() {
        let config = SketchConfig::from_toml_str("[gallery]\ndefault = \"teapot\"\n").unwrap();
        let err = gallery_options(&config, &RunArgs::default(), &registry()).unwrap_err();
        assert!(err.to_string().contains("unknown artwork 'teapot'"));
    }

    #[test]
    fn narrow_windows_are_rejected() {
        let args = RunArgs {
            size: Some((200, 600)),
            ..RunArgs::default()
        };
        assert!(gallery_options(&SketchConfig::default(), &args, &registry()).is_err());
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(load_config(&path, true).is_err());
        assert!(load_config(&path, false).is_ok());
    }
}
