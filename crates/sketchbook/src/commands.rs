use std::path::Path;

use anyhow::{anyhow, Context, Result};
use artworks::{HeadlessBackend, Point, SketchRoutine};
use gallery::{InstanceManager, Registry};
use serde::Serialize;

use crate::cli::{ListArgs, RenderArgs};
use crate::paths::AppPaths;

#[derive(Debug, Serialize)]
struct ListedArtwork<'a> {
    index: usize,
    id: &'a str,
    title: &'a str,
    description: &'a str,
    placeholder: bool,
}

pub fn list(registry: &Registry<SketchRoutine>, args: &ListArgs) -> Result<()> {
    let entries: Vec<ListedArtwork<'_>> = registry
        .iter()
        .enumerate()
        .filter(|(_, descriptor)| args.all || !descriptor.is_placeholder())
        .map(|(index, descriptor)| ListedArtwork {
            index,
            id: descriptor.id(),
            title: descriptor.title(),
            description: descriptor.description(),
            placeholder: descriptor.is_placeholder(),
        })
        .collect();

    if args.json {
        let json = serde_json::to_string_pretty(&entries).context("failed to encode artwork list")?;
        println!("{json}");
        return Ok(());
    }

    for entry in &entries {
        let marker = if entry.placeholder { "  (coming soon)" } else { "" };
        println!("{:>2}. {:<12} {}{marker}", entry.index + 1, entry.id, entry.title);
    }
    Ok(())
}

pub fn render(registry: &Registry<SketchRoutine>, args: &RenderArgs) -> Result<()> {
    let descriptor = registry
        .find(&args.artwork)
        .ok_or_else(|| anyhow!("unknown artwork '{}'; run `sketchbook list`", args.artwork))?;

    let backend = HeadlessBackend::new(args.width).context("failed to allocate off-screen canvas")?;
    let mut manager = InstanceManager::new(backend);
    manager
        .recreate(descriptor)
        .with_context(|| format!("failed to create artwork '{}'", descriptor.id()))?;

    let (x, y) = args.pointer;
    let (backend, live) = manager.parts_mut();
    let instance = live.context("artwork instance missing after creation")?;
    backend.render(instance, args.frames, Point::new(x, y));
    let caption = instance.caption();

    let canvas = backend.stage().canvas();
    canvas
        .save_png(&args.out)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    tracing::info!(
        artwork = descriptor.id(),
        frames = args.frames,
        width = canvas.width(),
        height = canvas.height(),
        caption = caption.as_deref().unwrap_or(""),
        "rendered artwork"
    );
    println!("{}", args.out.display());
    Ok(())
}

pub fn print_where(paths: &AppPaths, config_override: Option<&Path>) -> Result<()> {
    let config_file = config_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths.config_file());
    let status = if config_file.exists() { "present" } else { "missing, using defaults" };
    println!("config dir:  {}", paths.config_dir().display());
    println!("config file: {} ({status})", config_file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use artworks::catalog;

    #[test]
    fn render_writes_png_of_the_canvas_size() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("circle.png");
        let args = RenderArgs {
            artwork: "circle".into(),
            out: out.clone(),
            frames: 3,
            pointer: (350.0, 250.0),
            width: 400,
        };
        render(&catalog().unwrap(), &args).unwrap();

        let bytes = std::fs::read(&out).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        // Width and height live in the IHDR chunk.
        assert_eq!(u32::from_be_bytes(bytes[16..20].try_into().unwrap()), 700);
        assert_eq!(u32::from_be_bytes(bytes[20..24].try_into().unwrap()), 500);
    }

    #[test]
    fn render_rejects_unknown_ids() {
        let dir = tempfile::tempdir().unwrap();
        let args = RenderArgs {
            artwork: "teapot".into(),
            out: dir.path().join("teapot.png"),
            frames: 1,
            pointer: (0.0, 0.0),
            width: 400,
        };
        let err = render(&catalog().unwrap(), &args).unwrap_err();
        assert!(err.to_string().contains("run `sketchbook list`"));
        assert!(!dir.path().join("teapot.png").exists());
    }
}
