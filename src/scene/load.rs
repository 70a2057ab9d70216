use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{RicochetError, RicochetResult};
use crate::scene::directive::{FontSpec, SceneDescription, ShapeSpec};
use crate::scene::model::{Circle, Rectangle};
use crate::scene::store::{SceneLimits, SceneStore};
use crate::text::label::{BlockLabelFactory, FontLabelFactory, LabelFactory};

/// Where label textures come from when the scene itself does not decide.
#[derive(Clone, Debug, Default)]
pub enum LabelSource {
    /// Use the scene's `Font` directive, else solid blocks.
    #[default]
    SceneOrBlocks,
    /// Ignore the scene's `Font` directive and use this font.
    Font {
        /// Font file.
        path: PathBuf,
        /// Pixel size.
        size_px: f32,
        /// Label color.
        color: Rgb8,
    },
    /// Always solid blocks (no font file needed).
    Blocks(BlockLabelFactory),
}

/// Options for turning a scene description into a [`Scene`].
#[derive(Clone, Debug, Default)]
pub struct LoadOpts {
    /// Per-kind shape capacity.
    pub limits: SceneLimits,
    /// Where label textures come from.
    pub labels: LabelSource,
}

/// A loaded scene: world bounds plus every shape with its label attached.
#[derive(Clone, Debug)]
pub struct Scene {
    /// World and display bounds.
    pub canvas: Canvas,
    /// The `Font` directive, if the file had one.
    pub font: Option<FontSpec>,
    /// Every shape, in file order per kind.
    pub store: SceneStore,
}

impl Scene {
    /// Instantiate `desc`, rendering each label through `labels`.
    #[tracing::instrument(level = "debug", skip_all, fields(shapes = desc.shapes.len()))]
    pub fn build(
        desc: &SceneDescription,
        limits: SceneLimits,
        labels: &mut dyn LabelFactory,
    ) -> RicochetResult<Self> {
        let mut store = SceneStore::new(limits);
        for shape in &desc.shapes {
            match shape {
                ShapeSpec::Circle(c) => {
                    let texture = labels.render_label(&c.name)?;
                    let circle = Circle::new(&c.name, c.kinematics, c.color, c.radius, texture)?;
                    store.insert_circle(circle)?;
                }
                ShapeSpec::Rectangle(r) => {
                    let texture = labels.render_label(&r.name)?;
                    let rect = Rectangle::new(&r.name, r.kinematics, r.color, r.size, texture)?;
                    store.insert_rectangle(rect)?;
                }
            }
        }
        Ok(Self {
            canvas: desc.canvas,
            font: desc.font.clone(),
            store,
        })
    }

    /// Parse `src` and build it. Relative font paths resolve against `base_dir`.
    pub fn load_str(src: &str, base_dir: &Path, opts: &LoadOpts) -> RicochetResult<Self> {
        let desc = SceneDescription::parse(src)?;
        let mut labels = label_factory_for(&desc, base_dir, &opts.labels)?;
        let scene = Self::build(&desc, opts.limits, labels.as_mut())?;
        tracing::info!(
            width = scene.canvas.width,
            height = scene.canvas.height,
            circles = scene.store.circles().len(),
            rectangles = scene.store.rectangles().len(),
            "scene loaded"
        );
        Ok(scene)
    }

    /// Read a scene file and build it; the font path resolves against the file's directory.
    #[tracing::instrument(level = "debug", skip(opts))]
    pub fn load_path(path: &Path, opts: &LoadOpts) -> RicochetResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            RicochetError::resource(format!("failed to read scene '{}': {e}", path.display()))
        })?;
        let src = String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
            RicochetError::malformed(line, "line is not valid UTF-8")
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::load_str(&src, base_dir, opts)
    }
}

fn label_factory_for(
    desc: &SceneDescription,
    base_dir: &Path,
    source: &LabelSource,
) -> RicochetResult<Box<dyn LabelFactory>> {
    match source {
        LabelSource::Blocks(blocks) => Ok(Box::new(*blocks)),
        LabelSource::Font {
            path,
            size_px,
            color,
        } => Ok(Box::new(FontLabelFactory::from_path(path, *size_px, *color)?)),
        LabelSource::SceneOrBlocks => match &desc.font {
            Some(font) => {
                let path = base_dir.join(&font.path);
                Ok(Box::new(FontLabelFactory::from_path(
                    &path,
                    font.size_px as f32,
                    font.color,
                )?))
            }
            None => {
                tracing::warn!("scene has no Font directive, drawing block labels");
                Ok(Box::new(BlockLabelFactory::default()))
            }
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/load.rs"]
mod tests;
