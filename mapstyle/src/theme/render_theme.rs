//! Loaded render themes

use super::instruction::RenderInstruction;
use super::parser::{self, ThemeSettings};
use super::{TextKeyRegistry, ThemeError};
use crate::display::DisplayModel;
use crate::graphics::{Color, GraphicFactory};
use crate::mercator::MAX_ZOOM;
use crate::model::{PointOfInterest, Way};
use crate::render::{RenderCallback, RenderContext};
use ini::Ini;
use std::collections::HashSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::Arc;

/// Zoom level from which strokes start to grow.
const STROKE_INCREASE_START: u8 = 12;

/// Stroke growth per zoom level above [`STROKE_INCREASE_START`].
const STROKE_INCREASE: f32 = 1.5;

/// A parsed render theme: its settings, instructions and the text-key table
/// they share.
///
/// Instructions are shared read-only by render threads once
/// [`prepare`](Self::prepare) has run.
pub struct RenderTheme {
    settings: ThemeSettings,
    instructions: Vec<RenderInstruction>,
    text_keys: TextKeyRegistry,
    display_model: DisplayModel,
}

impl RenderTheme {
    /// Loads a theme file.
    pub fn load_from(
        path: &Path,
        factory: Arc<dyn GraphicFactory>,
        display_model: DisplayModel,
    ) -> Result<Self, ThemeError> {
        tracing::debug!(path = %path.display(), "Loading render theme");
        let ini = Ini::load_from_file(path)?;
        Self::from_ini(&ini, factory, display_model)
    }

    /// Parses a theme from INI text.
    pub fn from_ini_str(
        text: &str,
        factory: Arc<dyn GraphicFactory>,
        display_model: DisplayModel,
    ) -> Result<Self, ThemeError> {
        let ini = Ini::load_from_str(text)?;
        Self::from_ini(&ini, factory, display_model)
    }

    pub fn from_ini(
        ini: &Ini,
        factory: Arc<dyn GraphicFactory>,
        display_model: DisplayModel,
    ) -> Result<Self, ThemeError> {
        let text_keys = TextKeyRegistry::new();
        let parsed = parser::parse(ini, &factory, &display_model, &text_keys)?;

        tracing::info!(
            instructions = parsed.instructions.len(),
            text_keys = text_keys.len(),
            scale_factor = display_model.scale_factor(),
            "Render theme loaded"
        );

        Ok(Self {
            settings: parsed.settings,
            instructions: parsed.instructions,
            text_keys,
            display_model,
        })
    }

    pub fn instructions(&self) -> &[RenderInstruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<RenderInstruction> {
        self.instructions
    }

    /// Instructions enabled for `categories`. Instructions without a
    /// category are always enabled.
    pub fn instructions_in<'a>(
        &'a self,
        categories: &'a HashSet<String>,
    ) -> impl Iterator<Item = &'a RenderInstruction> + 'a {
        self.instructions
            .iter()
            .filter(move |i| i.category().map_or(true, |cat| categories.contains(cat)))
    }

    /// Number of drawing levels used by the theme.
    pub fn levels(&self) -> usize {
        self.instructions.len()
    }

    pub fn text_keys(&self) -> &TextKeyRegistry {
        &self.text_keys
    }

    pub fn display_model(&self) -> &DisplayModel {
        &self.display_model
    }

    pub fn map_background(&self) -> Color {
        self.settings.map_background
    }

    pub fn base_stroke_width(&self) -> f32 {
        self.settings.base_stroke_width
    }

    pub fn base_text_size(&self) -> f32 {
        self.settings.base_text_size
    }

    /// Stroke scale factor used for `zoom`.
    pub fn stroke_factor(&self, zoom: u8) -> f32 {
        let steps = zoom.saturating_sub(STROKE_INCREASE_START) as i32;
        self.settings.base_stroke_width * STROKE_INCREASE.powi(steps)
    }

    /// Scales every instruction's stroke-related values for `zoom`.
    pub fn scale_stroke_width(&self, scale_factor: f32, zoom: u8) {
        for instruction in &self.instructions {
            instruction.scale_stroke_width(scale_factor, zoom);
        }
    }

    /// Scales every instruction's text sizes for `zoom`.
    pub fn scale_text_size(&self, scale_factor: f32, zoom: u8) {
        for instruction in &self.instructions {
            instruction.scale_text_size(scale_factor, zoom);
        }
    }

    /// Derives the per-zoom paints of every instruction.
    ///
    /// Must run before rendering starts, single-threaded. Zoom levels above
    /// the supported maximum are ignored.
    pub fn prepare(&self, text_scale: f32, zooms: RangeInclusive<u8>) {
        let start = *zooms.start();
        let end = (*zooms.end()).min(MAX_ZOOM);
        let text_factor = self.settings.base_text_size * text_scale;
        for zoom in start..=end {
            self.scale_stroke_width(self.stroke_factor(zoom), zoom);
            self.scale_text_size(text_factor, zoom);
        }
        tracing::debug!(from = start, to = end, text_factor, "Render theme prepared");
    }

    /// Applies every instruction to a point of interest.
    pub fn render_node(
        &self,
        callback: &mut dyn RenderCallback,
        context: &RenderContext,
        poi: &PointOfInterest,
    ) {
        for instruction in &self.instructions {
            instruction.render_node(callback, context, poi);
        }
    }

    /// Applies every instruction to a way.
    pub fn render_way(&self, callback: &mut dyn RenderCallback, context: &RenderContext, way: &Way) {
        for instruction in &self.instructions {
            instruction.render_way(callback, context, way);
        }
    }

    /// Emits the hillshading of every hillshading layer for the context's
    /// tile.
    pub fn render_hillshading(&self, callback: &mut dyn RenderCallback, context: &RenderContext) {
        for instruction in &self.instructions {
            if let RenderInstruction::Hillshading(hillshading) = instruction {
                hillshading.render_tile(callback, context);
            }
        }
    }

    /// Decodes every bitmap resource now.
    ///
    /// Returns the sources that could not be decoded.
    pub fn load_resources(&self) -> Vec<String> {
        let mut failed = Vec::new();
        let mut total = 0;
        for instruction in &self.instructions {
            for resource in instruction.resources() {
                total += 1;
                if resource.get().is_none() {
                    failed.push(resource.spec().src.clone());
                }
            }
        }
        tracing::debug!(total, failed = failed.len(), "Loaded theme resources");
        failed
    }

    /// Releases bitmap resources and the text-key table.
    pub fn destroy(&self) {
        for instruction in &self.instructions {
            instruction.destroy();
        }
        self.text_keys.clear();
        tracing::debug!("Render theme destroyed");
    }
}

impl fmt::Debug for RenderTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderTheme")
            .field("settings", &self.settings)
            .field("instructions", &self.instructions.len())
            .field("text_keys", &self.text_keys.len())
            .finish()
    }
}
