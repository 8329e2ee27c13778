//! Icons at points of interest and area label points

use super::BuildContext;
use crate::graphics::Bitmap;
use crate::model::{PointOfInterest, Rectangle, Way};
use crate::render::{RenderCallback, RenderContext, SymbolPlacement};
use crate::theme::attributes::{attributes, BitmapAttributes};
use crate::theme::placement::compute_boundary;
use crate::theme::resource::LazyBitmap;
use crate::theme::{Display, Position, ThemeError};
use std::sync::{Arc, OnceLock};

/// An icon. Captions may reference it by `id` to place their text
/// around it.
#[derive(Debug)]
pub struct Symbol {
    name: String,
    category: Option<String>,
    level: usize,
    id: Option<String>,
    display: Display,
    priority: i32,
    position: Position,
    bitmap: LazyBitmap,
    boundary: OnceLock<Rectangle>,
}

impl Symbol {
    pub(crate) fn build(
        name: &str,
        properties: &ini::Properties,
        ctx: &BuildContext<'_>,
        level: usize,
    ) -> Result<Self, ThemeError> {
        let scale_factor = ctx.display_model.scale_factor();
        let mut category = None;
        let mut id = None;
        let mut display = Display::default();
        let mut priority = 0;
        let mut position = Position::Center;
        let mut bitmap = BitmapAttributes::default();

        for attr in attributes(name, properties) {
            if bitmap.accept(&attr, scale_factor)? {
                continue;
            }
            match attr.name {
                "cat" => category = Some(attr.string()),
                "id" => id = Some(attr.string()),
                "display" => display = attr.keyword()?,
                "priority" => priority = attr.i32()?,
                "position" => position = attr.keyword()?,
                _ => return Err(attr.unknown()),
            }
        }

        let spec = bitmap
            .spec(ctx.display_model)
            .ok_or_else(|| ThemeError::MissingAttribute {
                element: name.to_string(),
                name: "src".to_string(),
            })?;

        Ok(Self {
            name: name.to_string(),
            category,
            level,
            id,
            display,
            priority,
            position,
            bitmap: LazyBitmap::new(spec, Arc::clone(ctx.factory)),
            boundary: OnceLock::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn resource(&self) -> &LazyBitmap {
        &self.bitmap
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The decoded icon, loading it on first use.
    pub fn bitmap(&self) -> Option<Arc<dyn Bitmap>> {
        self.bitmap.get()
    }

    /// Icon extent relative to the anchor point.
    ///
    /// Computed once from the decoded icon; `None` if the icon cannot be
    /// loaded.
    pub fn boundary(&self) -> Option<Rectangle> {
        if let Some(boundary) = self.boundary.get() {
            return Some(*boundary);
        }
        let bitmap = self.bitmap.get()?;
        Some(*self.boundary.get_or_init(|| {
            compute_boundary(bitmap.width() as f64, bitmap.height() as f64, self.position)
        }))
    }

    fn placement(&self) -> Option<SymbolPlacement> {
        if self.display == Display::Never {
            return None;
        }
        Some(SymbolPlacement {
            display: self.display,
            priority: self.priority,
            bitmap: self.bitmap.get()?,
        })
    }

    pub fn render_node(
        &self,
        callback: &mut dyn RenderCallback,
        context: &RenderContext,
        poi: &PointOfInterest,
    ) {
        if let Some(placement) = self.placement() {
            callback.render_poi_symbol(context, &placement, poi);
        }
    }

    pub fn render_way(&self, callback: &mut dyn RenderCallback, context: &RenderContext, way: &Way) {
        if let Some(placement) = self.placement() {
            callback.render_area_symbol(context, &placement, way);
        }
    }

    pub fn scale_stroke_width(&self, _scale_factor: f32, _zoom: u8) {}

    pub fn scale_text_size(&self, _scale_factor: f32, _zoom: u8) {}

    pub fn destroy(&self) {
        self.bitmap.release();
    }
}
