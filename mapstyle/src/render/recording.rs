//! A callback that records every primitive
//!
//! Used by tests to assert on instruction output and by the CLI `inspect`
//! command to print what a theme would draw.

use super::{CaptionPlacement, RenderCallback, RenderContext, SymbolPlacement, WaySymbol, WayText};
use crate::graphics::Paint;
use crate::hills::HillshadingShape;
use crate::model::{PointOfInterest, Rectangle, Way};
use crate::theme::{Display, Position, SymbolOrientation};
use std::fmt;

/// An owned copy of a caption primitive.
#[derive(Debug, Clone)]
pub struct RecordedCaption {
    pub text: String,
    pub display: Display,
    pub priority: i32,
    pub horizontal_offset: f32,
    pub vertical_offset: f32,
    pub position: Position,
    pub fill: Paint,
    pub stroke: Paint,
    pub max_text_width: f32,
}

impl From<&CaptionPlacement<'_>> for RecordedCaption {
    fn from(caption: &CaptionPlacement<'_>) -> Self {
        Self {
            text: caption.text.to_string(),
            display: caption.display,
            priority: caption.priority,
            horizontal_offset: caption.horizontal_offset,
            vertical_offset: caption.vertical_offset,
            position: caption.position,
            fill: caption.fill.clone(),
            stroke: caption.stroke.clone(),
            max_text_width: caption.max_text_width,
        }
    }
}

/// One recorded callback invocation.
#[derive(Debug, Clone)]
pub enum RenderCall {
    Area {
        level: usize,
        fill: Paint,
        stroke: Paint,
    },
    AreaCaption(RecordedCaption),
    AreaSymbol {
        display: Display,
        priority: i32,
        width: u32,
        height: u32,
    },
    PoiCaption(RecordedCaption),
    PoiCircle {
        level: usize,
        radius: f32,
        fill: Paint,
        stroke: Paint,
    },
    PoiSymbol {
        display: Display,
        priority: i32,
        width: u32,
        height: u32,
    },
    Way {
        level: usize,
        dy: f32,
        stroke: Paint,
    },
    WaySymbol {
        display: Display,
        priority: i32,
        width: u32,
        height: u32,
        dy: f32,
        boundary: Rectangle,
        repeat: bool,
        repeat_gap: f32,
        repeat_start: f32,
        rotate: bool,
        orientation: SymbolOrientation,
    },
    WayText {
        text: String,
        display: Display,
        priority: i32,
        dy: f32,
        fill: Paint,
        stroke: Paint,
        repeat: bool,
        repeat_gap: f32,
        repeat_start: f32,
        rotate: bool,
    },
    Hillshading {
        layer: i8,
        level: usize,
        shape: HillshadingShape,
    },
}

impl fmt::Display for RenderCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderCall::Area {
                level,
                fill,
                stroke,
            } => write!(
                f,
                "area        level={} fill={} stroke={} width={:.2}",
                level, fill.color, stroke.color, stroke.stroke_width
            ),
            RenderCall::AreaCaption(c) | RenderCall::PoiCaption(c) => {
                let kind = if matches!(self, RenderCall::AreaCaption(_)) {
                    "area-caption"
                } else {
                    "poi-caption"
                };
                write!(
                    f,
                    "{:<11} \"{}\" {} dx={:.2} dy={:.2} size={:.2} display={} priority={}",
                    kind,
                    c.text,
                    c.position,
                    c.horizontal_offset,
                    c.vertical_offset,
                    c.fill.text_size,
                    c.display,
                    c.priority
                )
            }
            RenderCall::AreaSymbol {
                display,
                priority,
                width,
                height,
            }
            | RenderCall::PoiSymbol {
                display,
                priority,
                width,
                height,
            } => {
                let kind = if matches!(self, RenderCall::AreaSymbol { .. }) {
                    "area-symbol"
                } else {
                    "poi-symbol"
                };
                write!(
                    f,
                    "{:<11} {}x{} display={} priority={}",
                    kind, width, height, display, priority
                )
            }
            RenderCall::PoiCircle {
                level,
                radius,
                fill,
                stroke,
            } => write!(
                f,
                "poi-circle  level={} radius={:.2} fill={} stroke={} width={:.2}",
                level, radius, fill.color, stroke.color, stroke.stroke_width
            ),
            RenderCall::Way { level, dy, stroke } => {
                write!(
                    f,
                    "way         level={} stroke={} width={:.2} dy={:.2}",
                    level, stroke.color, stroke.stroke_width, dy
                )?;
                if let Some(dash) = &stroke.dash {
                    write!(f, " dash={:?}", dash)?;
                }
                Ok(())
            }
            RenderCall::WaySymbol {
                width,
                height,
                boundary,
                repeat,
                repeat_gap,
                repeat_start,
                ..
            } => write!(
                f,
                "way-symbol  {}x{} boundary={} repeat={} gap={:.2} start={:.2}",
                width, height, boundary, repeat, repeat_gap, repeat_start
            ),
            RenderCall::WayText {
                text,
                fill,
                repeat,
                repeat_gap,
                repeat_start,
                ..
            } => write!(
                f,
                "way-text    \"{}\" size={:.2} repeat={} gap={:.2} start={:.2}",
                text, fill.text_size, repeat, repeat_gap, repeat_start
            ),
            RenderCall::Hillshading {
                layer,
                level,
                shape,
            } => write!(
                f,
                "hillshading layer={} level={} dst={} magnitude={:.3} dem={}",
                layer,
                level,
                shape.destination_rect,
                shape.magnitude,
                shape.source.is_some()
            ),
        }
    }
}

/// Records every primitive in call order.
#[derive(Debug, Default)]
pub struct RecordingCallback {
    calls: Vec<RenderCall>,
}

impl RecordingCallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Returns the recorded calls, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }
}

impl RenderCallback for RecordingCallback {
    fn render_area(
        &mut self,
        _context: &RenderContext,
        fill: &Paint,
        stroke: &Paint,
        level: usize,
        _way: &Way,
    ) {
        self.calls.push(RenderCall::Area {
            level,
            fill: fill.clone(),
            stroke: stroke.clone(),
        });
    }

    fn render_area_caption(
        &mut self,
        _context: &RenderContext,
        caption: &CaptionPlacement<'_>,
        _way: &Way,
    ) {
        self.calls.push(RenderCall::AreaCaption(caption.into()));
    }

    fn render_area_symbol(&mut self, _context: &RenderContext, symbol: &SymbolPlacement, _way: &Way) {
        self.calls.push(RenderCall::AreaSymbol {
            display: symbol.display,
            priority: symbol.priority,
            width: symbol.bitmap.width(),
            height: symbol.bitmap.height(),
        });
    }

    fn render_poi_caption(
        &mut self,
        _context: &RenderContext,
        caption: &CaptionPlacement<'_>,
        _poi: &PointOfInterest,
    ) {
        self.calls.push(RenderCall::PoiCaption(caption.into()));
    }

    fn render_poi_circle(
        &mut self,
        _context: &RenderContext,
        radius: f32,
        fill: &Paint,
        stroke: &Paint,
        level: usize,
        _poi: &PointOfInterest,
    ) {
        self.calls.push(RenderCall::PoiCircle {
            level,
            radius,
            fill: fill.clone(),
            stroke: stroke.clone(),
        });
    }

    fn render_poi_symbol(
        &mut self,
        _context: &RenderContext,
        symbol: &SymbolPlacement,
        _poi: &PointOfInterest,
    ) {
        self.calls.push(RenderCall::PoiSymbol {
            display: symbol.display,
            priority: symbol.priority,
            width: symbol.bitmap.width(),
            height: symbol.bitmap.height(),
        });
    }

    fn render_way(
        &mut self,
        _context: &RenderContext,
        stroke: &Paint,
        dy: f32,
        level: usize,
        _way: &Way,
    ) {
        self.calls.push(RenderCall::Way {
            level,
            dy,
            stroke: stroke.clone(),
        });
    }

    fn render_way_symbol(&mut self, _context: &RenderContext, symbol: &WaySymbol, _way: &Way) {
        self.calls.push(RenderCall::WaySymbol {
            display: symbol.display,
            priority: symbol.priority,
            width: symbol.bitmap.width(),
            height: symbol.bitmap.height(),
            dy: symbol.dy,
            boundary: symbol.boundary,
            repeat: symbol.repeat,
            repeat_gap: symbol.repeat_gap,
            repeat_start: symbol.repeat_start,
            rotate: symbol.rotate,
            orientation: symbol.orientation,
        });
    }

    fn render_way_text(&mut self, _context: &RenderContext, text: &WayText<'_>, _way: &Way) {
        self.calls.push(RenderCall::WayText {
            text: text.text.to_string(),
            display: text.display,
            priority: text.priority,
            dy: text.dy,
            fill: text.fill.clone(),
            stroke: text.stroke.clone(),
            repeat: text.repeat,
            repeat_gap: text.repeat_gap,
            repeat_start: text.repeat_start,
            rotate: text.rotate,
        });
    }

    fn render_hillshading(
        &mut self,
        _context: &RenderContext,
        layer: i8,
        level: usize,
        shape: &HillshadingShape,
    ) {
        self.calls.push(RenderCall::Hillshading {
            layer,
            level,
            shape: shape.clone(),
        });
    }
}
