//! Per-tile render state

use crate::hills::HillsRenderConfig;
use crate::model::Tile;
use std::sync::Arc;

/// State shared by all instructions while one tile is rendered.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub tile: Tile,
    pub hills: Option<Arc<HillsRenderConfig>>,
}

impl RenderContext {
    pub fn new(tile: Tile) -> Self {
        Self { tile, hills: None }
    }

    pub fn with_hills(mut self, hills: Arc<HillsRenderConfig>) -> Self {
        self.hills = Some(hills);
        self
    }

    pub fn zoom(&self) -> u8 {
        self.tile.zoom
    }
}
