//! Theme document to instruction list

use super::attributes::attributes;
use super::instruction::{
    Area, BuildContext, Caption, Circle, Hillshading, Line, LineSymbol, PathText,
    RenderInstruction, Symbol,
};
use super::{TextKeyRegistry, ThemeError};
use crate::display::DisplayModel;
use crate::graphics::{Color, GraphicFactory};
use ini::Ini;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Section holding theme-wide settings instead of an instruction.
const THEME_SECTION: &str = "theme";

/// Theme-wide settings from the `[theme]` section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ThemeSettings {
    pub base_stroke_width: f32,
    pub base_text_size: f32,
    pub map_background: Color,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            base_stroke_width: 1.0,
            base_text_size: 1.0,
            map_background: Color::WHITE,
        }
    }
}

/// Result of parsing a theme document.
pub(crate) struct ParsedTheme {
    pub settings: ThemeSettings,
    pub instructions: Vec<RenderInstruction>,
}

struct Section<'a> {
    name: &'a str,
    element: &'a str,
    properties: &'a ini::Properties,
}

fn element_of(section: &str) -> &str {
    section
        .split_once('.')
        .map_or(section, |(element, _)| element)
        .trim()
}

fn is_instruction_element(element: &str) -> bool {
    matches!(
        element,
        "area" | "caption" | "circle" | "hillshading" | "line" | "line-symbol" | "path-text" | "symbol"
    )
}

fn parse_settings(properties: &ini::Properties) -> Result<ThemeSettings, ThemeError> {
    let mut settings = ThemeSettings::default();
    for attr in attributes(THEME_SECTION, properties) {
        match attr.name {
            "base-stroke-width" => settings.base_stroke_width = attr.non_negative_f32()?,
            "base-text-size" => settings.base_text_size = attr.non_negative_f32()?,
            "map-background" => settings.map_background = attr.color()?,
            _ => return Err(attr.unknown()),
        }
    }
    Ok(settings)
}

/// Validates section layout and splits theme settings from instructions.
fn collect_sections(ini: &Ini) -> Result<(ThemeSettings, Vec<Section<'_>>), ThemeError> {
    let mut settings = ThemeSettings::default();
    let mut seen = HashSet::new();
    let mut sections = Vec::new();

    for (name, properties) in ini.iter() {
        let Some(name) = name else {
            if let Some((key, _)) = properties.iter().next() {
                return Err(ThemeError::AttributeOutsideSection(key.to_string()));
            }
            continue;
        };
        if !seen.insert(name) {
            return Err(ThemeError::DuplicateSection(name.to_string()));
        }

        let element = element_of(name);
        if element == THEME_SECTION {
            settings = parse_settings(properties)?;
        } else if is_instruction_element(element) {
            sections.push(Section {
                name,
                element,
                properties,
            });
        } else {
            return Err(ThemeError::UnknownElement(name.to_string()));
        }
    }

    Ok((settings, sections))
}

/// Builds every instruction of `ini` in document order.
///
/// Symbols are built first so captions can reference a symbol declared
/// anywhere in the document. Drawing levels follow document order.
pub(crate) fn parse(
    ini: &Ini,
    factory: &Arc<dyn GraphicFactory>,
    display_model: &DisplayModel,
    text_keys: &TextKeyRegistry,
) -> Result<ParsedTheme, ThemeError> {
    let (settings, sections) = collect_sections(ini)?;

    let no_symbols = HashMap::new();
    let mut symbols: HashMap<String, Arc<Symbol>> = HashMap::new();
    let mut built_symbols: HashMap<usize, Arc<Symbol>> = HashMap::new();
    {
        let ctx = BuildContext {
            factory,
            display_model,
            text_keys,
            symbols: &no_symbols,
        };
        for (level, section) in sections.iter().enumerate() {
            if section.element != "symbol" {
                continue;
            }
            let symbol = Arc::new(Symbol::build(section.name, section.properties, &ctx, level)?);
            if let Some(id) = symbol.id() {
                if symbols.insert(id.to_string(), Arc::clone(&symbol)).is_some() {
                    return Err(ThemeError::DuplicateSymbolId {
                        element: section.name.to_string(),
                        id: id.to_string(),
                    });
                }
            }
            built_symbols.insert(level, symbol);
        }
    }

    let ctx = BuildContext {
        factory,
        display_model,
        text_keys,
        symbols: &symbols,
    };
    let mut instructions = Vec::with_capacity(sections.len());
    for (level, section) in sections.iter().enumerate() {
        let (name, properties) = (section.name, section.properties);
        let instruction = match section.element {
            "area" => RenderInstruction::Area(Area::build(name, properties, &ctx, level)?),
            "caption" => RenderInstruction::Caption(Caption::build(name, properties, &ctx, level)?),
            "circle" => RenderInstruction::Circle(Circle::build(name, properties, &ctx, level)?),
            "hillshading" => {
                RenderInstruction::Hillshading(Hillshading::build(name, properties, &ctx, level)?)
            }
            "line" => RenderInstruction::Line(Line::build(name, properties, &ctx, level)?),
            "line-symbol" => {
                RenderInstruction::LineSymbol(LineSymbol::build(name, properties, &ctx, level)?)
            }
            "path-text" => {
                RenderInstruction::PathText(PathText::build(name, properties, &ctx, level)?)
            }
            "symbol" => match built_symbols.remove(&level) {
                Some(symbol) => RenderInstruction::Symbol(symbol),
                None => RenderInstruction::Symbol(Arc::new(Symbol::build(
                    name, properties, &ctx, level,
                )?)),
            },
            other => return Err(ThemeError::UnknownElement(other.to_string())),
        };
        tracing::trace!(section = name, level, "Built render instruction");
        instructions.push(instruction);
    }

    Ok(ParsedTheme {
        settings,
        instructions,
    })
}
