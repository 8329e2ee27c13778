//! Typed access to theme attribute values

use super::{ResourceScaling, ThemeError};
use crate::display::DisplayModel;
use crate::error::ParseValueError;
use crate::graphics::{BitmapSpec, Color};
use std::str::FromStr;

/// One `name = value` pair of a theme section.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Attr<'a> {
    pub element: &'a str,
    pub name: &'a str,
    pub value: &'a str,
}

/// Iterates the attributes of a section in file order.
pub(crate) fn attributes<'a>(
    element: &'a str,
    properties: &'a ini::Properties,
) -> impl Iterator<Item = Attr<'a>> {
    properties.iter().map(move |(name, value)| Attr {
        element,
        name,
        value: value.trim(),
    })
}

impl<'a> Attr<'a> {
    pub fn invalid(&self, reason: impl Into<String>) -> ThemeError {
        ThemeError::InvalidValue {
            element: self.element.to_string(),
            name: self.name.to_string(),
            value: self.value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unknown(&self) -> ThemeError {
        ThemeError::UnknownAttribute {
            element: self.element.to_string(),
            name: self.name.to_string(),
            value: self.value.to_string(),
        }
    }

    pub fn string(&self) -> String {
        self.value.to_string()
    }

    pub fn color(&self) -> Result<Color, ThemeError> {
        self.value
            .parse()
            .map_err(|_| self.invalid("expected #RRGGBB or #AARRGGBB"))
    }

    pub fn f32(&self) -> Result<f32, ThemeError> {
        match self.value.parse::<f32>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.invalid("expected a number")),
        }
    }

    pub fn non_negative_f32(&self) -> Result<f32, ThemeError> {
        let v = self.f32()?;
        if v < 0.0 {
            return Err(self.invalid("must not be negative"));
        }
        Ok(v)
    }

    pub fn i32(&self) -> Result<i32, ThemeError> {
        self.value
            .parse()
            .map_err(|_| self.invalid("expected an integer"))
    }

    pub fn u8(&self) -> Result<u8, ThemeError> {
        self.value
            .parse()
            .map_err(|_| self.invalid("expected an integer between 0 and 255"))
    }

    pub fn u32(&self) -> Result<u32, ThemeError> {
        self.value
            .parse()
            .map_err(|_| self.invalid("expected a non-negative integer"))
    }

    pub fn bool(&self) -> Result<bool, ThemeError> {
        match self.value {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(self.invalid("expected true or false")),
        }
    }

    /// Parses a keyword enum.
    pub fn keyword<T>(&self) -> Result<T, ThemeError>
    where
        T: FromStr<Err = ParseValueError>,
    {
        self.value.parse().map_err(|e: ParseValueError| self.invalid(e.to_string()))
    }

    /// Comma separated non-negative dash lengths, multiplied by `scale_factor`.
    pub fn dash_array(&self, scale_factor: f32) -> Result<Vec<f32>, ThemeError> {
        let mut dash = Vec::new();
        for part in self.value.split(',') {
            let v: f32 = part
                .trim()
                .parse()
                .map_err(|_| self.invalid("expected comma separated numbers"))?;
            if !v.is_finite() || v < 0.0 {
                return Err(self.invalid("dash lengths must not be negative"));
            }
            dash.push(v * scale_factor);
        }
        if dash.iter().all(|d| *d == 0.0) {
            return Err(self.invalid("dash pattern must contain a positive length"));
        }
        Ok(dash)
    }
}

/// Collects the bitmap resource attributes shared by several elements.
#[derive(Debug, Clone)]
pub(crate) struct BitmapAttributes {
    src: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
    percent: u32,
    scaling: ResourceScaling,
}

impl Default for BitmapAttributes {
    fn default() -> Self {
        Self {
            src: None,
            width: None,
            height: None,
            percent: 100,
            scaling: ResourceScaling::Default,
        }
    }
}

impl BitmapAttributes {
    /// Consumes `attr` if it is a bitmap attribute. Returns `Ok(false)` for
    /// attributes it does not handle.
    pub fn accept(&mut self, attr: &Attr<'_>, scale_factor: f32) -> Result<bool, ThemeError> {
        match attr.name {
            "src" => self.src = Some(attr.string()),
            "symbol-width" => self.width = Some(attr.u32()? as f32 * scale_factor),
            "symbol-height" => self.height = Some(attr.u32()? as f32 * scale_factor),
            "symbol-percent" => self.percent = attr.u32()?,
            "symbol-scaling" => self.scaling = attr.keyword()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// The resource description, or `None` without a `src`.
    pub fn spec(&self, display_model: &DisplayModel) -> Option<BitmapSpec> {
        let src = self.src.clone()?;
        let mut spec = BitmapSpec::new(src);
        spec.scale_factor = display_model.scale_factor();
        spec.percent = self.percent;
        match self.scaling {
            ResourceScaling::Tile => {
                let size = display_model.tile_size() as f32;
                spec.width = Some(size);
                spec.height = Some(size);
            }
            ResourceScaling::Default | ResourceScaling::Size => {
                spec.width = self.width;
                spec.height = self.height;
            }
        }
        Some(spec)
    }
}
