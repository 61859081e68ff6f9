//! Gesture kinds, templates, and the template store.
//!
//! Templates are built once from configuration and then only read. The
//! store is small (single digits), so every lookup is a linear scan.

use std::fmt;

use crate::error::{GestureError, Result};
use crate::math::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Recognized gesture. `Invalid` means no confident match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GestureKind {
    #[default]
    Invalid,
    AttackLeft,
    AttackRight,
    Magic,
    Heal,
    Guard,
    DodgeLeft,
    DodgeRight,
}

impl GestureKind {
    /// Every kind except `Invalid`.
    pub const RECOGNIZED: [Self; 7] = [
        Self::AttackLeft,
        Self::AttackRight,
        Self::Magic,
        Self::Heal,
        Self::Guard,
        Self::DodgeLeft,
        Self::DodgeRight,
    ];

    /// Map a template name to a kind.
    ///
    /// Accepts both the short names (`"AttackL"`, `"DodgeR"`) and the long
    /// names (`"AttackLeft"`). Anything else maps to `Invalid`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "AttackL" | "AttackLeft" => Self::AttackLeft,
            "AttackR" | "AttackRight" => Self::AttackRight,
            "Magic" => Self::Magic,
            "Heal" => Self::Heal,
            "Guard" => Self::Guard,
            "DodgeL" | "DodgeLeft" => Self::DodgeLeft,
            "DodgeR" | "DodgeRight" => Self::DodgeRight,
            _ => Self::Invalid,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invalid => "Invalid",
            Self::AttackLeft => "AttackLeft",
            Self::AttackRight => "AttackRight",
            Self::Magic => "Magic",
            Self::Heal => "Heal",
            Self::Guard => "Guard",
            Self::DodgeLeft => "DodgeLeft",
            Self::DodgeRight => "DodgeRight",
        }
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named reference direction pattern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GestureTemplate {
    name: String,
    kind: GestureKind,
    pattern: Vec<usize>,
    shape: Option<Vec<Point2>>,
}

impl GestureTemplate {
    /// Create a template. The kind is derived from the name.
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: Vec<usize>) -> Self {
        let name = name.into();
        Self {
            kind: GestureKind::from_name(&name),
            name,
            pattern,
            shape: None,
        }
    }

    /// Attach a reference shape for display.
    #[must_use]
    pub fn with_shape(mut self, shape: Vec<Point2>) -> Self {
        self.shape = Some(shape);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> GestureKind {
        self.kind
    }

    #[must_use]
    pub fn pattern(&self) -> &[usize] {
        &self.pattern
    }

    #[must_use]
    pub fn shape(&self) -> Option<&[Point2]> {
        self.shape.as_deref()
    }
}

/// Template record as supplied by an asset or configuration loader.
#[cfg(feature = "serde")]
#[derive(Debug, Deserialize)]
struct TemplateRecord {
    name: String,
    pattern: Vec<usize>,
    #[serde(default)]
    shape: Option<Vec<[f64; 2]>>,
}

#[cfg(feature = "serde")]
impl From<TemplateRecord> for GestureTemplate {
    fn from(record: TemplateRecord) -> Self {
        let template = Self::new(record.name, record.pattern);
        match record.shape {
            Some(shape) => template.with_shape(shape.into_iter().map(Point2::from).collect()),
            None => template,
        }
    }
}

/// Immutable collection of templates sharing one bin count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateStore {
    templates: Vec<GestureTemplate>,
    direction_bins: usize,
}

impl TemplateStore {
    /// Build a store, checking that every pattern entry is a valid bin.
    ///
    /// Templates with empty patterns are kept but never match.
    ///
    /// # Errors
    ///
    /// Returns an error if a template has an empty name or a pattern entry
    /// `>= direction_bins`.
    pub fn new(templates: Vec<GestureTemplate>, direction_bins: usize) -> Result<Self> {
        for template in &templates {
            if template.name.trim().is_empty() {
                return Err(GestureError::invalid_template(
                    &template.name,
                    "name must not be empty",
                ));
            }
            if let Some(&direction) = template.pattern.iter().find(|&&d| d >= direction_bins) {
                return Err(GestureError::direction_out_of_range(
                    &template.name,
                    direction,
                    direction_bins,
                ));
            }
        }

        Ok(Self {
            templates,
            direction_bins,
        })
    }

    /// Parse a JSON array of `{ "name", "pattern", "shape"? }` records.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a record fails the
    /// checks of [`TemplateStore::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use stroke_gesture::{GestureKind, TemplateStore};
    ///
    /// let json = r#"[
    ///     { "name": "AttackR", "pattern": [0] },
    ///     { "name": "Magic", "pattern": [0, 2, 4, 6], "shape": [[0, 0], [1, 0], [1, 1], [0, 1]] }
    /// ]"#;
    /// let store = TemplateStore::from_json(json, 8)?;
    /// assert_eq!(store.len(), 2);
    /// assert_eq!(store.get("Magic").map(|t| t.kind()), Some(GestureKind::Magic));
    /// # Ok::<(), stroke_gesture::GestureError>(())
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str, direction_bins: usize) -> Result<Self> {
        let records: Vec<TemplateRecord> = serde_json::from_str(json)?;
        Self::new(
            records.into_iter().map(GestureTemplate::from).collect(),
            direction_bins,
        )
    }

    #[must_use]
    pub const fn direction_bins(&self) -> usize {
        self.direction_bins
    }

    pub fn iter(&self) -> impl Iterator<Item = &GestureTemplate> {
        self.templates.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// First template with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GestureTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }
}

impl<'a> IntoIterator for &'a TemplateStore {
    type Item = &'a GestureTemplate;
    type IntoIter = std::slice::Iter<'a, GestureTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}
