use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Compound;
use crate::render::Color;

/// One swatch of the chart legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// Explicit compound to stroke-color mapping handed to the scene builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundPalette {
    colors: IndexMap<Compound, Color>,
    fallback: Color,
    pit_window: Color,
    pit_window_label: String,
}

impl Default for CompoundPalette {
    fn default() -> Self {
        let mut colors = IndexMap::new();
        colors.insert(Compound::Soft, Color::rgb8(0xff, 0x4b, 0x4b));
        colors.insert(Compound::Medium, Color::rgb8(0xf2, 0xc9, 0x4c));
        colors.insert(Compound::Hard, Color::rgb8(0xb8, 0xbe, 0xc6));
        Self {
            colors,
            fallback: Color::rgb8(0xaa, 0xb2, 0xbc),
            pit_window: Color::rgba8(0xff, 0x6b, 0x2e, 0.18),
            pit_window_label: "Pit window".to_owned(),
        }
    }
}

impl CompoundPalette {
    /// Empty palette; every compound renders with `fallback`.
    #[must_use]
    pub fn new(fallback: Color, pit_window: Color) -> Self {
        Self {
            colors: IndexMap::new(),
            fallback,
            pit_window,
            pit_window_label: "Pit window".to_owned(),
        }
    }

    #[must_use]
    pub fn with_compound(mut self, compound: Compound, color: Color) -> Self {
        self.colors.insert(compound, color);
        self
    }

    #[must_use]
    pub fn with_pit_window_label(mut self, label: impl Into<String>) -> Self {
        self.pit_window_label = label.into();
        self
    }

    #[must_use]
    pub fn color_for(&self, compound: &Compound) -> Color {
        self.colors.get(compound).copied().unwrap_or(self.fallback)
    }

    #[must_use]
    pub fn fallback(&self) -> Color {
        self.fallback
    }

    #[must_use]
    pub fn pit_window(&self) -> Color {
        self.pit_window
    }

    /// Compound swatches in insertion order, then the pit-window swatch.
    #[must_use]
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.colors
            .iter()
            .map(|(compound, color)| LegendEntry {
                label: compound.to_string(),
                color: *color,
            })
            .chain(std::iter::once(LegendEntry {
                label: self.pit_window_label.clone(),
                color: self.pit_window,
            }))
            .collect()
    }
}
