use crate::screen::{ComponentStructure, DesignStats, ScreenStructure};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Style values aggregated over a set of components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSummary {
    /// Distinct `#RRGGBB` colors (backgrounds and text).
    pub colors: BTreeSet<String>,
    /// Distinct font sizes, ascending.
    pub font_sizes: Vec<f64>,
    /// Every observed spacing value, in traversal order.
    pub spacing: Vec<f64>,
    /// Distinct corner radii, ascending.
    pub corner_radii: Vec<f64>,
}

impl StyleSummary {
    pub fn from_components<'a>(components: impl IntoIterator<Item = &'a ComponentStructure>) -> Self {
        let mut summary = StyleSummary::default();
        let mut font_sizes = Vec::new();
        let mut radii = Vec::new();

        for component in components {
            let style = &component.style;
            summary
                .colors
                .extend(style.background_color.iter().chain(&style.text_color).cloned());
            font_sizes.extend(style.font_size);
            radii.extend(style.corner_radius.filter(|r| *r > 0.0));
            summary.spacing.extend(style.spacing.iter().copied());
        }

        summary.font_sizes = distinct_sorted(font_sizes);
        summary.corner_radii = distinct_sorted(radii);
        summary
    }

    pub fn from_screen(screen: &ScreenStructure) -> Self {
        let mut summary = Self::from_components(screen.all_components());
        summary.colors.extend(screen.background_color.iter().cloned());
        summary
    }

    pub fn from_screens<'a>(screens: impl IntoIterator<Item = &'a ScreenStructure>) -> Self {
        let mut merged = StyleSummary::default();
        let mut font_sizes = Vec::new();
        let mut radii = Vec::new();
        for screen in screens {
            let summary = Self::from_screen(screen);
            merged.colors.extend(summary.colors);
            merged.spacing.extend(summary.spacing);
            font_sizes.extend(summary.font_sizes);
            radii.extend(summary.corner_radii);
        }
        merged.font_sizes = distinct_sorted(font_sizes);
        merged.corner_radii = distinct_sorted(radii);
        merged
    }

    pub fn distinct_spacing_count(&self) -> usize {
        distinct_sorted(self.spacing.clone()).len()
    }

    pub fn stats(&self, component_count: usize) -> DesignStats {
        DesignStats {
            color_count: self.colors.len(),
            font_size_count: self.font_sizes.len(),
            spacing_count: self.distinct_spacing_count(),
            component_count,
        }
    }
}

fn distinct_sorted(values: Vec<f64>) -> Vec<f64> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .sorted_by(|a, b| a.total_cmp(b))
        .dedup()
        .collect()
}
