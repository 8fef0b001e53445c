use crate::config::PatternConfig;
use crate::style::StyleSummary;
use serde::{Deserialize, Serialize};

const GRID_EPSILON: f64 = 1e-6;

/// Visual consistency sub-scores in [0, 1] and their weighted average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub spacing: f64,
    pub color: f64,
    pub typography: f64,
    pub overall: f64,
}

impl ConsistencyReport {
    pub fn from_style(style: &StyleSummary, config: &PatternConfig) -> Self {
        let spacing = spacing_consistency(&style.spacing, config.spacing_grid);
        let color = color_consistency(style.colors.len(), config.max_palette_size);
        let typography =
            typography_consistency(&style.font_sizes, config.type_scale_min, config.type_scale_max);
        let overall = config.spacing_weight * spacing
            + config.color_weight * color
            + config.typography_weight * typography;
        Self {
            spacing,
            color,
            typography,
            overall: overall.clamp(0.0, 1.0),
        }
    }
}

/// Share of spacing values that sit on the `grid` base unit. 1.0 when nothing was observed.
pub fn spacing_consistency(values: &[f64], grid: f64) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return 1.0;
    }
    let on_grid = finite
        .iter()
        .filter(|v| {
            let rem = v.abs() % grid;
            rem < GRID_EPSILON || grid - rem < GRID_EPSILON
        })
        .count();
    on_grid as f64 / finite.len() as f64
}

/// 1.0 while the palette stays within `max_palette`, decaying as `max_palette / unique` beyond it.
pub fn color_consistency(unique_colors: usize, max_palette: usize) -> f64 {
    if unique_colors <= max_palette {
        1.0
    } else {
        max_palette as f64 / unique_colors as f64
    }
}

/// Share of adjacent steps in the sorted distinct font sizes whose ratio lies in
/// `[scale_min, scale_max]`. 1.0 with fewer than two sizes.
pub fn typography_consistency(font_sizes: &[f64], scale_min: f64, scale_max: f64) -> f64 {
    let mut sizes: Vec<f64> = font_sizes
        .iter()
        .copied()
        .filter(|s| s.is_finite() && *s > 0.0)
        .collect();
    sizes.sort_by(f64::total_cmp);
    sizes.dedup();
    if sizes.len() < 2 {
        return 1.0;
    }
    let steps = sizes.len() - 1;
    let harmonious = sizes
        .windows(2)
        .filter(|pair| (scale_min..=scale_max).contains(&(pair[1] / pair[0])))
        .count();
    harmonious as f64 / steps as f64
}
