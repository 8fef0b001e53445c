use super::model::{DeviceType, LayoutType};
use crate::config::ScreenConfig;
use crate::node::{DesignNode, Geometry, LayoutDirection};

/// Derives the target device from a screen's size.
pub fn device_type(geometry: &Geometry, config: &ScreenConfig) -> DeviceType {
    let width = geometry.width;
    let height = geometry.height;
    let widest = width.max(height);
    let aspect = if height > 0.0 { width / height } else { 0.0 };

    if widest <= config.mobile_max_side {
        return DeviceType::Mobile;
    }
    if widest <= config.tablet_max_side {
        return if aspect > config.tablet_max_aspect {
            DeviceType::Desktop
        } else {
            DeviceType::Tablet
        };
    }
    if width >= config.desktop_min_width && aspect > config.desktop_min_aspect {
        return DeviceType::Desktop;
    }

    if width <= config.mobile_max_side {
        DeviceType::Mobile
    } else if width <= config.tablet_max_side {
        DeviceType::Tablet
    } else {
        DeviceType::Desktop
    }
}

/// Reads the explicit layout flag, falling back to child position variance.
pub fn layout_type(node: &DesignNode, config: &ScreenConfig) -> LayoutType {
    match node.style.layout_direction {
        Some(LayoutDirection::Horizontal) => return LayoutType::Horizontal,
        Some(LayoutDirection::Vertical) => return LayoutType::Vertical,
        Some(LayoutDirection::Grid) => return LayoutType::Grid,
        None => {}
    }

    let visible: Vec<&DesignNode> = node.children.iter().filter(|c| c.visible).collect();
    if visible.len() < 2 {
        return LayoutType::Mixed;
    }

    let xs: Vec<f64> = visible.iter().map(|c| c.geometry.x).collect();
    let ys: Vec<f64> = visible.iter().map(|c| c.geometry.y).collect();
    let low_x = population_std_dev(&xs) < config.layout_variance_threshold;
    let low_y = population_std_dev(&ys) < config.layout_variance_threshold;

    match (low_x, low_y) {
        (false, true) => LayoutType::Horizontal,
        (true, false) => LayoutType::Vertical,
        (true, true) => LayoutType::Grid,
        (false, false) => LayoutType::Mixed,
    }
}

pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
