//! Presentation settings shared by every chart.
//!
//! Passed explicitly to each render call; nothing here is global.

use plotters::style::RGBColor;
use std::path::PathBuf;

pub const TASK_BLUE: RGBColor = RGBColor(0x0d, 0x00, 0x7e);
pub const TAB_ORANGE: RGBColor = RGBColor(0xff, 0x7f, 0x0e);
pub const TAB_PURPLE: RGBColor = RGBColor(0x94, 0x67, 0xbd);
pub const TAB_RED: RGBColor = RGBColor(0xd6, 0x27, 0x28);
pub const TAB_GREEN: RGBColor = RGBColor(0x2c, 0xa0, 0x2c);
pub const TAB_GRAY: RGBColor = RGBColor(0x7f, 0x7f, 0x7f);

/// Name of the single-threaded reference implementation in the `method` column.
pub const SERIAL_METHOD: &str = "serial";

/// One plotted implementation: its `method` key, legend label and color.
#[derive(Debug, Clone)]
pub struct MethodStyle {
    pub key: String,
    pub label: String,
    pub color: RGBColor,
}

impl MethodStyle {
    pub fn new(key: &str, label: &str, color: RGBColor) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            color,
        }
    }

    pub fn hex(&self) -> String {
        hex_color(self.color)
    }
}

/// `#rrggbb` form, for consumers outside plotters.
pub fn hex_color(color: RGBColor) -> String {
    let RGBColor(r, g, b) = color;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Figure size in pixels (8x6 inches at 100 px per inch).
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub title_font_size: f64,
    pub legend_font_size: f64,
    pub tick_font_size: f64,
    pub out_dir: PathBuf,
    pub methods: Vec<MethodStyle>,
    pub reference_color: RGBColor,
    pub guide_color: RGBColor,
    /// Upper y limit of the time plot; `None` uses the largest time + 1.
    pub time_y_max: Option<f64>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            font_family: "sans-serif".to_string(),
            title_font_size: 20.0,
            legend_font_size: 16.0,
            tick_font_size: 12.0,
            out_dir: PathBuf::from("."),
            methods: vec![
                MethodStyle::new("task", "Task", TASK_BLUE),
                MethodStyle::new("simple", "Simple", TAB_ORANGE),
                MethodStyle::new("hyper", "Hyper", TAB_PURPLE),
                MethodStyle::new("psrs", "PSRS", TAB_RED),
            ],
            reference_color: TAB_GREEN,
            guide_color: TAB_GRAY,
            time_y_max: None,
        }
    }
}

impl ChartConfig {
    pub fn with_out_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.out_dir = dir.into();
        self
    }
}
