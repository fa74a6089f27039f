use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Weight, fat and BMI over date.
    Progress,
    /// The three 1RM lifts over date, grouped.
    Strength,
}

impl ChartKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "progress" => Some(ChartKind::Progress),
            "strength" => Some(ChartKind::Strength),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Progress => "progress",
            ChartKind::Strength => "strength",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Progress => "Progress Over Time",
            ChartKind::Strength => "Strength Progress",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    #[default]
    Svg,
    Png,
}

#[derive(Debug, Clone)]
pub struct Series {
    pub name: &'static str,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct ChartData {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub stroke_width: f32,
    pub palette: crate::types::palette::Palette,
    pub y_ticks: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            padding: 64,
            stroke_width: 2.5,
            palette: crate::types::palette::Palette::default(),
            y_ticks: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
    pub background: Option<(u8, u8, u8, u8)>,
}
