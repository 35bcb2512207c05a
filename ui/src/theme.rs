use core::plot::HeatScale;

/// Global color theme selectable from the settings overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            ThemeKind::Dark => Palette {
                bg: 0x0b1220,
                panel: 0x0f172a,
                panel_alt: 0x111827,
                border: 0x1f2937,
                text: 0xe5e7eb,
                muted: 0x9ca3af,
                accent: 0x2563eb,
                highlight: 0xf59e0b,
                safe: 0x22c55e,
                warn: 0xd4a017,
                fail: 0xef4444,
                series: SERIES_DARK,
                heat_low: 0x0f172a,
                heat_high: 0xf59e0b,
                heat_neg: 0x3b82f6,
                heat_mid: 0x111827,
                heat_pos: 0xef4444,
            },
            ThemeKind::Light => Palette {
                bg: 0xffffff,
                panel: 0xf3f4f6,
                panel_alt: 0xe5e7eb,
                border: 0xd1d5db,
                text: 0x111827,
                muted: 0x6b7280,
                accent: 0x2563eb,
                highlight: 0xb45309,
                safe: 0x16a34a,
                warn: 0xca8a04,
                fail: 0xdc2626,
                series: SERIES_LIGHT,
                heat_low: 0xf3f4f6,
                heat_high: 0xb45309,
                heat_neg: 0x2563eb,
                heat_mid: 0xf9fafb,
                heat_pos: 0xdc2626,
            },
        }
    }
}

const SERIES_DARK: [u32; 8] = [
    0x60a5fa, 0xf472b6, 0x34d399, 0xfbbf24, 0xa78bfa, 0xf87171, 0x2dd4bf, 0xfb923c,
];
const SERIES_LIGHT: [u32; 8] = [
    0x1d4ed8, 0xbe185d, 0x047857, 0xb45309, 0x6d28d9, 0xb91c1c, 0x0f766e, 0xc2410c,
];

/// Resolved colors for one theme. All values are 0xRRGGBB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: u32,
    pub panel: u32,
    pub panel_alt: u32,
    pub border: u32,
    pub text: u32,
    pub muted: u32,
    pub accent: u32,
    pub highlight: u32,
    pub safe: u32,
    pub warn: u32,
    pub fail: u32,
    pub series: [u32; 8],
    pub heat_low: u32,
    pub heat_high: u32,
    pub heat_neg: u32,
    pub heat_mid: u32,
    pub heat_pos: u32,
}

impl Palette {
    pub fn series_color(&self, index: usize) -> u32 {
        self.series[index % self.series.len()]
    }

    /// Maps one heatmap cell value to a color under the given scale and
    /// observed (min, max). NaN cells get the panel color.
    pub fn heat_color(&self, value: f64, scale: HeatScale, min: f64, max: f64) -> u32 {
        if value.is_nan() {
            return self.panel;
        }
        match scale {
            HeatScale::Sequential => {
                let span = (max - min).max(1e-12);
                let t = ((value - min) / span).clamp(0.0, 1.0);
                lerp(self.heat_low, self.heat_high, t as f32)
            }
            HeatScale::Diverging { bound } => {
                let bound = bound.max(1e-12);
                let t = (value / bound).clamp(-1.0, 1.0);
                if t < 0.0 {
                    lerp(self.heat_mid, self.heat_neg, -t as f32)
                } else {
                    lerp(self.heat_mid, self.heat_pos, t as f32)
                }
            }
        }
    }
}

pub fn lerp(from: u32, to: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |shift: u32| -> u32 {
        let a = ((from >> shift) & 0xff) as f32;
        let b = ((to >> shift) & 0xff) as f32;
        ((a + (b - a) * t).round().clamp(0.0, 255.0)) as u32
    };
    (channel(16) << 16) | (channel(8) << 8) | channel(0)
}
