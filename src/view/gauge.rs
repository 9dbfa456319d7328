use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityBand {
    Low,
    Medium,
    High,
}

impl fmt::Display for QualityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QualityBand::Low => "Low",
            QualityBand::Medium => "Medium",
            QualityBand::High => "High",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeReading {
    pub score: u8,
    pub band: QualityBand,
    /// Filled share of the 180° arc.
    pub sweep_fraction: f32,
}

/// Band a 0–100 quality score. Values above 100 are clamped.
pub fn classify(score: u8) -> GaugeReading {
    let score = score.min(100);
    let band = match score {
        0..=50 => QualityBand::Low,
        51..=80 => QualityBand::Medium,
        _ => QualityBand::High,
    };
    GaugeReading {
        score,
        band,
        sweep_fraction: score as f32 / 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(classify(0).band, QualityBand::Low);
        assert_eq!(classify(50).band, QualityBand::Low);
        assert_eq!(classify(51).band, QualityBand::Medium);
        assert_eq!(classify(80).band, QualityBand::Medium);
        assert_eq!(classify(81).band, QualityBand::High);
        assert_eq!(classify(100).band, QualityBand::High);
    }

    #[test]
    fn sweep_is_proportional() {
        assert_eq!(classify(0).sweep_fraction, 0.0);
        assert_eq!(classify(50).sweep_fraction, 0.5);
        assert_eq!(classify(100).sweep_fraction, 1.0);
    }

    #[test]
    fn out_of_range_clamps() {
        let r = classify(200);
        assert_eq!(r.score, 100);
        assert_eq!(r.sweep_fraction, 1.0);
    }
}
