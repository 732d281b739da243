use crate::error::{NumlabError, NumlabResult};

/// Affine map from a domain interval onto a pixel interval.
///
/// `range_start` may be greater than `range_end`; that is how the vertical
/// axis is flipped so larger values are drawn higher up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> NumlabResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(NumlabError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
        })
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> NumlabResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() || range_start == range_end {
            return Err(NumlabError::InvalidData(
                "scale range must be finite and non-zero".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> NumlabResult<f64> {
        if !value.is_finite() {
            return Err(NumlabError::InvalidData("value must be finite".to_owned()));
        }

        // Halved operands keep the span finite for domains wider than f64::MAX.
        let normalized =
            (value * 0.5 - self.domain_start * 0.5) / (self.domain_end * 0.5 - self.domain_start * 0.5);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> NumlabResult<f64> {
        if !pixel.is_finite() {
            return Err(NumlabError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        let value = self.domain_start * (1.0 - normalized) + self.domain_end * normalized;
        if !value.is_finite() {
            return Err(NumlabError::InvalidData(format!(
                "pixel {pixel} maps outside the finite domain"
            )));
        }
        Ok(value)
    }
}
