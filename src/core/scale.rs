use crate::error::{ChartError, ChartResult};

/// Opaque x/y pixel scale supplied by the axis layer.
///
/// The core consumes only the forward mapping and the domain bounds; tick
/// geometry and zoom belong to the collaborator that built the scale.
pub trait PixelScale {
    fn pixel(&self, value: f64) -> f64;
    fn domain(&self) -> (f64, f64);
}

/// Straightforward affine scale, mostly for tests and headless embedding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() || domain.0 == domain.1 {
            return Err(ChartError::InvalidConfig(
                "scale domain must be finite with a non-zero span".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidConfig(
                "scale range must be finite".to_owned(),
            ));
        }
        Ok(Self { domain, range })
    }
}

impl PixelScale for LinearScale {
    fn pixel(&self, value: f64) -> f64 {
        let normalized = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        self.range.0 + normalized * (self.range.1 - self.range.0)
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, PixelScale};

    #[test]
    fn linear_scale_maps_domain_to_range() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("valid scale");
        assert_eq!(scale.pixel(0.0), 0.0);
        assert_eq!(scale.pixel(5.0), 50.0);
        assert_eq!(scale.pixel(10.0), 100.0);
        assert_eq!(scale.domain(), (0.0, 10.0));
    }

    #[test]
    fn degenerate_domains_are_rejected() {
        assert!(LinearScale::new((1.0, 1.0), (0.0, 10.0)).is_err());
        assert!(LinearScale::new((f64::NAN, 1.0), (0.0, 10.0)).is_err());
    }
}
