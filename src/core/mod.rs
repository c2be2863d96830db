pub mod aggregate;
pub mod cache;
pub mod hit;
pub mod ratio;
pub mod scale;
pub mod store;
pub mod transform;
pub mod types;
pub mod xkey;

pub use aggregate::{Extremum, MinMaxPoints};
pub use cache::DerivedCache;
pub use hit::HitContext;
pub use ratio::{ArcSweep, RatioKind};
pub use scale::{LinearScale, PixelScale};
pub use store::DataStore;
pub use types::{DataPoint, PointValue, Series, SeriesId, XValue};
pub use xkey::XKeyMode;
