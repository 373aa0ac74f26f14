//! Domain types: price points, series, descriptors, derived outputs, signals.

pub mod descriptor;
pub mod ids;
pub mod output;
pub mod point;
pub mod series;
pub mod signal;

pub use descriptor::{IndicatorDescriptor, IndicatorType, Location, ParamValue};
pub use ids::{ContentHash, IndicatorId};
pub use output::{fan_line, stamp, Band, FanLine, IndicatorOutput, Line, LinePoint};
pub use point::PricePoint;
pub use series::{PushOutcome, Series, SeriesError};
pub use signal::{Signal, SignalDirection};
