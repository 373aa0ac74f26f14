//! LiveChart View - keeps live updates and manual chart exploration out of
//! each other's way.
//!
//! - `engine`: classifies snapshots as major / minor and decides what the
//!   viewport does; handles zoom, pan and reset events
//! - `view_state`: the per-chart flags behind the four view modes
//! - `overlay` / `layout`: signal markers and pane heights
//! - `surface`: the seam to the external charting surface
//! - `session`: one chart instance wiring all of the above to the core crate

pub mod config;
pub mod debounce;
pub mod engine;
pub mod layout;
pub mod overlay;
pub mod session;
pub mod surface;
pub mod view_state;

pub use config::{ConfigError, ViewConfig};
pub use engine::{DataAction, UpdateEngine, UpdatePlan, ViewAction, ViewEvent, ZoomDirection};
pub use session::{ChartSession, ChartType};
pub use surface::{ChartSurface, CoordinateMapper, RecordingSurface, SurfaceCall};
pub use view_state::{TimeRange, ViewMode, ViewState};
