pub mod format;
pub mod interpolate;
pub mod layout;
pub mod snapshot;

pub use format::{
    AXIS_LABEL_CHARS, ValueFormat, format_percent, group_thousands, round_to, truncate_label,
};
pub use interpolate::{Easing, clamp_progress, ease_in_out_cubic, lerp};
pub use layout::{Margins, SurfaceLayout};
pub use snapshot::{Datum, GroupedPoint, RingSlice, SeriesPoint, Snapshot, SnapshotChange};
