//! Property tests for the update engine.

use proptest::prelude::*;

use livechart_core::domain::{PricePoint, Series};
use livechart_view::engine::{DataAction, DataBounds, SnapshotKind, UpdateEngine, ViewEvent};
use livechart_view::{TimeRange, ViewAction, ViewConfig, ViewMode, ZoomDirection};

fn series(start: i64, n: usize) -> Series {
    (0..n)
        .map(|i| PricePoint::tick(start + i as i64, 50.0 + i as f64 * 0.5))
        .collect::<Vec<_>>()
        .into()
}

proptest! {
    /// Growing by one point with the same origin is exactly one append.
    #[test]
    fn grow_by_one_is_single_append(start in -1_000i64..1_000, n in 1usize..300) {
        let mut engine = UpdateEngine::new(ViewConfig::default());
        engine.apply_snapshot(&series(start, n));
        let plan = engine.apply_snapshot(&series(start, n + 1));
        prop_assert_eq!(plan.kind, SnapshotKind::Minor);
        match plan.data {
            DataAction::Append(points) => {
                prop_assert_eq!(points.len(), 1);
                prop_assert_eq!(points[0].time, start + n as i64);
            }
            other => prop_assert!(false, "expected append, got {:?}", other),
        }
    }

    /// After a zoom-in no amount of live data produces a viewport change.
    #[test]
    fn zoom_in_freezes_viewport(n in 20usize..300, extra in 1usize..50, zooms in 1usize..5) {
        let mut engine = UpdateEngine::new(ViewConfig::default());
        let s = series(0, n);
        engine.apply_snapshot(&s);
        for _ in 0..zooms {
            engine.handle(ViewEvent::Zoom(ZoomDirection::In), DataBounds::of(&s));
        }
        prop_assert_eq!(engine.mode(), ViewMode::ZoomedLocked);

        for k in 1..=extra {
            let plan = engine.apply_snapshot(&series(0, n + k));
            prop_assert_eq!(plan.view, ViewAction::Keep);
        }
    }

    /// Zooming out far enough always hands the viewport back to live data.
    #[test]
    fn zoom_out_restores_follow(n in 20usize..300, zooms in 1usize..5) {
        let mut engine = UpdateEngine::new(ViewConfig::default());
        let s = series(0, n);
        let bounds = DataBounds::of(&s);
        engine.apply_snapshot(&s);
        for _ in 0..zooms {
            engine.handle(ViewEvent::Zoom(ZoomDirection::In), bounds);
        }
        for _ in 0..(zooms + 20) {
            engine.handle(ViewEvent::Zoom(ZoomDirection::Out), bounds);
        }
        prop_assert_eq!(engine.mode(), ViewMode::AutoFollowing);
        let plan = engine.apply_snapshot(&series(0, n + 1));
        prop_assert_eq!(plan.view, ViewAction::ScrollToLiveEdge);
    }

    /// A range re-applied after a window shift is never inverted.
    #[test]
    fn shifted_range_is_valid_or_goes_live(
        from in 0i64..90,
        width in 1i64..50,
        shift in 1i64..200,
        len in 2usize..150,
    ) {
        let mut engine = UpdateEngine::new(ViewConfig::default());
        let s = series(0, 101);
        engine.apply_snapshot(&s);
        engine.handle(
            ViewEvent::RangeChanged { range: TimeRange::new(from, from + width), zoom_factor: None },
            DataBounds::of(&s),
        );
        prop_assume!(engine.state().is_locked());

        let plan = engine.apply_snapshot(&series(shift, len));
        match plan.view {
            ViewAction::SetVisibleRange { range } => {
                prop_assert!(range.is_valid());
                prop_assert!(range.from >= shift);
                prop_assert!(range.to <= shift + len as i64 - 1);
            }
            ViewAction::ScrollToLiveEdge => {}
            other => prop_assert!(false, "unexpected view action {:?}", other),
        }
    }
}
