//! Tick → candle aggregation.
//!
//! Ticks are bucketed on a grid of `granularity` steps from an anchor: epoch
//! zero for a fresh aggregator, the tail candle's own time after `resume`, so
//! live candles stay on the history's grid even when it is not epoch aligned.
//! A tick in the open bucket extends that candle; a tick in a later bucket
//! opens a new one; a tick before the open candle is rejected.

use tracing::warn;

use crate::domain::{PricePoint, PushOutcome, Series, SeriesError};

#[derive(Debug, Clone)]
pub struct CandleAggregator {
    granularity: i64,
    anchor: i64,
    current: Option<PricePoint>,
}

impl CandleAggregator {
    /// `granularity` is in the same unit as tick times; values below 1 are
    /// treated as 1.
    pub fn new(granularity: i64) -> Self {
        Self {
            granularity: granularity.max(1),
            anchor: 0,
            current: None,
        }
    }

    /// Continue forming `last` (typically the tail of a history snapshot).
    /// The candle keeps its own time and later buckets follow from it.
    pub fn resume(granularity: i64, last: PricePoint) -> Self {
        let mut agg = Self::new(granularity);
        if !last.is_malformed() {
            let (o, h, l, c) = last.ohlc();
            agg.anchor = last.time;
            agg.current = Some(PricePoint::candle(last.time, o, h, l, c));
        }
        agg
    }

    pub fn granularity(&self) -> i64 {
        self.granularity
    }

    /// The candle currently being formed.
    pub fn current(&self) -> Option<&PricePoint> {
        self.current.as_ref()
    }

    pub fn bucket(&self, time: i64) -> i64 {
        self.anchor + (time - self.anchor).div_euclid(self.granularity) * self.granularity
    }

    /// Fold one tick in and return the updated (or newly opened) candle.
    pub fn push_tick(&mut self, time: i64, value: f64) -> Result<PricePoint, SeriesError> {
        if !value.is_finite() {
            return Err(SeriesError::Malformed { time });
        }
        let bucket = self.bucket(time);

        let candle = match self.current {
            Some(c) if time < c.time => {
                warn!(tick = time, bucket = c.time, "tick older than the forming candle");
                return Err(SeriesError::OutOfOrder {
                    last: c.time,
                    incoming: time,
                });
            }
            Some(c) if bucket == c.time => {
                let (o, h, l, _) = c.ohlc();
                PricePoint::candle(bucket, o, h.max(value), l.min(value), value)
            }
            _ => PricePoint::candle(bucket, value, value, value, value),
        };

        self.current = Some(candle);
        Ok(candle)
    }

    /// Fold a tick in and write the resulting candle into `series`.
    pub fn feed(
        &mut self,
        series: &mut Series,
        time: i64,
        value: f64,
    ) -> Result<PushOutcome, SeriesError> {
        let candle = self.push_tick(time, value)?;
        series.push(candle)
    }

    /// Aggregate a whole tick list into a candle series.
    pub fn aggregate(granularity: i64, ticks: impl IntoIterator<Item = (i64, f64)>) -> Series {
        let mut agg = Self::new(granularity);
        let mut series = Series::new();
        for (time, value) in ticks {
            // rejected ticks are logged by push_tick and skipped
            let _ = agg.feed(&mut series, time, value);
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_in_one_bucket_form_one_candle() {
        let mut agg = CandleAggregator::new(60);
        agg.push_tick(60, 10.0).unwrap();
        agg.push_tick(75, 12.0).unwrap();
        agg.push_tick(90, 9.0).unwrap();
        let c = agg.push_tick(119, 11.0).unwrap();
        assert_eq!(c, PricePoint::candle(60, 10.0, 12.0, 9.0, 11.0));
    }

    #[test]
    fn later_bucket_opens_new_candle() {
        let mut agg = CandleAggregator::new(60);
        agg.push_tick(61, 10.0).unwrap();
        let c = agg.push_tick(125, 11.0).unwrap();
        assert_eq!(c, PricePoint::candle(120, 11.0, 11.0, 11.0, 11.0));
    }

    #[test]
    fn older_bucket_is_rejected() {
        let mut agg = CandleAggregator::new(60);
        agg.push_tick(125, 11.0).unwrap();
        assert_eq!(
            agg.push_tick(100, 1.0),
            Err(SeriesError::OutOfOrder { last: 120, incoming: 100 })
        );
        assert_eq!(agg.current().map(|c| c.time), Some(120));
    }

    #[test]
    fn nan_tick_is_malformed() {
        let mut agg = CandleAggregator::new(60);
        assert_eq!(agg.push_tick(1, f64::NAN), Err(SeriesError::Malformed { time: 1 }));
    }

    #[test]
    fn negative_times_floor() {
        assert_eq!(CandleAggregator::new(60).bucket(-1), -60);
    }

    #[test]
    fn aggregate_builds_series() {
        let series = CandleAggregator::aggregate(10, [(0, 1.0), (5, 3.0), (12, 2.0), (3, 9.0), (25, 4.0)]);
        assert_eq!(series.times(), vec![0, 10, 20]);
        assert_eq!(series.highs(), vec![3.0, 2.0, 4.0]);
    }

    #[test]
    fn resume_extends_history_tail() {
        let mut agg = CandleAggregator::resume(60, PricePoint::candle(60, 5.0, 6.0, 4.0, 5.5));
        let c = agg.push_tick(100, 7.0).unwrap();
        assert_eq!(c, PricePoint::candle(60, 5.0, 7.0, 4.0, 7.0));
    }

    #[test]
    fn resume_keeps_off_grid_history_grid() {
        let mut agg = CandleAggregator::resume(60, PricePoint::candle(90, 10.0, 11.0, 9.5, 10.5));
        let c = agg.push_tick(100, 11.2).unwrap();
        assert_eq!(c, PricePoint::candle(90, 10.0, 11.2, 9.5, 11.2));

        let c = agg.push_tick(149, 10.0).unwrap();
        assert_eq!(c.time, 90);
        let c = agg.push_tick(150, 12.0).unwrap();
        assert_eq!(c, PricePoint::candle(150, 12.0, 12.0, 12.0, 12.0));
        let c = agg.push_tick(275, 13.0).unwrap();
        assert_eq!(c.time, 270);

        assert_eq!(
            agg.push_tick(260, 1.0),
            Err(SeriesError::OutOfOrder { last: 270, incoming: 260 })
        );
    }

    #[test]
    fn tick_before_resumed_candle_is_rejected() {
        let mut agg = CandleAggregator::resume(60, PricePoint::candle(90, 10.0, 11.0, 9.5, 10.5));
        assert_eq!(
            agg.push_tick(89, 1.0),
            Err(SeriesError::OutOfOrder { last: 90, incoming: 89 })
        );
    }
}
