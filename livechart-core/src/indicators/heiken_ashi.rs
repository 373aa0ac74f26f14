//! Heiken-Ashi candle transform.
//!
//! haClose[i] = (open + high + low + close) / 4
//! haOpen[0]  = (open[0] + close[0]) / 2
//! haOpen[i]  = (haOpen[i-1] + haClose[i-1]) / 2
//! haHigh[i]  = max(high[i], haOpen[i], haClose[i])
//! haLow[i]   = min(low[i], haOpen[i], haClose[i])

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HaCandles {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl HaCandles {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn is_bullish(&self, i: usize) -> bool {
        self.close[i] > self.open[i]
    }

    pub fn is_bearish(&self, i: usize) -> bool {
        self.close[i] < self.open[i]
    }
}

pub fn heiken_ashi(opens: &[f64], highs: &[f64], lows: &[f64], closes: &[f64]) -> HaCandles {
    let n = opens.len().min(highs.len()).min(lows.len()).min(closes.len());
    let mut ha = HaCandles {
        open: Vec::with_capacity(n),
        high: Vec::with_capacity(n),
        low: Vec::with_capacity(n),
        close: Vec::with_capacity(n),
    };

    for i in 0..n {
        let close = (opens[i] + highs[i] + lows[i] + closes[i]) / 4.0;
        let open = if i == 0 {
            (opens[0] + closes[0]) / 2.0
        } else {
            (ha.open[i - 1] + ha.close[i - 1]) / 2.0
        };
        ha.high.push(highs[i].max(open).max(close));
        ha.low.push(lows[i].min(open).min(close));
        ha.open.push(open);
        ha.close.push(close);
    }

    ha
}
