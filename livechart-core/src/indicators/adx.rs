//! Average Directional Index (ADX) with the +DI / -DI lines (DMI).
//!
//! +DM = up move if up > down and up > 0, else 0 (mirrored for -DM).
//! +DI = 100 * smoothed(+DM) / smoothed(TR), likewise -DI.
//! DX  = 100 * |+DI - -DI| / (+DI + -DI), 0 when both DIs are 0.
//! ADX = Wilder smoothing of DX.
//! DI lines start at index `length`; ADX at index 2*length - 1.

use super::atr::{true_range, wilder_smooth};
use super::on_defined;
use crate::domain::Line;

#[derive(Debug, Clone, PartialEq)]
pub struct Dmi {
    pub adx: Line,
    pub plus_di: Line,
    pub minus_di: Line,
}

pub fn adx(highs: &[f64], lows: &[f64], closes: &[f64], length: usize) -> Dmi {
    let tr = true_range(highs, lows, closes);
    let n = tr.len();
    if n == 0 {
        return Dmi {
            adx: Vec::new(),
            plus_di: Vec::new(),
            minus_di: Vec::new(),
        };
    }

    let mut plus_dm = Vec::with_capacity(n - 1);
    let mut minus_dm = Vec::with_capacity(n - 1);
    for i in 1..n {
        let up = highs[i] - highs[i - 1];
        let down = lows[i - 1] - lows[i];
        plus_dm.push(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm.push(if down > up && down > 0.0 { down } else { 0.0 });
    }

    let s_tr = wilder_smooth(&tr[1..], length);
    let s_plus = wilder_smooth(&plus_dm, length);
    let s_minus = wilder_smooth(&minus_dm, length);

    let di = |dm: &Line| -> Line {
        let mut out = vec![None];
        out.extend(dm.iter().zip(&s_tr).map(|(dm, tr)| match (dm, tr) {
            (Some(dm), Some(tr)) if *tr > 0.0 => Some(100.0 * dm / tr),
            (Some(_), Some(_)) => Some(0.0),
            _ => None,
        }));
        out
    };
    let plus_di = di(&s_plus);
    let minus_di = di(&s_minus);

    let dx: Line = plus_di
        .iter()
        .zip(&minus_di)
        .map(|(p, m)| match (p, m) {
            (Some(p), Some(m)) if p + m > 0.0 => Some(100.0 * (p - m).abs() / (p + m)),
            (Some(_), Some(_)) => Some(0.0),
            _ => None,
        })
        .collect();
    let adx = on_defined(&dx, |v| wilder_smooth(v, length));

    Dmi {
        adx,
        plus_di,
        minus_di,
    }
}
