//! Axis tick derivation: minor ticks at each hour boundary inside the
//! domain, major ticks at each midnight.

use chrono::{DateTime, Timelike};
use laneboard_protocol::{AxisTicks, TimeSpan};

const HOUR_MS: i64 = 3_600_000;

pub fn build_ticks(domain: TimeSpan) -> AxisTicks {
    let mut minor_ms = Vec::new();
    let mut major_ms = Vec::new();

    let mut t = align_up_to_hour(domain.start_ms);
    while t <= domain.end_ms {
        minor_ms.push(t);
        if is_midnight(t) {
            major_ms.push(t);
        }
        t += HOUR_MS;
    }

    AxisTicks { minor_ms, major_ms }
}

fn align_up_to_hour(ms: i64) -> i64 {
    let floored = ms.div_euclid(HOUR_MS) * HOUR_MS;
    if floored < ms { floored + HOUR_MS } else { floored }
}

fn is_midnight(ms: i64) -> bool {
    DateTime::from_timestamp_millis(ms).is_some_and(|dt| dt.hour() == 0)
}
