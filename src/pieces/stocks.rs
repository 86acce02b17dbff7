// src/pieces/stocks.rs
//! A fake stock ticker: a 25-day candlestick chart for a four-letter symbol,
//! with axis labels priced off the simulated highs and lows.

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{measure_text, scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

const CLOSE_VARIANCE: f64 = 10.0;
const LOW_HIGH_VARIANCE: f64 = 5.0;
const DATE_MARKERS: usize = 4;

/// One day of trading, in price space: [low, open, close, high].
type Stick = [f64; 4];

/// Simulate the candlesticks. The closing price does a sine-driven walk and
/// each day's wick extent is another sine of the same byte.
fn simulate(open: f64, moves: &[u8]) -> Vec<Stick> {
    let mut sticks = Vec::with_capacity(moves.len());
    let mut last_close = open * 128.0 + 50.0;

    for &byte in moves {
        let open = last_close;
        let close = (0.1337 * byte as f64).sin() * CLOSE_VARIANCE + open;
        let low = open.min(close) - ((0.4242 * byte as f64).sin() * LOW_HIGH_VARIANCE).abs();
        let high = open.max(close) + ((0.1729 * byte as f64).sin() * LOW_HIGH_VARIANCE).abs();

        last_close = close;
        sticks.push([low, open, close, high]);
    }

    sticks
}

/// Month and day-of-month for a day number counted from Jan 1 (= day 1) of
/// a non-leap year, overflowing into the next year past December.
fn month_day(day: i64) -> (u32, u32) {
    const MONTH_LENGTHS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    if day == 0 {
        return (12, 31);
    }
    let mut d = day;
    while d > 365 {
        d -= 365;
    }
    for (month, len) in MONTH_LENGTHS.iter().enumerate() {
        if d <= *len {
            return (month as u32 + 1, d as u32);
        }
        d -= len;
    }
    (12, 31)
}

pub struct Stocks {
    template: ByteTemplate,
}

impl Stocks {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[("name", 4), ("date", 2), ("open", 1), ("moves", 25)])
            .expect("static template");
        Self { template }
    }
}

impl Default for Stocks {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Stocks {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(
            "We generate a 25-day candlestick chart using the `name` buffer \
             to compute a random 4-digit stock symbol. The stock opens at a \
             random value specified by `open` on a random day generated \
             from `date`. For each byte in the `moves` buffer we generate a \
             close, high, and low: the close is a sine of the byte added to \
             the previous close, and the wicks extend by sines of the same \
             byte at other frequencies. These four numbers are used to draw \
             each candlestick, and the global high and low are rendered in \
             the bottom right."
                .to_string(),
        )
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let w = canvas.width;
        let wf = canvas.width as f64;
        let h = canvas.height as f64;
        let s = canvas.width.min(canvas.height);

        let symbol: String = fields
            .bytes("name")?
            .iter()
            .map(|b| (b % 26 + b'A') as char)
            .collect();
        let symbol_size = scale(80.0, s);
        canvas.draw_text(
            &format!("${symbol}"),
            scale(60.0, w),
            h - scale(80.0, canvas.height) - symbol_size,
            symbol_size,
            Rgb::BLACK,
        );

        let left_padding = scale(236.0, w);
        let top_padding = scale(140.0, canvas.height);
        let bottom_padding = scale(400.0, canvas.height);
        let mut bar_width = scale(20.0, w);
        // Keep the body an odd number of pixels so the wick can center.
        if bar_width as i64 % 2 == 0 {
            bar_width += 1.0;
        }
        let half_bar_width = (bar_width / 2.0).floor() + 1.0;
        let bar_distance = scale(40.0, w);

        let moves = fields.bytes("moves")?.to_vec();
        let sticks = simulate(fields.fraction("open")?, &moves);

        let min = sticks.iter().map(|v| v[0]).fold(f64::INFINITY, f64::min);
        let max = sticks
            .iter()
            .map(|v| v[3])
            .fold(f64::NEG_INFINITY, f64::max);
        if !(max > min) {
            return Err(ArtError::DegenerateGeometry(
                "every candlestick is flat".into(),
            ));
        }

        let graph_height = h - (top_padding + bottom_padding);
        let to_y = |price: f64| (price - min) / (max - min) * graph_height + top_padding;

        for (i, stick) in sticks.iter().enumerate() {
            let [low, open, close, high] = stick.map(&to_y);
            let x = left_padding + i as f64 * bar_distance;
            let center = x + half_bar_width;

            canvas.stroke_line(center, low, center, open.min(close), 1.0, Rgb::BLACK);
            canvas.stroke_line(center, high, center, open.max(close), 1.0, Rgb::BLACK);
            canvas.stroke_polygon(
                &[
                    (x, open),
                    (x + bar_width, open),
                    (x + bar_width, close),
                    (x, close),
                ],
                1.0,
                Rgb::BLACK,
            );
        }

        // Global high/low in the bottom right.
        let label_padding = scale(64.0, w);
        let label_size = scale(36.0, s);
        let high_label = format!("{}d high: {max:.2}", moves.len());
        let low_label = format!("{}d low: {min:.2}", moves.len());
        canvas.draw_text(
            &high_label,
            wf - scale(80.0, w) - measure_text(&high_label, label_size),
            h - scale(120.0, canvas.height) - label_size,
            label_size,
            Rgb::BLACK,
        );
        canvas.draw_text(
            &low_label,
            wf - scale(80.0, w) - measure_text(&low_label, label_size),
            h - scale(80.0, canvas.height) - label_size,
            label_size,
            Rgb::BLACK,
        );

        // Date markers along the bottom axis.
        let date_size = scale(30.0, s);
        let first_day = (fields.fraction("date")? * 365.0).floor() as i64;
        let stride = (moves.len() as i64 - 1) / DATE_MARKERS as i64;
        for i in 0..=DATE_MARKERS as i64 {
            let (month, day) = month_day(first_day + i * stride);
            let label = format!("{month}/{day}");
            let x = left_padding + bar_distance * (i * stride) as f64 + half_bar_width;
            canvas.draw_text(
                &label,
                x - measure_text(&label, date_size) / 2.0,
                h - bottom_padding + label_padding - date_size,
                date_size,
                Rgb::BLACK,
            );
        }

        // Price gridline labels on the left.
        for (price, y) in [
            (max, top_padding),
            (min, h - bottom_padding),
            ((max + min) / 2.0, (top_padding + h - bottom_padding) / 2.0),
        ] {
            let label = format!("{price:.2}");
            canvas.draw_text(
                &label,
                left_padding - label_padding - measure_text(&label, date_size),
                y - date_size,
                date_size,
                Rgb::BLACK,
            );
        }

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "18 Apr 2021",
            source: "stocks.rs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closes_chain_day_to_day() {
        let sticks = simulate(0.5, &[10, 200, 37]);
        assert_eq!(sticks.len(), 3);
        for pair in sticks.windows(2) {
            // Today's open is yesterday's close.
            assert_eq!(pair[1][1], pair[0][2]);
        }
        for stick in &sticks {
            let [low, open, close, high] = *stick;
            assert!(low <= open.min(close));
            assert!(high >= open.max(close));
        }
    }

    #[test]
    fn month_day_walks_the_calendar() {
        assert_eq!(month_day(0), (12, 31));
        assert_eq!(month_day(1), (1, 1));
        assert_eq!(month_day(31), (1, 31));
        assert_eq!(month_day(32), (2, 1));
        assert_eq!(month_day(365), (12, 31));
        // Past December the count wraps into the next year.
        assert_eq!(month_day(366), (1, 1));
        assert_eq!(month_day(388), (1, 23));
    }

    #[test]
    fn all_zero_moves_are_degenerate() {
        // sin(0) = 0 everywhere, so every stick collapses to the open.
        let piece = Stocks::new();
        let digest = [0u8; 32];
        let fields = Fields::extract(piece.template(), &digest);
        let mut canvas = Canvas::new(132, 99);
        let err = piece.draw(&mut canvas, &fields, &Default::default());
        assert!(matches!(err, Err(ArtError::DegenerateGeometry(_))));
    }

    #[test]
    fn symbol_maps_bytes_onto_letters() {
        let symbol: String = [0u8, 25, 26, 255].iter().map(|b| (b % 26 + b'A') as char).collect();
        assert_eq!(symbol, "AZAV");
    }
}
