use chrono::NaiveDate;

use crate::model::date::diff_days;

/// Fixed board geometry, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Width of one calendar day. Day zoom has no dynamic scaling.
    pub pixels_per_day: f32,
    /// Strip between the timebox band and the first row.
    pub axis_header_height: f32,
    /// Height of the timebox band when timeboxes are shown.
    pub timebox_band_height: f32,
    pub row_header_height: f32,
    pub task_slot_height: f32,
    pub row_footer_height: f32,
    pub row_margin: f32,
    pub min_days: i64,
    pub future_padding_days: i64,
    pub min_glyph_width: f32,
    /// Grab zone at each end of a glyph that starts a resize instead of a move.
    pub edge_handle_width: f32,
    pub min_canvas_height: f32,
    pub glyph_height: f32,
    pub glyph_height_with_owner: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            pixels_per_day: 40.0,
            axis_header_height: 10.0,
            timebox_band_height: 30.0,
            row_header_height: 40.0,
            task_slot_height: 110.0,
            row_footer_height: 40.0,
            row_margin: 10.0,
            min_days: 90,
            future_padding_days: 30,
            min_glyph_width: 10.0,
            edge_handle_width: 10.0,
            min_canvas_height: 600.0,
            glyph_height: 65.0,
            glyph_height_with_owner: 90.0,
        }
    }
}

impl LayoutMetrics {
    /// Convert a date to an x-pixel offset from `reference`.
    pub fn date_to_x(&self, date: NaiveDate, reference: NaiveDate) -> f32 {
        diff_days(date, reference) as f32 * self.pixels_per_day
    }

    /// Whole days covered by a horizontal pointer displacement, rounded to
    /// the nearest day.
    pub fn day_delta(&self, delta_x: f32) -> i64 {
        (delta_x / self.pixels_per_day).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date::parse_date;

    #[test]
    fn day_delta_rounds_to_nearest_day() {
        let m = LayoutMetrics::default();
        assert_eq!(m.day_delta(19.0), 0);
        assert_eq!(m.day_delta(20.0), 1);
        assert_eq!(m.day_delta(-61.0), -2);
        assert_eq!(m.day_delta(200.0), 5);
    }

    #[test]
    fn date_maps_to_its_column_offset() {
        let m = LayoutMetrics::default();
        let reference = parse_date("2024-01-01").unwrap();
        let date = parse_date("2024-01-11").unwrap();
        assert_eq!(m.date_to_x(date, reference), 400.0);
        assert_eq!(m.date_to_x(reference, reference), 0.0);
    }
}
