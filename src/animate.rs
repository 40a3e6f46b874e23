//! Counter and progress-bar animation
//!
//! Both ease with jQuery's "swing" curve so pages look the same as before.

use std::f64::consts::PI;

/// jQuery "swing" easing
pub fn swing(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    0.5 - (p * PI).cos() / 2.0
}

/// Leading integer of a counter's text, ignoring thousands separators.
///
/// Mirrors `parseInt`: leading whitespace and a sign are allowed, parsing
/// stops at the first non-digit, and text without leading digits is `None`.
pub fn parse_counter_text(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|&c| c != ',').collect();
    let trimmed = cleaned.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Format with comma thousands separators
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Count from zero up to `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    pub target: i64,
    pub duration_ms: u32,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: u32) -> Self {
        Self { target, duration_ms }
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= f64::from(self.duration_ms)
    }

    /// Value shown `elapsed_ms` into the animation; exactly `target` once finished
    pub fn value_at(&self, elapsed_ms: f64) -> i64 {
        if self.is_finished(elapsed_ms) {
            return self.target;
        }
        let p = elapsed_ms / f64::from(self.duration_ms);
        (self.target as f64 * swing(p)).floor() as i64
    }

    pub fn text_at(&self, elapsed_ms: f64) -> String {
        format_grouped(self.value_at(elapsed_ms))
    }
}

/// Grow a progress bar from 0% to its target width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressAnimation {
    pub target_percent: f64,
    pub duration_ms: u32,
}

impl ProgressAnimation {
    pub fn new(target_percent: f64, duration_ms: u32) -> Self {
        Self {
            target_percent,
            duration_ms,
        }
    }

    /// Target width from `data-width`, falling back to `aria-valuenow`
    pub fn target_from_attrs(data_width: Option<&str>, aria_valuenow: Option<&str>) -> Option<f64> {
        data_width
            .and_then(parse_percent)
            .or_else(|| aria_valuenow.and_then(parse_percent))
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= f64::from(self.duration_ms)
    }

    pub fn width_at(&self, elapsed_ms: f64) -> f64 {
        if self.is_finished(elapsed_ms) {
            return self.target_percent;
        }
        self.target_percent * swing(elapsed_ms / f64::from(self.duration_ms))
    }

    /// CSS width value
    pub fn css_at(&self, elapsed_ms: f64) -> String {
        format!("{}%", self.width_at(elapsed_ms))
    }
}

fn parse_percent(raw: &str) -> Option<f64> {
    raw.trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_swing_endpoints() {
        assert_relative_eq!(swing(0.0), 0.0);
        assert_relative_eq!(swing(0.5), 0.5, epsilon = 1e-12);
        assert_relative_eq!(swing(1.0), 1.0);
        assert_relative_eq!(swing(2.0), 1.0);
    }

    #[test]
    fn test_parse_counter_text() {
        assert_eq!(parse_counter_text("1,234"), Some(1234));
        assert_eq!(parse_counter_text("  42 users"), Some(42));
        assert_eq!(parse_counter_text("-7"), Some(-7));
        assert_eq!(parse_counter_text("n/a"), None);
        assert_eq!(parse_counter_text(""), None);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1000), "1,000");
        assert_eq!(format_grouped(1234567), "1,234,567");
        assert_eq!(format_grouped(-45000), "-45,000");
    }

    #[test]
    fn test_counter_ends_on_target() {
        let counter = CounterAnimation::new(1234, 1500);
        assert_eq!(counter.value_at(0.0), 0);
        let halfway = counter.value_at(750.0);
        assert!((616..=617).contains(&halfway), "halfway value {halfway}");
        assert!(counter.value_at(1200.0) > halfway);
        assert_eq!(counter.text_at(1500.0), "1,234");
        assert_eq!(counter.value_at(9999.0), 1234);
    }

    #[test]
    fn test_progress_target_and_width() {
        assert_eq!(ProgressAnimation::target_from_attrs(Some("75"), Some("10")), Some(75.0));
        assert_eq!(ProgressAnimation::target_from_attrs(None, Some("40")), Some(40.0));
        assert_eq!(ProgressAnimation::target_from_attrs(Some("wide"), None), None);

        let bar = ProgressAnimation::new(80.0, 1000);
        assert_relative_eq!(bar.width_at(500.0), 40.0, epsilon = 1e-9);
        assert_eq!(bar.css_at(1000.0), "80%");
    }
}
