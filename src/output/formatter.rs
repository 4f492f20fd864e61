//! Formatting traits and implementations

use crate::models::Measurement;
use std::time::Duration;

/// Renders a measurement as the single result line
pub trait OutputFormatter {
    /// Format the result for `server`, without a trailing newline
    fn format_result(&self, server: &str, measurement: &Measurement) -> String;
}

/// `Downloaded <bytes> bytes from <server> in <duration>. Bandwidth = <mbps>Mbps`
#[derive(Debug, Default, Clone, Copy)]
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_result(&self, server: &str, measurement: &Measurement) -> String {
        format!(
            "Downloaded {} bytes from {} in {}. Bandwidth = {:.3}Mbps",
            measurement.bytes,
            server,
            format_duration(measurement.elapsed),
            measurement.bandwidth_mbps()
        )
    }
}

/// `server,bytes,seconds,mbps` with three decimals for seconds and mbps
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvFormatter;

impl OutputFormatter for CsvFormatter {
    fn format_result(&self, server: &str, measurement: &Measurement) -> String {
        format!(
            "{},{},{:.3},{:.3}",
            server,
            measurement.bytes,
            measurement.seconds(),
            measurement.bandwidth_mbps()
        )
    }
}

/// Compact duration such as `8s`, `1m2.5s`, `1h0m0s` or `350ms`.
///
/// Units below a second are used only for durations under one second.
/// Trailing zeros of the fraction are dropped.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return format!("{}µs", with_fraction(nanos / 1_000, nanos % 1_000, 3));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", with_fraction(nanos / 1_000_000, nanos % 1_000_000, 6));
    }

    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = with_fraction(
        u128::from(total_secs % 60),
        u128::from(duration.subsec_nanos()),
        9,
    );

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    out.push_str(&seconds);
    out.push('s');
    out
}

fn with_fraction(whole: u128, fraction: u128, digits: usize) -> String {
    if fraction == 0 {
        return whole.to_string();
    }
    let fraction = format!("{:0width$}", fraction, width = digits);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_line() {
        let m = Measurement::new(1_000_000, Duration::from_secs(8));
        assert_eq!(
            CsvFormatter.format_result("http://ca.testmy.net", &m),
            "http://ca.testmy.net,1000000,8.000,1.000"
        );

        let m = Measurement::new(10_485_760, Duration::from_millis(2345));
        assert_eq!(
            CsvFormatter.format_result("http://uk.testmy.net", &m),
            "http://uk.testmy.net,10485760,2.345,35.772"
        );
    }

    #[test]
    fn test_human_line() {
        let m = Measurement::new(1_000_000, Duration::from_secs(8));
        assert_eq!(
            HumanFormatter.format_result("http://ca.testmy.net", &m),
            "Downloaded 1000000 bytes from http://ca.testmy.net in 8s. Bandwidth = 1.000Mbps"
        );
    }

    #[test]
    fn test_zero_duration_renders_infinity() {
        let m = Measurement::new(5, Duration::ZERO);
        assert_eq!(CsvFormatter.format_result("s", &m), "s,5,0.000,inf");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_nanos(750)), "750ns");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.5ms");
        assert_eq!(format_duration(Duration::from_nanos(12_300)), "12.3µs");
        assert_eq!(format_duration(Duration::from_millis(350)), "350ms");
        assert_eq!(format_duration(Duration::from_secs(8)), "8s");
        assert_eq!(format_duration(Duration::from_millis(62_500)), "1m2.5s");
        assert_eq!(format_duration(Duration::from_secs(15 * 60)), "15m0s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h2m5s");
    }
}
