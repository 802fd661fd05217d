//! Console report of a tracking record.

use std::fmt::Write;

use cargotrack_protocols::{TrackingRecord, is_known};

/// Formats tracking records for the terminal.
pub struct Reporter;

impl Reporter {
    /// Banner printed when a run starts.
    pub fn banner(reference_id: &str) -> String {
        let rule = "=".repeat(50);
        format!("\n{rule}\nTracking cargo with ID: {reference_id}\n{rule}")
    }

    /// Summary block for `record`.
    pub fn render(record: &TrackingRecord) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "\nTracking Results:");
        let _ = writeln!(out, "{}", "-".repeat(30));
        let _ = writeln!(out, "Reference ID: {}", record.reference_id);
        let _ = writeln!(
            out,
            "Vessel: {} (Voyage: {})",
            record.vessel.name, record.vessel.number
        );
        let _ = writeln!(
            out,
            "Route: {} → {}",
            record.ports.loading, record.ports.discharge
        );
        let _ = writeln!(out, "Status: {}", record.schedule.status);
        let _ = writeln!(out, "ETA: {}", record.schedule.eta);

        if is_known(&record.schedule.last_update) {
            let _ = writeln!(out, "Last Update: {}", record.schedule.last_update);
        }
        if let Some(ref location) = record.current_location {
            let _ = writeln!(out, "Current Location: {}", location);
        }
        if let Some(ref map_path) = record.map_path {
            let _ = writeln!(out, "\nRoute map generated: {}", map_path);
        }

        out
    }

    pub fn print(record: &TrackingRecord) {
        print!("{}", Self::render(record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner() {
        let banner = Reporter::banner("SINI25432400");
        let lines: Vec<&str> = banner.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[2], "Tracking cargo with ID: SINI25432400");
        assert_eq!(lines[3], "=".repeat(50));
    }

    #[test]
    fn test_render_defaults() {
        let out = Reporter::render(&TrackingRecord::new("X1"));
        assert!(out.contains("Reference ID: X1\n"));
        assert!(out.contains("Vessel: N/A (Voyage: N/A)\n"));
        assert!(out.contains("Route: N/A → N/A\n"));
        assert!(out.contains("Status: N/A\nETA: N/A\n"));
        assert!(!out.contains("Last Update"));
        assert!(!out.contains("Current Location"));
        assert!(!out.contains("Route map"));
    }

    #[test]
    fn test_render_optional_lines() {
        let mut record = TrackingRecord::new("X2");
        record.schedule.last_update = "2024-04-20".to_string();
        record.current_location = Some("Suez Canal".to_string());
        record.map_path = Some("tracking_results/route_20240501_120000.html".to_string());

        let out = Reporter::render(&record);
        assert!(out.contains("Last Update: 2024-04-20\n"));
        assert!(out.contains("Current Location: Suez Canal\n"));
        assert!(out.ends_with("\nRoute map generated: tracking_results/route_20240501_120000.html\n"));
    }
}
