use event_results::PdgaNumber;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scored event for one player, as handed to a persistence exporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "PDGA Number")]
    pub pdga_number: PdgaNumber,
    #[serde(rename = "Event Name")]
    pub event_name: String,
    #[serde(rename = "Place")]
    pub place: u32,
    #[serde(rename = "Event Year")]
    pub event_year: i32,
    #[serde(rename = "Event Status")]
    pub event_status: String,
}

/// A player's season line for reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub name: String,
    pub pdga_number: PdgaNumber,
    pub season: i32,
    pub number_of_events: usize,
    pub total_score: u64,
    pub average_score: f64,
    pub weighted_average: Option<f64>,
}

impl fmt::Display for SeasonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "*".repeat(self.name.chars().count() + 6);
        writeln!(f, "{separator}")?;
        writeln!(f, "-- {} --", self.name)?;
        writeln!(f, "{separator}")?;
        writeln!(f, "Number of events: {}", self.number_of_events)?;
        writeln!(f, "Total score: {}", self.total_score)?;
        writeln!(f, "Average score: {}", self.average_score)?;
        match self.weighted_average {
            Some(weighted) => write!(f, "Weighted average: {weighted}"),
            None => write!(f, "Weighted average: No events"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_row_column_names() {
        let row = ExportRow {
            name: "Paul Mcbeth".to_string(),
            pdga_number: PdgaNumber(27523),
            event_name: "Open".to_string(),
            place: 3,
            event_year: 2023,
            event_status: "DNF".to_string(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["PDGA Number"], 27523);
        assert_eq!(json["Event Status"], "DNF");
        assert_eq!(json["Place"], 3);
    }

    #[test]
    fn test_summary_display() {
        let summary = SeasonSummary {
            name: "Paul Mcbeth".to_string(),
            pdga_number: PdgaNumber(27523),
            season: 2023,
            number_of_events: 2,
            total_score: 4,
            average_score: 2.0,
            weighted_average: Some(4.0),
        };
        let text = summary.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "*****************");
        assert_eq!(lines[1], "-- Paul Mcbeth --");
        assert_eq!(lines[3], "Number of events: 2");
        assert_eq!(lines[4], "Total score: 4");
        assert_eq!(lines[5], "Average score: 2");
        assert_eq!(lines[6], "Weighted average: 4");
    }
}
