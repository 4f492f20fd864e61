//! Help text and the location listing

use crate::config::locations::Location;

/// Usage examples appended to `--help`
pub const EXAMPLES: &str = "\
Examples:
  testmynet-cli                       Test against the default location (ca)
  testmynet-cli --location uk --csv   Test against London, print a CSV line
  testmynet-cli --location help       List all known locations
  testmynet-cli --dry-run --verbose   Check the setup without timing a transfer";

/// Render the location table, sorted by code.
///
/// Codes are left aligned in a four character column.
pub fn location_list(locations: &[Location]) -> String {
    let mut sorted: Vec<&Location> = locations.iter().collect();
    sorted.sort_by(|a, b| a.code.cmp(b.code));

    let mut listing = String::from("Available Locations:\n");
    for location in sorted {
        let code: String = location.code.chars().take(4).collect();
        listing.push_str(&format!("{:<4} {}\n", code, location.description));
    }
    listing
}
