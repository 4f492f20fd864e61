//! Known testmy.net server locations

/// A test server location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Short code, also the server's host name prefix
    pub code: &'static str,
    pub description: &'static str,
}

pub const LOCATIONS: &[Location] = &[
    Location { code: "au2", description: "Australia >> Sydney, AU" },
    Location { code: "ca", description: "Bay Area US >> California, CA, USA" },
    Location { code: "co", description: "Central US >> Colorado Springs, CO, USA" },
    Location { code: "de", description: "Europe >> Frankfurt, DE" },
    Location { code: "fl", description: "East Coast US >> Miami, FL" },
    Location { code: "in", description: "Asia >> Bangalore, IN" },
    Location { code: "jp", description: "Asia >> Tokyo, JP" },
    Location { code: "lax", description: "West Coast US >> Los Angeles, CA, USA" },
    Location { code: "ny", description: "East Coast US >> New York, NY, USA" },
    Location { code: "sf", description: "West Coast US >> San Francisco, CA, USA" },
    Location { code: "sg", description: "Asia >> Singapore, SG" },
    Location { code: "tx", description: "Central US >> Dallas, TX, USA" },
    Location { code: "uk", description: "Europe >> London, GB" },
];

/// Look up a location by its exact (case-sensitive) code
pub fn find_location(code: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|location| location.code == code)
}
