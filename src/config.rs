use crate::error::{AppError, Result};

/// Directory of extracted ball-by-ball match JSON files (one match per file).
pub const DEFAULT_DATA_DIR: &str = "data";

/// Fallback venue when the info section carries none.
pub const UNKNOWN_VENUE: &str = "Unknown Venue";

/// Full team name → short display acronym. Names not listed here pass
/// through unchanged.
pub const TEAM_ACRONYMS: &[(&str, &str)] = &[
    ("Kolkata Knight Riders", "KKR"),
    ("Royal Challengers Bengaluru", "RCB"),
    ("Chennai Super Kings", "CSK"),
    ("Delhi Capitals", "DC"),
    ("Mumbai Indians", "MI"),
    ("Punjab Kings", "PBKS"),
    ("Rajasthan Royals", "RR"),
    ("Sunrisers Hyderabad", "SRH"),
    ("Lucknow Super Giants", "LSG"),
    ("Gujarat Titans", "GT"),
];

/// Short display form of a team name, or the name itself if unmapped.
pub fn team_acronym(name: &str) -> &str {
    TEAM_ACRONYMS
        .iter()
        .find(|(full, _)| *full == name)
        .map(|(_, short)| *short)
        .unwrap_or(name)
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory of match JSON files (CRICSTATS_DATA_DIR)
    pub data_dir: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let data_dir =
            std::env::var("CRICSTATS_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        if data_dir.is_empty() {
            return Err(AppError::Config(
                "CRICSTATS_DATA_DIR must not be empty".to_string(),
            ));
        }
        Ok(Self {
            data_dir,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_team_maps_to_acronym() {
        assert_eq!(team_acronym("Kolkata Knight Riders"), "KKR");
        assert_eq!(team_acronym("Gujarat Titans"), "GT");
    }

    #[test]
    fn unknown_team_passes_through() {
        assert_eq!(team_acronym("Unknown XI"), "Unknown XI");
    }
}
