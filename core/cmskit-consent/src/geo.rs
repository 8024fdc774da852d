//! Which visitor origins need consent.

/// EEA member states plus the United Kingdom and Switzerland.
pub const CONSENT_REQUIRED_COUNTRIES: [&str; 32] = [
    "AT", "BE", "BG", "CH", "CY", "CZ", "DE", "DK", "EE", "ES", "FI", "FR", "GB", "GR", "HR", "HU",
    "IE", "IS", "IT", "LI", "LT", "LU", "LV", "MT", "NL", "NO", "PL", "PT", "RO", "SE", "SI", "SK",
];

/// Whether a visitor from `country` (ISO 3166-1 alpha-2, any case) must
/// consent. An unknown or empty origin requires consent.
pub fn requires_consent_for_country(country: Option<&str>) -> bool {
    match country.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => CONSENT_REQUIRED_COUNTRIES
            .iter()
            .any(|listed| listed.eq_ignore_ascii_case(code)),
        None => true,
    }
}
