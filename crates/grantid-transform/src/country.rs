/// Map a country name, as found in funder exports, to its two-letter code.
///
/// The table covers the spellings seen in practice; unknown names yield no
/// code and the affiliation is emitted without a country attribute.
pub fn country_code(name: &str) -> Option<&'static str> {
    match name.trim().to_ascii_uppercase().as_str() {
        "CANADA" => Some("CA"),
        "UNITED STATES" | "USA" => Some("US"),
        "FRANCE" => Some("FR"),
        "GERMANY" => Some("DE"),
        "UNITED KINGDOM" | "UK" => Some("GB"),
        "NETHERLANDS" | "NEDERLAND" => Some("NL"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::country_code;

    #[test]
    fn known_spellings_resolve() {
        assert_eq!(country_code("Canada"), Some("CA"));
        assert_eq!(country_code("CANADA"), Some("CA"));
        assert_eq!(country_code("Nederland"), Some("NL"));
        assert_eq!(country_code(" UK "), Some("GB"));
    }

    #[test]
    fn unknown_names_yield_nothing() {
        assert_eq!(country_code("Atlantis"), None);
        assert_eq!(country_code(""), None);
    }
}
