/// Known NC cities, most-covered first. Checked before counties.
const CITIES: &[&str] = &[
    "Raleigh", "Durham", "Chapel Hill", "Cary", "Apex", "Wake Forest",
    "Garner", "Morrisville", "Holly Springs", "Fuquay-Varina",
    "Knightdale", "Zebulon", "Wendell", "Clayton", "Smithfield",
    "Charlotte", "Greensboro", "Winston-Salem", "Fayetteville",
    "Asheville", "Wilmington", "Greenville", "Rocky Mount",
    "High Point", "Concord", "Jacksonville", "Burlington", "Huntersville",
];

const COUNTIES: &[&str] = &[
    "Wake County", "Durham County", "Orange County", "Johnston County",
    "Franklin County", "Granville County", "Harnett County",
    "Mecklenburg County", "Guilford County", "Forsyth County",
    "Buncombe County", "Cumberland County", "New Hanover County",
    "Union County", "Gaston County", "Onslow County",
];

/// Static ordered gazetteer for substring-based location tagging.
/// Immutable after construction; callers inject their own lists if the
/// defaults don't fit.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    cities: Vec<&'static str>,
    counties: Vec<&'static str>,
    state_suffix: &'static str,
    region_label: &'static str,
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self {
            cities: CITIES.to_vec(),
            counties: COUNTIES.to_vec(),
            state_suffix: "NC",
            region_label: "North Carolina",
        }
    }
}

impl Gazetteer {
    pub fn new(cities: Vec<&'static str>, counties: Vec<&'static str>) -> Self {
        Self {
            cities,
            counties,
            ..Self::default()
        }
    }

    /// First gazetteer entry found as a literal substring of the input.
    /// Cities get the state suffix; counties already carry "County" and are
    /// returned as-is. A bare state mention yields the region label.
    pub fn extract(&self, text: &str) -> Option<String> {
        for city in &self.cities {
            if text.contains(city) {
                return Some(format!("{}, {}", city, self.state_suffix));
            }
        }
        for county in &self.counties {
            if text.contains(county) {
                return Some((*county).to_string());
            }
        }
        if text.contains(self.region_label) || text.contains(" NC ") {
            return Some(self.region_label.to_string());
        }
        None
    }

    /// Region label used when nothing more specific matches.
    pub fn region_label(&self) -> &str {
        self.region_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_gets_state_suffix() {
        let g = Gazetteer::default();
        assert_eq!(
            g.extract("Shooting reported in Durham overnight"),
            Some("Durham, NC".to_string())
        );
    }

    #[test]
    fn test_cities_checked_before_counties() {
        let g = Gazetteer::default();
        // "Durham County" contains the city "Durham"; the city wins because
        // cities are checked first.
        assert_eq!(
            g.extract("Durham County deputies respond"),
            Some("Durham, NC".to_string())
        );
    }

    #[test]
    fn test_county_returned_as_is() {
        let g = Gazetteer::default();
        assert_eq!(
            g.extract("Incident in Johnston County on Tuesday"),
            Some("Johnston County".to_string())
        );
    }

    #[test]
    fn test_generic_state_mention() {
        let g = Gazetteer::default();
        assert_eq!(
            g.extract("Storm damage across North Carolina"),
            Some("North Carolina".to_string())
        );
        assert_eq!(
            g.extract("Troopers in NC respond"),
            Some("North Carolina".to_string())
        );
    }

    #[test]
    fn test_no_match() {
        let g = Gazetteer::default();
        assert_eq!(g.extract("Incident reported in Atlanta"), None);
        assert_eq!(g.extract(""), None);
    }
}
