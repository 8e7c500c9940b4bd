use cw_core::Category;

/// Ordered keyword-group rules. Order matters: an article mentioning both
/// "wanted" and "drug" resolves by priority, not majority vote.
const RULES: &[(&[&str], Category)] = &[
    (&["wanted", "fugitive", "manhunt", "warrant"], Category::Wanted),
    (&["missing", "amber alert", "silver alert"], Category::MissingPerson),
    (&["arrest", "charged", "custody"], Category::Arrest),
    (
        &["murder", "homicide", "killed", "death investigation"],
        Category::Homicide,
    ),
    (&["shooting", "shot", "gunfire"], Category::Shooting),
    (
        &["drug", "narcotic", "trafficking", "fentanyl"],
        Category::DrugOffense,
    ),
    (
        &["theft", "burglary", "robbery", "stolen"],
        Category::Theft,
    ),
    (&["assault", "battery", "domestic"], Category::Assault),
    (&["dui", "dwi", "impaired"], Category::DuiDwi),
    (&["gang"], Category::GangActivity),
    (&["fraud", "scam", "embezzlement"], Category::Fraud),
    (&["traffic", "highway", "accident"], Category::TrafficSafety),
];

/// Keyword screen deciding whether an item belongs on a crime site at all.
/// Used to filter general-news feeds; police department sources skip it.
const CRIME_KEYWORDS: &[&str] = &[
    "arrest", "charged", "police", "sheriff", "crime", "wanted",
    "missing", "murder", "homicide", "shooting", "shot", "killed",
    "robbery", "theft", "stolen", "burglary", "drug", "trafficking",
    "assault", "battery", "domestic", "abuse", "investigation",
    "suspect", "victim", "convicted", "sentenced", "trial", "court",
    "jail", "prison", "fugitive", "manhunt", "dui", "dwi",
    "hit-and-run", "crash death", "fatal", "body found", "sexual assault",
    "rape", "kidnapping", "abduction", "fraud", "scam", "embezzlement",
    "gang", "weapon", "firearm", "gun", "knife", "stabbing",
];

/// Deterministic keyword classifier over a fixed category set.
///
/// Matching is plain substring containment, not word-boundary tokenization.
/// That is intentionally simple and can false-positive on incidental
/// substrings ("dui" inside another word); the imprecision is accepted.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<(Vec<&'static str>, Category)>,
    crime_keywords: Vec<&'static str>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            rules: RULES
                .iter()
                .map(|(kws, cat)| (kws.to_vec(), *cat))
                .collect(),
            crime_keywords: CRIME_KEYWORDS.to_vec(),
        }
    }
}

impl Classifier {
    /// Map free text to a category; the first matching keyword group wins.
    /// Always returns a member of the enum, `CrimeNews` when nothing matches.
    pub fn classify(&self, text: &str) -> Category {
        let lower = text.to_lowercase();
        for (keywords, category) in &self.rules {
            if keywords.iter().any(|kw| lower.contains(kw)) {
                return *category;
            }
        }
        Category::CrimeNews
    }

    /// Classify the combined title + description, the way feed items are tagged.
    pub fn classify_pair(&self, title: &str, description: &str) -> Category {
        self.classify(&format!("{} {}", title, description))
    }

    /// True when the combined text contains any crime keyword.
    pub fn is_crime_related(&self, title: &str, description: &str) -> bool {
        let lower = format!("{} {}", title, description).to_lowercase();
        self.crime_keywords.iter().any(|kw| lower.contains(kw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_category_for_no_match() {
        let c = Classifier::default();
        assert_eq!(c.classify(""), Category::CrimeNews);
        assert_eq!(c.classify("city council budget meeting"), Category::CrimeNews);
    }

    #[test]
    fn test_priority_order_wins() {
        let c = Classifier::default();
        // Mentions both "wanted" and "drug" — wanted outranks drug.
        assert_eq!(
            c.classify("wanted suspect in drug trafficking case"),
            Category::Wanted
        );
        // Arrest outranks shooting.
        assert_eq!(
            c.classify("Police arrest man after downtown shooting"),
            Category::Arrest
        );
    }

    #[test]
    fn test_each_group_reachable() {
        let c = Classifier::default();
        assert_eq!(c.classify("fugitive on the run"), Category::Wanted);
        assert_eq!(c.classify("silver alert issued"), Category::MissingPerson);
        assert_eq!(c.classify("suspect in custody"), Category::Arrest);
        assert_eq!(c.classify("homicide detectives on scene"), Category::Homicide);
        assert_eq!(c.classify("gunfire reported overnight"), Category::Shooting);
        assert_eq!(c.classify("fentanyl seizure"), Category::DrugOffense);
        assert_eq!(c.classify("stolen vehicle recovered"), Category::Theft);
        assert_eq!(c.classify("domestic dispute"), Category::Assault);
        assert_eq!(c.classify("dwi checkpoint"), Category::DuiDwi);
        assert_eq!(c.classify("gang task force"), Category::GangActivity);
        assert_eq!(c.classify("embezzlement scheme uncovered"), Category::Fraud);
        assert_eq!(c.classify("highway safety campaign"), Category::TrafficSafety);
    }

    #[test]
    fn test_case_insensitive() {
        let c = Classifier::default();
        assert_eq!(c.classify("WANTED: Armed and Dangerous"), Category::Wanted);
    }

    #[test]
    fn test_substring_matching_is_documented_behavior() {
        let c = Classifier::default();
        // "shot" inside "gunshot" still matches — containment, not tokens.
        assert_eq!(c.classify("gunshot wounds reported"), Category::Shooting);
    }

    #[test]
    fn test_crime_screen() {
        let c = Classifier::default();
        assert!(c.is_crime_related("Police make arrest", "suspect in custody"));
        assert!(!c.is_crime_related("Farmers market opens", "fresh produce downtown"));
    }
}
