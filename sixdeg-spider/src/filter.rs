/// Keyword-relevance gate applied to suggestion headlines before a
/// candidate profile is crawled.
#[derive(Debug, Clone)]
pub struct TermFilter {
    terms: Vec<String>,
}

impl TermFilter {
    /// Terms are lowercased once here; matching is case-insensitive
    /// substring containment.
    pub fn new(terms: &[String]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// A missing headline is a hard rejection, even with no terms
    /// configured. With an empty term set every present headline passes.
    pub fn admits(&self, headline: Option<&str>) -> bool {
        let Some(headline) = headline else {
            return false;
        };
        if self.terms.is_empty() {
            return true;
        }
        let headline = headline.to_lowercase();
        self.terms.iter().any(|term| headline.contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(terms: &[&str]) -> TermFilter {
        let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
        TermFilter::new(&terms)
    }

    #[test]
    fn matches_case_insensitive_substrings() {
        let f = filter(&["engineering recruiter"]);
        assert!(f.admits(Some("Senior Engineering Recruiter at Acme")));
        assert!(!f.admits(Some("Software Engineer")));
    }

    #[test]
    fn any_one_term_is_enough() {
        let f = filter(&["technical recruiter", "engineering recruiter"]);
        assert!(f.admits(Some("Technical Recruiter, Platform")));
        assert!(f.admits(Some("ENGINEERING RECRUITER")));
        assert!(!f.admits(Some("Account Executive")));
    }

    #[test]
    fn empty_term_set_admits_everything_with_a_headline() {
        let f = filter(&[]);
        assert!(f.admits(Some("literally anything")));
    }

    #[test]
    fn missing_headline_is_always_rejected() {
        assert!(!filter(&[]).admits(None));
        assert!(!filter(&["recruiter"]).admits(None));
    }
}
