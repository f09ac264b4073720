//! Static country dataset and selection catalogs
//!
//! The default dataset ships inside the binary (`data/countries.json`).
//! A replacement file can be supplied through [`crate::loader::load_dataset`].

use crate::loader::{parse_countries, sanitize_code};
use crate::{AnalyzerError, Country, Result};
use std::collections::HashSet;
use tracing::info;

/// Embedded default dataset
const EMBEDDED_COUNTRIES: &str = include_str!("../data/countries.json");

/// Professions offered for selection
pub const PROFESSIONS: [&str; 25] = [
    "Software Engineer",
    "Data Scientist",
    "Product Manager",
    "Marketing Manager",
    "Financial Analyst",
    "Mechanical Engineer",
    "Registered Nurse",
    "Teacher",
    "Graphic Designer",
    "Sales Manager",
    "Consultant",
    "Researcher",
    "Project Manager",
    "Business Analyst",
    "UX/UI Designer",
    "Operations Manager",
    "HR Manager",
    "Accountant",
    "Civil Engineer",
    "Healthcare Professional",
    "Doctor",
    "Lawyer",
    "Architect",
    "Chef",
    "Pharmacist",
];

/// Visa types offered for selection
pub const VISA_TYPES: [&str; 8] = [
    "Work Visa",
    "Student Visa",
    "Investment Visa",
    "Family Reunification",
    "Skilled Migrant Visa",
    "Startup Visa",
    "Freelancer Visa",
    "Tourist Visa",
];

/// Read-only collection of countries, in load order
#[derive(Debug, Clone)]
pub struct Dataset {
    countries: Vec<Country>,
}

impl Dataset {
    /// Build from already-validated records. Rejects an empty list and
    /// duplicate codes.
    pub fn from_countries(countries: Vec<Country>) -> Result<Self> {
        if countries.is_empty() {
            return Err(AnalyzerError::EmptyDataset);
        }

        let mut seen = HashSet::with_capacity(countries.len());
        for country in &countries {
            if !seen.insert(country.code.as_str()) {
                return Err(AnalyzerError::DuplicateCountry(country.code.clone()));
            }
        }

        info!("Dataset ready with {} countries", countries.len());
        Ok(Self { countries })
    }

    /// The dataset compiled into the crate
    pub fn embedded() -> Result<Self> {
        Self::from_countries(parse_countries(EMBEDDED_COUNTRIES)?)
    }

    /// Look up a country by code (case-insensitive)
    pub fn get(&self, code: &str) -> Option<&Country> {
        let code = sanitize_code(code);
        self.countries.iter().find(|c| c.code == code)
    }

    /// Look up a country, failing on unknown codes
    pub fn require(&self, code: &str) -> Result<&Country> {
        self.get(code)
            .ok_or_else(|| AnalyzerError::UnknownCountry(code.to_string()))
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Countries ordered by display name
    pub fn sorted_by_name(&self) -> Vec<&Country> {
        let mut sorted: Vec<&Country> = self.countries.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(|c| c.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VisaDifficulty;

    #[test]
    fn test_embedded_dataset_loads() {
        let dataset = Dataset::embedded().unwrap();
        assert_eq!(dataset.len(), 15);

        let nl = dataset.get("NL").unwrap();
        assert_eq!(nl.name, "Netherlands");
        assert_eq!(nl.metrics.gdp_per_capita, 52331.0);
        assert_eq!(nl.metrics.visa_difficulty, VisaDifficulty::Medium);
        assert_eq!(nl.pros.len(), 6);
        assert_eq!(nl.cons.len(), 6);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dataset = Dataset::embedded().unwrap();
        assert_eq!(dataset.get("ch").map(|c| c.name.as_str()), Some("Switzerland"));
        assert!(dataset.get("XX").is_none());
        assert!(matches!(dataset.require("XX"), Err(AnalyzerError::UnknownCountry(_))));
    }

    #[test]
    fn test_sorted_by_name() {
        let dataset = Dataset::embedded().unwrap();
        let names: Vec<&str> = dataset.sorted_by_name().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"Australia"));
        assert_eq!(names.last(), Some(&"United States"));
        let mut expected = names.clone();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let dataset = Dataset::embedded().unwrap();
        let mut countries = dataset.countries().to_vec();
        countries.push(countries[0].clone());
        let err = Dataset::from_countries(countries).unwrap_err();
        assert!(matches!(err, AnalyzerError::DuplicateCountry(code) if code == "NL"));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert!(matches!(Dataset::from_countries(vec![]), Err(AnalyzerError::EmptyDataset)));
    }

    #[test]
    fn test_catalogs() {
        assert!(VISA_TYPES.contains(&crate::DEFAULT_VISA_TYPE));
        assert!(PROFESSIONS.contains(&"Software Engineer"));
    }
}
