//! Current values of the country, indicator and year selectors.

use crate::error::{Error, Result};
use crate::models::Indicator;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub country: Option<String>,
    pub indicator: Option<Indicator>,
    pub year: Option<i32>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_indicator(mut self, indicator: Indicator) -> Self {
        self.indicator = Some(indicator);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Country and indicator required by the line chart. A blank country counts as unselected.
    pub fn line_target(&self) -> Result<(&str, Indicator)> {
        let country = self
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(Error::Selection("country"))?;
        let indicator = self.indicator.ok_or(Error::Selection("indicator"))?;
        Ok((country, indicator))
    }

    /// Year required by the bubble chart.
    pub fn bubble_year(&self) -> Result<i32> {
        self.year.ok_or(Error::Selection("year"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_name_the_selector() {
        let s = Selection::new().with_indicator(Indicator::Sv);
        assert!(matches!(s.line_target(), Err(Error::Selection("country"))));

        let s = Selection::new().with_country("  ");
        assert!(matches!(s.line_target(), Err(Error::Selection("country"))));

        let s = Selection::new().with_country("BE");
        assert!(matches!(s.line_target(), Err(Error::Selection("indicator"))));

        assert!(matches!(
            Selection::new().bubble_year(),
            Err(Error::Selection("year"))
        ));
    }

    #[test]
    fn complete_selection_passes_through() {
        let s = Selection::new()
            .with_country("FR")
            .with_indicator(Indicator::Pib)
            .with_year(2020);
        assert_eq!(s.line_target().unwrap(), ("FR", Indicator::Pib));
        assert_eq!(s.bubble_year().unwrap(), 2020);
    }
}
