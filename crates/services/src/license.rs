use std::fmt;

use chrono::NaiveDate;
use drive_core::model::UserProgress;
use serde::Serialize;

use crate::error::LicenseError;

/// License class printed on every issued card.
pub const LICENSE_CLASS: &str = "C (Regular)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LicenseStatus {
    Valid,
}

/// The license artifact shown after passing the final exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverLicense {
    pub class: &'static str,
    pub holder: String,
    pub issued_on: NaiveDate,
    pub status: LicenseStatus,
}

impl DriverLicense {
    /// Produce the artifact for a learner whose license flag is set.
    ///
    /// # Errors
    ///
    /// Returns `LicenseError::NotIssued` when the flag is unset and
    /// `LicenseError::EmptyHolder` for a blank name.
    pub fn for_progress(
        progress: &UserProgress,
        holder: &str,
        issued_on: NaiveDate,
    ) -> Result<Self, LicenseError> {
        if !progress.has_license() {
            return Err(LicenseError::NotIssued);
        }
        let holder = holder.trim();
        if holder.is_empty() {
            return Err(LicenseError::EmptyHolder);
        }
        Ok(Self {
            class: LICENSE_CLASS,
            holder: holder.to_owned(),
            issued_on,
            status: LicenseStatus::Valid,
        })
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseStatus::Valid => write!(f, "VALID"),
        }
    }
}

impl fmt::Display for DriverLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DRIVER LICENSE - DRIVESAFE STATE")?;
        writeln!(f, "  CLASS   {}", self.class)?;
        writeln!(f, "  NAME    {}", self.holder)?;
        writeln!(f, "  ISSUED  {}", self.issued_on.format("%m/%d/%Y"))?;
        write!(f, "  STATUS  {}", self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn requires_issued_flag() {
        let progress = UserProgress::default();
        assert_eq!(
            DriverLicense::for_progress(&progress, "Alex Driver", date()),
            Err(LicenseError::NotIssued)
        );
    }

    #[test]
    fn requires_holder_name() {
        let mut progress = UserProgress::default();
        progress.issue_license();
        assert_eq!(
            DriverLicense::for_progress(&progress, "   ", date()),
            Err(LicenseError::EmptyHolder)
        );
    }

    #[test]
    fn renders_card() {
        let mut progress = UserProgress::default();
        progress.issue_license();
        let license = DriverLicense::for_progress(&progress, " Alex Driver ", date()).unwrap();
        assert_eq!(license.holder, "Alex Driver");

        let text = license.to_string();
        assert!(text.contains("C (Regular)"));
        assert!(text.contains("03/09/2024"));
        assert!(text.ends_with("STATUS  VALID"));
    }
}
