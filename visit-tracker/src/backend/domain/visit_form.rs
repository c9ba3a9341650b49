//! Visit form validation for the visit tracker.
//!
//! Parses the raw text of the visit form into a `VisitDraft`. The record type
//! itself accepts any input, so this is the one place where submissions are
//! rejected: an empty or over-long title, and a rating that is missing, not a
//! whole number, or outside the configured scale. The descriptive fields are
//! free text and pass through untouched.

use shared::{Coords, VisitForm, VisitFormConfig, VisitFormValidation, VisitValidationError};

use crate::backend::domain::models::VisitDraft;

/// Service that owns the visit form rules
#[derive(Debug, Clone)]
pub struct VisitFormService {
    config: VisitFormConfig,
}

impl Default for VisitFormService {
    fn default() -> Self {
        Self::new()
    }
}

impl VisitFormService {
    pub fn new() -> Self {
        Self {
            config: VisitFormConfig::default(),
        }
    }

    pub fn with_config(config: VisitFormConfig) -> Self {
        Self { config }
    }

    /// Validate every field and collect all errors
    pub fn validate(&self, form: &VisitForm) -> VisitFormValidation {
        let mut errors = Vec::new();

        let title = form.title.trim();
        if title.is_empty() {
            errors.push(VisitValidationError::EmptyTitle);
        } else if title.chars().count() > self.config.max_title_length {
            errors.push(VisitValidationError::TitleTooLong(title.chars().count()));
        }

        let parsed_rating = match self.parse_rating(&form.rating) {
            Ok(rating) => Some(rating),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        VisitFormValidation {
            is_valid: errors.is_empty(),
            errors,
            parsed_rating,
        }
    }

    /// Parse and range-check the rating text
    pub fn parse_rating(&self, input: &str) -> Result<i32, VisitValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VisitValidationError::EmptyRating);
        }

        let rating = trimmed
            .parse::<i32>()
            .map_err(|e| VisitValidationError::InvalidRatingFormat(e.to_string()))?;

        if rating < self.config.min_rating || rating > self.config.max_rating {
            return Err(VisitValidationError::RatingOutOfRange {
                min: self.config.min_rating,
                max: self.config.max_rating,
            });
        }

        Ok(rating)
    }

    /// Build a draft for `coords`, or return every reason the form was rejected
    pub fn to_draft(&self, coords: Coords, form: &VisitForm) -> Result<VisitDraft, Vec<VisitValidationError>> {
        let validation = self.validate(form);
        match validation.parsed_rating {
            Some(rating) if validation.is_valid => Ok(VisitDraft {
                coords,
                title: form.title.trim().to_string(),
                rating,
                bathroom: form.bathroom.clone(),
                feeding: form.feeding.clone(),
                changing: form.changing.clone(),
                summary: form.summary.clone(),
            }),
            _ => Err(validation.errors),
        }
    }

    /// User-facing message for a validation error
    pub fn get_error_message(&self, error: &VisitValidationError) -> String {
        match error {
            VisitValidationError::EmptyTitle => "Please give this place a name".to_string(),
            VisitValidationError::TitleTooLong(len) => format!(
                "Name is too long ({} characters). Maximum is {}.",
                len, self.config.max_title_length
            ),
            VisitValidationError::EmptyRating => "Please enter a rating".to_string(),
            VisitValidationError::InvalidRatingFormat(_) => {
                format!(
                    "Rating must be a whole number from {} to {}",
                    self.config.min_rating, self.config.max_rating
                )
            }
            VisitValidationError::RatingOutOfRange { min, max } => {
                format!("Rating must be between {} and {}", min, max)
            }
        }
    }

    /// First error message, for forms that show a single line
    pub fn get_first_error_message(&self, errors: &[VisitValidationError]) -> Option<String> {
        errors.first().map(|e| self.get_error_message(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, rating: &str) -> VisitForm {
        VisitForm {
            title: title.to_string(),
            rating: rating.to_string(),
            bathroom: "clean".to_string(),
            feeding: String::new(),
            changing: "  one table ".to_string(),
            summary: "ok".to_string(),
        }
    }

    #[test]
    fn test_validate_success() {
        let service = VisitFormService::new();
        let validation = service.validate(&form("Museum", " 8 "));

        assert!(validation.is_valid);
        assert!(validation.errors.is_empty());
        assert_eq!(validation.parsed_rating, Some(8));
    }

    #[test]
    fn test_empty_title_rejected() {
        let service = VisitFormService::new();
        let validation = service.validate(&form("   ", "5"));

        assert!(!validation.is_valid);
        assert_eq!(validation.errors, vec![VisitValidationError::EmptyTitle]);
    }

    #[test]
    fn test_title_too_long_rejected() {
        let service = VisitFormService::with_config(VisitFormConfig {
            max_title_length: 4,
            ..VisitFormConfig::default()
        });
        let validation = service.validate(&form("Garden", "5"));
        assert_eq!(validation.errors, vec![VisitValidationError::TitleTooLong(6)]);
    }

    #[test]
    fn test_unparsable_rating_rejected() {
        let service = VisitFormService::new();
        let validation = service.validate(&form("Zoo", "great"));

        assert!(!validation.is_valid);
        assert!(matches!(validation.errors[0], VisitValidationError::InvalidRatingFormat(_)));
        assert_eq!(validation.parsed_rating, None);
    }

    #[test]
    fn test_fractional_rating_rejected() {
        let service = VisitFormService::new();
        assert!(matches!(
            service.parse_rating("7.5"),
            Err(VisitValidationError::InvalidRatingFormat(_))
        ));
    }

    #[test]
    fn test_empty_and_out_of_range_rating() {
        let service = VisitFormService::new();
        assert_eq!(service.parse_rating(""), Err(VisitValidationError::EmptyRating));
        assert_eq!(
            service.parse_rating("11"),
            Err(VisitValidationError::RatingOutOfRange { min: 1, max: 10 })
        );
        assert_eq!(
            service.parse_rating("0"),
            Err(VisitValidationError::RatingOutOfRange { min: 1, max: 10 })
        );
        assert_eq!(service.parse_rating("1"), Ok(1));
        assert_eq!(service.parse_rating("10"), Ok(10));
    }

    #[test]
    fn test_collects_all_errors() {
        let service = VisitFormService::new();
        let validation = service.validate(&form("", ""));
        assert_eq!(
            validation.errors,
            vec![VisitValidationError::EmptyTitle, VisitValidationError::EmptyRating]
        );
    }

    #[test]
    fn test_to_draft_trims_title_and_keeps_free_text() {
        let service = VisitFormService::new();
        let draft = service
            .to_draft(Coords::new(1.0, 2.0), &form("  Cafe  ", "4"))
            .unwrap();

        assert_eq!(draft.title, "Cafe");
        assert_eq!(draft.rating, 4);
        assert_eq!(draft.changing, "  one table ");
        assert_eq!(draft.feeding, "");
        assert_eq!(draft.coords, Coords::new(1.0, 2.0));
    }

    #[test]
    fn test_error_messages() {
        let service = VisitFormService::new();
        let errors = vec![VisitValidationError::EmptyRating, VisitValidationError::EmptyTitle];
        assert_eq!(
            service.get_first_error_message(&errors),
            Some("Please enter a rating".to_string())
        );
        assert_eq!(
            service.get_error_message(&VisitValidationError::RatingOutOfRange { min: 1, max: 10 }),
            "Rating must be between 1 and 10"
        );
    }
}
