// src/common/validation.rs

use chrono::NaiveDate;
use validator::{ValidationError, ValidationErrors};

use crate::common::{error::AppError, text};

// Acumula erros por campo para formulários validados à mão
// (campos opcionais no JSON, obrigatoriedade condicional etc.).
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: ValidationErrors,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, code: &'static str) {
        let mut error = ValidationError::new(code);
        error.message = Some(code.into());
        self.errors.add(field, error);
    }

    /// Valor preenchido (sem espaços nas pontas) ou `required`.
    pub fn require<'a>(&mut self, field: &'static str, value: Option<&'a str>) -> Option<&'a str> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.add(field, "required");
                None
            }
        }
    }

    pub fn date(&mut self, field: &'static str, value: Option<&str>) -> Option<NaiveDate> {
        let raw = self.require(field, value)?;
        let parsed = text::parse_date(raw);
        if parsed.is_none() {
            self.add(field, "invalid_date");
        }
        parsed
    }

    /// Horário "HH:MM", devolvido normalizado com zero à esquerda.
    pub fn time(&mut self, field: &'static str, value: Option<&str>) -> Option<String> {
        let raw = self.require(field, value)?;
        match text::parse_hhmm(raw) {
            Some(minutes) => Some(format!("{:02}:{:02}", minutes / 60, minutes % 60)),
            None => {
                self.add(field, "invalid_time");
                None
            }
        }
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_missing_field() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.require("nome", Some("  Ana ")), Some("Ana"));
        assert_eq!(errors.require("endereco", Some("   ")), None);
        assert_eq!(errors.date("returnDate", None), None);
        assert_eq!(errors.time("returnTime", Some("9:05")), Some("09:05".to_string()));

        let Err(AppError::ValidationError(e)) = errors.finish() else {
            panic!("expected validation error");
        };
        let fields = e.field_errors();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn rejects_malformed_dates_and_times() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.date("date", Some("10/01/2025")), None);
        assert_eq!(errors.time("time", Some("25:00")), None);
        assert!(errors.finish().is_err());
    }
}
