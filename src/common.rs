pub mod clock;
pub mod error;
pub mod i18n;
pub mod text;
pub mod validation;
