pub mod app_error;
pub mod email_templates;
pub mod jwt;
pub mod signup;
pub mod use_cases;
pub mod validators;
