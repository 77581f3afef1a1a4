pub mod config;
pub mod passninja;
pub mod recaptcha;
