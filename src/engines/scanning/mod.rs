pub mod pam;
pub mod scanner;

pub use pam::PamPattern;
pub use scanner::SiteScanner;
