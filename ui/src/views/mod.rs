mod case_study;
mod frame;
mod home;

pub use case_study::{CaseStudyPage, VIEW_THRESHOLD};
pub use frame::SiteFrame;
pub use home::Home;
