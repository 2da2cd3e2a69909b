pub mod client;
pub mod remote;
pub mod site;
pub mod submission;
pub mod validation;
