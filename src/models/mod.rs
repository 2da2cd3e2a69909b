pub mod booking;
pub mod form;
pub mod page;

pub use booking::{BookingFields, BookingRequest};
pub use form::{FieldFeedback, FormMessage, FormView, SubmitControl};
pub use page::{NavState, PageView};
