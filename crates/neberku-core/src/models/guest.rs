use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contact details a guest enters on the contribution form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GuestInfo {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "Phone must be 1 to 20 characters"))]
    pub phone: String,
}

impl GuestInfo {
    /// Build guest details, trimming surrounding whitespace as the form does.
    pub fn new(name: impl AsRef<str>, phone: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            phone: phone.as_ref().trim().to_string(),
        }
    }
}
