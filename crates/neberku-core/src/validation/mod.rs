//! Validation of the text fields on a contribution form

use validator::Validate;

use crate::error::UploadError;
use crate::models::GuestInfo;

/// Check the guest's details and wish text before a submission is built.
///
/// Details are trimmed before the length rules run, so whitespace-only input
/// counts as missing. Returns the trimmed details to send.
pub fn validate_contribution_fields(
    guest: &GuestInfo,
    wish_text: &str,
) -> Result<GuestInfo, UploadError> {
    let guest = GuestInfo::new(&guest.name, &guest.phone);
    guest.validate()?;

    if wish_text.trim().is_empty() {
        return Err(UploadError::EmptyWishText);
    }

    Ok(guest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fields() {
        let guest = GuestInfo::new("  Hanna ", "+251911000000");
        assert_eq!(guest.name, "Hanna");
        assert_eq!(
            validate_contribution_fields(&guest, "Happy wedding!").unwrap(),
            guest
        );
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let guest = GuestInfo::new("   ", "0911");
        assert!(matches!(
            validate_contribution_fields(&guest, "Hi"),
            Err(UploadError::InvalidGuestInfo(_))
        ));
    }

    #[test]
    fn test_whitespace_details_built_without_trimming_are_rejected() {
        let guest = GuestInfo {
            name: "   ".to_string(),
            phone: "  ".to_string(),
        };
        assert!(matches!(
            validate_contribution_fields(&guest, "Hi"),
            Err(UploadError::InvalidGuestInfo(_))
        ));

        let guest = GuestInfo {
            name: "Hanna".to_string(),
            phone: "\t".to_string(),
        };
        assert!(matches!(
            validate_contribution_fields(&guest, "Hi"),
            Err(UploadError::InvalidGuestInfo(_))
        ));
    }

    #[test]
    fn test_untrimmed_details_are_normalized() {
        let guest = GuestInfo {
            name: " Hanna ".to_string(),
            phone: " 0911 ".to_string(),
        };
        let normalized = validate_contribution_fields(&guest, "Hi").unwrap();
        assert_eq!(normalized.name, "Hanna");
        assert_eq!(normalized.phone, "0911");
    }

    #[test]
    fn test_phone_too_long_is_rejected() {
        let guest = GuestInfo::new("Hanna", "0".repeat(21));
        assert!(matches!(
            validate_contribution_fields(&guest, "Hi"),
            Err(UploadError::InvalidGuestInfo(_))
        ));
    }

    #[test]
    fn test_blank_wish_is_rejected() {
        let guest = GuestInfo::new("Hanna", "0911");
        assert_eq!(
            validate_contribution_fields(&guest, " \n "),
            Err(UploadError::EmptyWishText)
        );
    }
}
