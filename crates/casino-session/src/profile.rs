//! Profile setup input checks.

use crate::error::{SessionError, SessionResult};
use casino_client::{PrincipalId, RegistrationData};

const MAX_PRINCIPAL_LEN: usize = 63;
const GROUP_LEN: usize = 5;

/// Whether `text` has the shape of a textual principal: lowercase base32
/// groups of five joined by `-`, the last group possibly shorter.
pub fn is_principal_text(text: &str) -> bool {
    if text.is_empty() || text.len() > MAX_PRINCIPAL_LEN {
        return false;
    }

    let groups: Vec<&str> = text.split('-').collect();
    let Some((last, full)) = groups.split_last() else {
        return false;
    };
    if full.is_empty() {
        return false;
    }

    let base32 = |group: &str| {
        group
            .chars()
            .all(|c| c.is_ascii_lowercase() || ('2'..='7').contains(&c))
    };

    full.iter().all(|g| g.len() == GROUP_LEN && base32(g))
        && (1..=GROUP_LEN).contains(&last.len())
        && base32(last)
}

/// Turn a referral code into a referrer. A blank code means no referrer.
pub fn parse_referrer(code: &str, caller: Option<&str>) -> SessionResult<Option<PrincipalId>> {
    let code = code.trim();
    if code.is_empty() {
        return Ok(None);
    }
    if !is_principal_text(code) {
        return Err(SessionError::InvalidReferralCode);
    }
    if caller == Some(code) {
        return Err(SessionError::SelfReferral);
    }
    Ok(Some(code.to_string()))
}

/// Build registration data from user input. Coupons are not offered.
pub fn registration(
    display_name: &str,
    date_of_birth: &str,
    referral_code: &str,
    caller: Option<&str>,
) -> SessionResult<RegistrationData> {
    let display_name = display_name.trim();
    if display_name.is_empty() {
        return Err(SessionError::InvalidProfile("please enter your name".into()));
    }
    let date_of_birth = date_of_birth.trim();
    if date_of_birth.is_empty() {
        return Err(SessionError::InvalidProfile(
            "please enter your date of birth".into(),
        ));
    }

    Ok(RegistrationData {
        display_name: display_name.to_string(),
        date_of_birth: date_of_birth.to_string(),
        referrer: parse_referrer(referral_code, caller)?,
        coupon_code: None,
    })
}
