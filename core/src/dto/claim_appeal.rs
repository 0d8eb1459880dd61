use serde::{Deserialize, Serialize};

use super::validate::{check_optional, is_blank, is_state_code, is_valid_email, is_valid_phone};
use super::{take_opt, FieldWriter, ToFields};
use crate::error::ValidationError;
use crate::form::FieldMap;

/// Fields of an appeal request for `/services/appeal/`.
///
/// Identify the claim with `claim_id` (Claim.MD's id) or `remote_claim_id`
/// (the submitter's own id); at least one is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimAppealInput {
    pub claim_id: Option<String>,
    pub remote_claim_id: Option<String>,
    pub contact_name: Option<String>,
    pub contact_title: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_fax: Option<String>,
    pub contact_addr1: Option<String>,
    pub contact_addr2: Option<String>,
    pub contact_city: Option<String>,
    pub contact_state: Option<String>,
    pub contact_zip: Option<String>,
}

/// A validated claim appeal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimAppeal(ClaimAppealInput);

impl ClaimAppeal {
    pub fn new(input: ClaimAppealInput) -> Result<Self, ValidationError> {
        if is_blank(input.claim_id.as_deref()) && is_blank(input.remote_claim_id.as_deref()) {
            return Err(ValidationError::required("claim_id or remote_claim_id"));
        }
        check_optional(
            "contact_email",
            input.contact_email.as_deref(),
            is_valid_email,
            "must be a valid email address",
        )?;
        check_optional(
            "contact_phone",
            input.contact_phone.as_deref(),
            is_valid_phone,
            "must be a valid phone number",
        )?;
        check_optional(
            "contact_fax",
            input.contact_fax.as_deref(),
            is_valid_phone,
            "must be a valid phone number",
        )?;
        check_optional(
            "contact_state",
            input.contact_state.as_deref(),
            is_state_code,
            "must be a valid two-letter state code",
        )?;
        Ok(Self(input))
    }

    pub fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        Self::new(ClaimAppealInput {
            claim_id: take_opt(fields, "claimid"),
            remote_claim_id: take_opt(fields, "remote_claimid"),
            contact_name: take_opt(fields, "contact_name"),
            contact_title: take_opt(fields, "contact_title"),
            contact_email: take_opt(fields, "contact_email"),
            contact_phone: take_opt(fields, "contact_phone"),
            contact_fax: take_opt(fields, "contact_fax"),
            contact_addr1: take_opt(fields, "contact_addr_1"),
            contact_addr2: take_opt(fields, "contact_addr_2"),
            contact_city: take_opt(fields, "contact_city"),
            contact_state: take_opt(fields, "contact_state"),
            contact_zip: take_opt(fields, "contact_zip"),
        })
    }

    pub fn input(&self) -> &ClaimAppealInput {
        &self.0
    }

    pub fn into_input(self) -> ClaimAppealInput {
        self.0
    }
}

impl ToFields for ClaimAppeal {
    fn to_fields(&self) -> FieldMap {
        let i = &self.0;
        FieldWriter::default()
            .put_opt("claimid", i.claim_id.as_ref())
            .put_opt("remote_claimid", i.remote_claim_id.as_ref())
            .put_opt("contact_name", i.contact_name.as_ref())
            .put_opt("contact_title", i.contact_title.as_ref())
            .put_opt("contact_email", i.contact_email.as_ref())
            .put_opt("contact_phone", i.contact_phone.as_ref())
            .put_opt("contact_fax", i.contact_fax.as_ref())
            .put_opt("contact_addr_1", i.contact_addr1.as_ref())
            .put_opt("contact_addr_2", i.contact_addr2.as_ref())
            .put_opt("contact_city", i.contact_city.as_ref())
            .put_opt("contact_state", i.contact_state.as_ref())
            .put_opt("contact_zip", i.contact_zip.as_ref())
            .finish()
    }
}
