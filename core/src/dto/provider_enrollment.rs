use serde::{Deserialize, Serialize};

use super::validate::{check_one_of, check_optional, is_blank, is_state_code, is_valid_email, require};
use super::{take_opt, take_required, FieldWriter, ToFields};
use crate::error::ValidationError;
use crate::form::FieldMap;

/// Transaction types a provider can enroll for: remittance, professional
/// claims, institutional claims, eligibility, attachments.
pub const ENROLL_TYPES: &[&str] = &["era", "1500", "ub", "elig", "attach"];

/// Fields of a payer enrollment request for `/services/enroll/`.
///
/// Without a `prov_npi` the provider is identified by name, so
/// `prov_name_last` and `prov_name_first` become mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderEnrollmentInput {
    pub payer_id: String,
    pub enroll_type: String,
    pub prov_tax_id: String,
    pub prov_npi: Option<String>,
    pub prov_name_last: Option<String>,
    pub prov_name_first: Option<String>,
    pub prov_name_middle: Option<String>,
    pub contact: Option<String>,
    pub contact_title: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_fax: Option<String>,
    pub prov_id: Option<String>,
    pub prov_addr1: Option<String>,
    pub prov_addr2: Option<String>,
    pub prov_city: Option<String>,
    pub prov_state: Option<String>,
    pub prov_zip: Option<String>,
}

/// A validated provider enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEnrollment(ProviderEnrollmentInput);

impl ProviderEnrollment {
    pub fn new(input: ProviderEnrollmentInput) -> Result<Self, ValidationError> {
        require("payer_id", &input.payer_id)?;
        require("enroll_type", &input.enroll_type)?;
        require("prov_tax_id", &input.prov_tax_id)?;
        check_one_of("enroll_type", &input.enroll_type, ENROLL_TYPES)?;

        if is_blank(input.prov_npi.as_deref()) {
            if is_blank(input.prov_name_last.as_deref()) {
                return Err(ValidationError::invalid(
                    "prov_name_last",
                    "is required when prov_npi is not provided",
                ));
            }
            if is_blank(input.prov_name_first.as_deref()) {
                return Err(ValidationError::invalid(
                    "prov_name_first",
                    "is required when prov_npi is not provided and the provider is an individual",
                ));
            }
        }

        check_optional(
            "contact_email",
            input.contact_email.as_deref(),
            is_valid_email,
            "must be a valid email address",
        )?;
        check_optional(
            "prov_state",
            input.prov_state.as_deref(),
            is_state_code,
            "must be a valid two-letter state code",
        )?;
        Ok(Self(input))
    }

    /// Rebuild from wire fields; `payerid`, `enroll_type` and `prov_taxid`
    /// must be present.
    pub fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        Self::new(ProviderEnrollmentInput {
            payer_id: take_required(fields, "payerid")?,
            enroll_type: take_required(fields, "enroll_type")?,
            prov_tax_id: take_required(fields, "prov_taxid")?,
            prov_npi: take_opt(fields, "prov_npi"),
            prov_name_last: take_opt(fields, "prov_name_l"),
            prov_name_first: take_opt(fields, "prov_name_f"),
            prov_name_middle: take_opt(fields, "prov_name_m"),
            contact: take_opt(fields, "contact"),
            contact_title: take_opt(fields, "contact_title"),
            contact_email: take_opt(fields, "contact_email"),
            contact_phone: take_opt(fields, "contact_phone"),
            contact_fax: take_opt(fields, "contact_fax"),
            prov_id: take_opt(fields, "prov_id"),
            prov_addr1: take_opt(fields, "prov_addr_1"),
            prov_addr2: take_opt(fields, "prov_addr_2"),
            prov_city: take_opt(fields, "prov_city"),
            prov_state: take_opt(fields, "prov_state"),
            prov_zip: take_opt(fields, "prov_zip"),
        })
    }

    pub fn input(&self) -> &ProviderEnrollmentInput {
        &self.0
    }

    pub fn into_input(self) -> ProviderEnrollmentInput {
        self.0
    }
}

impl ToFields for ProviderEnrollment {
    fn to_fields(&self) -> FieldMap {
        let i = &self.0;
        FieldWriter::default()
            .put("payerid", &i.payer_id)
            .put("enroll_type", &i.enroll_type)
            .put("prov_taxid", &i.prov_tax_id)
            .put_opt("prov_npi", i.prov_npi.as_ref())
            .put_opt("prov_name_l", i.prov_name_last.as_ref())
            .put_opt("prov_name_f", i.prov_name_first.as_ref())
            .put_opt("prov_name_m", i.prov_name_middle.as_ref())
            .put_opt("contact", i.contact.as_ref())
            .put_opt("contact_title", i.contact_title.as_ref())
            .put_opt("contact_email", i.contact_email.as_ref())
            .put_opt("contact_phone", i.contact_phone.as_ref())
            .put_opt("contact_fax", i.contact_fax.as_ref())
            .put_opt("prov_id", i.prov_id.as_ref())
            .put_opt("prov_addr_1", i.prov_addr1.as_ref())
            .put_opt("prov_addr_2", i.prov_addr2.as_ref())
            .put_opt("prov_city", i.prov_city.as_ref())
            .put_opt("prov_state", i.prov_state.as_ref())
            .put_opt("prov_zip", i.prov_zip.as_ref())
            .finish()
    }
}
