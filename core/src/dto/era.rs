use serde::{Deserialize, Serialize};

use super::validate::{check_one_of, check_optional, is_mm_dd_yyyy, is_mm_dd_yyyy_or_relative};
use super::{take_opt, FieldWriter, ToFields};
use crate::error::ValidationError;
use crate::form::FieldMap;

/// Filters for the ERA list endpoint. Every field is optional.
///
/// Dates use `mm-dd-yyyy`. The received-date filters also accept `today`
/// and `yesterday`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraQueryInput {
    pub check_date: Option<String>,
    pub received_date: Option<String>,
    pub received_after_date: Option<String>,
    pub check_number: Option<String>,
    pub check_amount: Option<String>,
    pub payer_id: Option<String>,
    pub npi: Option<String>,
    pub tax_id: Option<String>,
    /// `"1"` to list only ERAs not yet downloaded, `"0"` for all.
    pub new_only: Option<String>,
    pub era_id: Option<String>,
    pub page: Option<String>,
}

/// A validated ERA list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EraQuery(EraQueryInput);

impl EraQuery {
    pub fn new(input: EraQueryInput) -> Result<Self, ValidationError> {
        check_optional(
            "check_date",
            input.check_date.as_deref(),
            is_mm_dd_yyyy,
            "must be in mm-dd-yyyy format",
        )?;
        check_optional(
            "received_date",
            input.received_date.as_deref(),
            is_mm_dd_yyyy_or_relative,
            "must be in mm-dd-yyyy format or 'today'/'yesterday'",
        )?;
        check_optional(
            "received_after_date",
            input.received_after_date.as_deref(),
            is_mm_dd_yyyy_or_relative,
            "must be in mm-dd-yyyy format or 'today'/'yesterday'",
        )?;
        // An empty string is still a value here: it must be "0" or "1".
        if let Some(new_only) = input.new_only.as_deref() {
            check_one_of("new_only", new_only, &["0", "1"])?;
        }
        Ok(Self(input))
    }

    pub fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        Self::new(EraQueryInput {
            check_date: take_opt(fields, "CheckDate"),
            received_date: take_opt(fields, "ReceivedDate"),
            received_after_date: take_opt(fields, "ReceivedAfterDate"),
            check_number: take_opt(fields, "CheckNumber"),
            check_amount: take_opt(fields, "CheckAmount"),
            payer_id: take_opt(fields, "PayerID"),
            npi: take_opt(fields, "NPI"),
            tax_id: take_opt(fields, "TaxID"),
            new_only: take_opt(fields, "NewOnly"),
            era_id: take_opt(fields, "ERAID"),
            page: take_opt(fields, "Page"),
        })
    }

    pub fn input(&self) -> &EraQueryInput {
        &self.0
    }

    pub fn into_input(self) -> EraQueryInput {
        self.0
    }
}

impl ToFields for EraQuery {
    fn to_fields(&self) -> FieldMap {
        let i = &self.0;
        FieldWriter::default()
            .put_opt("CheckDate", i.check_date.as_ref())
            .put_opt("ReceivedDate", i.received_date.as_ref())
            .put_opt("ReceivedAfterDate", i.received_after_date.as_ref())
            .put_opt("CheckNumber", i.check_number.as_ref())
            .put_opt("CheckAmount", i.check_amount.as_ref())
            .put_opt("PayerID", i.payer_id.as_ref())
            .put_opt("NPI", i.npi.as_ref())
            .put_opt("TaxID", i.tax_id.as_ref())
            .put_opt("NewOnly", i.new_only.as_ref())
            .put_opt("ERAID", i.era_id.as_ref())
            .put_opt("Page", i.page.as_ref())
            .finish()
    }
}
