use serde::{Deserialize, Serialize};

use super::validate::{check_one_of, check_optional, is_yyyymmdd, require};
use super::{take_opt, take_required, FieldWriter, ToFields};
use crate::error::ValidationError;
use crate::form::FieldMap;

const PATIENT_RELATIONSHIPS: &[&str] = &["18", "G8"];
const SEXES: &[&str] = &["M", "F"];
const TAX_ID_TYPES: &[&str] = &["E", "S"];

/// Fields of a real-time eligibility inquiry for `/services/eligdata/`.
///
/// Dates are `yyyymmdd`. `patient_relationship` is `18` (self) or `G8`
/// (other). `prov_tax_id_type` is `E` (EIN) or `S` (SSN).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityInput {
    pub ins_last_name: String,
    pub ins_first_name: String,
    pub payer_id: String,
    pub patient_relationship: String,
    pub service_date: String,
    pub provider_npi: String,
    pub provider_tax_id: String,
    pub ins_middle_name: Option<String>,
    pub service_code: Option<String>,
    pub proc_code: Option<String>,
    pub ins_number: Option<String>,
    pub ins_dob: Option<String>,
    pub ins_sex: Option<String>,
    pub pat_last_name: Option<String>,
    pub pat_first_name: Option<String>,
    pub pat_middle_name: Option<String>,
    pub pat_dob: Option<String>,
    pub pat_sex: Option<String>,
    pub prov_name_last: Option<String>,
    pub prov_name_first: Option<String>,
    pub prov_taxonomy: Option<String>,
    pub prov_tax_id_type: Option<String>,
    pub prov_addr1: Option<String>,
    pub prov_city: Option<String>,
    pub prov_state: Option<String>,
    pub prov_zip: Option<String>,
}

/// A validated eligibility inquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility(EligibilityInput);

impl Eligibility {
    pub fn new(input: EligibilityInput) -> Result<Self, ValidationError> {
        require("ins_last_name", &input.ins_last_name)?;
        require("ins_first_name", &input.ins_first_name)?;
        require("payer_id", &input.payer_id)?;
        require("patient_relationship", &input.patient_relationship)?;
        require("service_date", &input.service_date)?;
        require("provider_npi", &input.provider_npi)?;
        require("provider_tax_id", &input.provider_tax_id)?;

        let date_reason = "must be in yyyymmdd format";
        check_optional("service_date", Some(input.service_date.as_str()), is_yyyymmdd, date_reason)?;
        check_optional("ins_dob", input.ins_dob.as_deref(), is_yyyymmdd, date_reason)?;
        check_optional("pat_dob", input.pat_dob.as_deref(), is_yyyymmdd, date_reason)?;

        check_one_of("patient_relationship", &input.patient_relationship, PATIENT_RELATIONSHIPS)?;
        if let Some(sex) = non_empty(input.ins_sex.as_deref()) {
            check_one_of("ins_sex", sex, SEXES)?;
        }
        if let Some(sex) = non_empty(input.pat_sex.as_deref()) {
            check_one_of("pat_sex", sex, SEXES)?;
        }
        if let Some(kind) = non_empty(input.prov_tax_id_type.as_deref()) {
            check_one_of("prov_tax_id_type", kind, TAX_ID_TYPES)?;
        }
        Ok(Self(input))
    }

    /// Rebuild from wire fields. The seven required keys must be present;
    /// a missing one fails with [`ValidationError::MissingField`].
    pub fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        Self::new(EligibilityInput {
            ins_last_name: take_required(fields, "ins_name_l")?,
            ins_first_name: take_required(fields, "ins_name_f")?,
            payer_id: take_required(fields, "payerid")?,
            patient_relationship: take_required(fields, "pat_rel")?,
            service_date: take_required(fields, "fdos")?,
            provider_npi: take_required(fields, "prov_npi")?,
            provider_tax_id: take_required(fields, "prov_taxid")?,
            ins_middle_name: take_opt(fields, "ins_name_m"),
            service_code: take_opt(fields, "service_code"),
            proc_code: take_opt(fields, "proc_code"),
            ins_number: take_opt(fields, "ins_number"),
            ins_dob: take_opt(fields, "ins_dob"),
            ins_sex: take_opt(fields, "ins_sex"),
            pat_last_name: take_opt(fields, "pat_name_l"),
            pat_first_name: take_opt(fields, "pat_name_f"),
            pat_middle_name: take_opt(fields, "pat_name_m"),
            pat_dob: take_opt(fields, "pat_dob"),
            pat_sex: take_opt(fields, "pat_sex"),
            prov_name_last: take_opt(fields, "prov_name_l"),
            prov_name_first: take_opt(fields, "prov_name_f"),
            prov_taxonomy: take_opt(fields, "prov_taxonomy"),
            prov_tax_id_type: take_opt(fields, "prov_taxid_type"),
            prov_addr1: take_opt(fields, "prov_addr_1"),
            prov_city: take_opt(fields, "prov_city"),
            prov_state: take_opt(fields, "prov_state"),
            prov_zip: take_opt(fields, "prov_zip"),
        })
    }

    pub fn input(&self) -> &EligibilityInput {
        &self.0
    }

    pub fn into_input(self) -> EligibilityInput {
        self.0
    }
}

impl ToFields for Eligibility {
    fn to_fields(&self) -> FieldMap {
        let i = &self.0;
        FieldWriter::default()
            .put("ins_name_l", &i.ins_last_name)
            .put("ins_name_f", &i.ins_first_name)
            .put("payerid", &i.payer_id)
            .put("pat_rel", &i.patient_relationship)
            .put("fdos", &i.service_date)
            .put("prov_npi", &i.provider_npi)
            .put("prov_taxid", &i.provider_tax_id)
            .put_opt("ins_name_m", i.ins_middle_name.as_ref())
            .put_opt("service_code", i.service_code.as_ref())
            .put_opt("proc_code", i.proc_code.as_ref())
            .put_opt("ins_number", i.ins_number.as_ref())
            .put_opt("ins_dob", i.ins_dob.as_ref())
            .put_opt("ins_sex", i.ins_sex.as_ref())
            .put_opt("pat_name_l", i.pat_last_name.as_ref())
            .put_opt("pat_name_f", i.pat_first_name.as_ref())
            .put_opt("pat_name_m", i.pat_middle_name.as_ref())
            .put_opt("pat_dob", i.pat_dob.as_ref())
            .put_opt("pat_sex", i.pat_sex.as_ref())
            .put_opt("prov_name_l", i.prov_name_last.as_ref())
            .put_opt("prov_name_f", i.prov_name_first.as_ref())
            .put_opt("prov_taxonomy", i.prov_taxonomy.as_ref())
            .put_opt("prov_taxid_type", i.prov_tax_id_type.as_ref())
            .put_opt("prov_addr_1", i.prov_addr1.as_ref())
            .put_opt("prov_city", i.prov_city.as_ref())
            .put_opt("prov_state", i.prov_state.as_ref())
            .put_opt("prov_zip", i.prov_zip.as_ref())
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
