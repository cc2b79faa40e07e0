//! Required-field schema and checks run before any document is built.

use crate::models::{ClassifierId, Failure, SubmissionFields};

/// Keys every submission must carry, in schema order.
pub const REQUIRED_FIELDS: &[&str] = &[
    "funding_type",
    "credit_purpose_2",
    "credit_object",
    "classification",
    "collateral",
    "collateral_value",
    "collateral_currency",
    "collateral_type",
    "instalment_payment_method_id",
    "instalment_payment_period_id",
    "subject_role_id",
    "accounting_date",
    "operation_type",
    "contract_number",
    "contract_phase",
    "contract_status",
    "start_date",
    "end_date",
    "total_amount",
    "instalment_amount",
    "instalment_count",
    "outstanding_instalment_count",
    "outstanding_amount",
    "overdue_instalment_count",
    "overdue_amount",
    "first_name",
    "surname",
    "fathers_name",
    "gender",
    "subject_classification",
    "residency",
    "date_of_birth",
    "citizenship",
    "subject_iin",
    "subject_iin_system_registration_date",
    "subject_identity_document_number",
    "subject_identity_document_issued_on",
    "subject_identity_document_expire_on",
    "subject_identity_document_system_registration_date",
    "residential_address_locality",
    "residential_address_full",
    "registration_address_locality",
    "registration_address_full",
    "communication_type",
    "communication",
];

/// Keys the credit record recognizes but does not require.
pub const OPTIONAL_FIELDS: &[&str] = &["real_payment_date"];

/// Keys rendered as classifier references (`id`, `typeId`, `roleId`, ...).
pub const IDENTIFIER_FIELDS: &[&str] = &[
    "funding_type",
    "credit_purpose_2",
    "credit_object",
    "classification",
    "collateral",
    "collateral_type",
    "instalment_payment_method_id",
    "instalment_payment_period_id",
    "subject_role_id",
    "contract_phase",
    "contract_status",
    "subject_classification",
    "residency",
    "citizenship",
    "residential_address_locality",
    "registration_address_locality",
    "communication_type",
];

/// Returns the required keys absent from `fields`, in schema order.
pub fn missing_fields(fields: &SubmissionFields) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .filter(|key| !fields.contains_key(key))
        .map(|key| key.to_string())
        .collect()
}

/// Returns the identifier keys whose values are not numeric identifiers.
pub fn invalid_identifiers(fields: &SubmissionFields) -> Vec<String> {
    IDENTIFIER_FIELDS
        .iter()
        .filter(|key| match fields.get(key) {
            Some(value) => ClassifierId::try_from(value).is_err(),
            None => false,
        })
        .map(|key| key.to_string())
        .collect()
}

/// Checks a field set against the schema.
///
/// Missing keys take precedence over malformed identifiers.
pub fn validate(fields: &SubmissionFields) -> Result<(), Failure> {
    let missing = missing_fields(fields);
    if !missing.is_empty() {
        return Err(Failure::MissingFields(missing));
    }

    let invalid = invalid_identifiers(fields);
    if !invalid.is_empty() {
        return Err(Failure::InvalidFields(invalid));
    }

    let unknown: Vec<&str> = fields
        .keys()
        .filter(|k| !REQUIRED_FIELDS.contains(k) && !OPTIONAL_FIELDS.contains(k))
        .collect();
    if !unknown.is_empty() {
        tracing::debug!("Ignoring unrecognized fields: {:?}", unknown);
    }

    Ok(())
}
