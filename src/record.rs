//! Credit record document (`Records > Contract > General|Type`).
//!
//! A [`CreditContract`] is the typed view of a validated field set. Rendering
//! is a straight pass-through: amounts, counts and dates are written exactly
//! as supplied, in the element order the data pump schema expects.

use crate::errors::AppError;
use crate::models::{AddressKind, ClassifierId, Failure, IdentificationKind, SubmissionFields};
use crate::xml_writer::XmlBuilder;

pub const RECORDS_NAMESPACE: &str = "http://www.datapump.cig.com";
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Locale tag on every localized text node.
pub const TEXT_LANGUAGE: &str = "ru-RU";
/// Currency of all instalment amounts.
pub const INSTALMENT_CURRENCY: &str = "KZT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditContract {
    pub operation: String,
    pub general: General,
    pub instalment: Instalment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct General {
    /// Written to both `ContractCode` and `AgreementNumber`.
    pub contract_number: String,
    pub funding_type: ClassifierId,
    pub credit_purpose: ClassifierId,
    pub credit_object: ClassifierId,
    pub contract_phase: ClassifierId,
    pub contract_status: ClassifierId,
    pub start_date: String,
    pub end_date: String,
    pub real_payment_date: Option<String>,
    pub classification: ClassifierId,
    pub collateral: Collateral,
    pub subject: Subject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collateral {
    pub type_id: ClassifierId,
    pub value: String,
    pub currency: String,
    pub value_type: ClassifierId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub role_id: ClassifierId,
    pub individual: Individual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub first_name: String,
    pub surname: String,
    pub fathers_name: String,
    pub gender: String,
    pub classification: ClassifierId,
    pub residency: ClassifierId,
    pub date_of_birth: String,
    pub citizenship: ClassifierId,
    pub identifications: Vec<Identification>,
    pub addresses: Vec<Address>,
    pub communication: Communication,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    pub kind: IdentificationKind,
    pub number: String,
    pub registration_date: String,
    pub issue_date: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub kind: AddressKind,
    pub locality: ClassifierId,
    pub street: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Communication {
    pub type_id: ClassifierId,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instalment {
    pub payment_method_id: ClassifierId,
    pub payment_period_id: ClassifierId,
    pub total_amount: String,
    pub instalment_amount: String,
    pub instalment_count: String,
    pub record: AccountingRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountingRecord {
    pub accounting_date: String,
    pub outstanding_instalment_count: String,
    pub outstanding_amount: String,
    pub overdue_instalment_count: String,
    pub overdue_amount: String,
}

struct Lookup<'a>(&'a SubmissionFields);

impl Lookup<'_> {
    fn text(&self, key: &str) -> Result<String, Failure> {
        self.0
            .get(key)
            .map(ToString::to_string)
            .ok_or_else(|| Failure::MissingFields(vec![key.to_string()]))
    }

    fn optional(&self, key: &str) -> Option<String> {
        self.0.get(key).map(ToString::to_string)
    }

    fn id(&self, key: &str) -> Result<ClassifierId, Failure> {
        let value = self
            .0
            .get(key)
            .ok_or_else(|| Failure::MissingFields(vec![key.to_string()]))?;
        ClassifierId::try_from(value).map_err(|_| Failure::InvalidFields(vec![key.to_string()]))
    }
}

impl CreditContract {
    /// Builds the typed record from a field set, validating it first.
    pub fn from_fields(fields: &SubmissionFields) -> Result<Self, Failure> {
        crate::fields::validate(fields)?;
        let f = Lookup(fields);

        let individual = Individual {
            first_name: f.text("first_name")?,
            surname: f.text("surname")?,
            fathers_name: f.text("fathers_name")?,
            gender: f.text("gender")?,
            classification: f.id("subject_classification")?,
            residency: f.id("residency")?,
            date_of_birth: f.text("date_of_birth")?,
            citizenship: f.id("citizenship")?,
            identifications: vec![
                Identification {
                    kind: IdentificationKind::Iin,
                    number: f.text("subject_iin")?,
                    registration_date: f.text("subject_iin_system_registration_date")?,
                    issue_date: None,
                    expiration_date: None,
                },
                Identification {
                    kind: IdentificationKind::IdentityDocument,
                    number: f.text("subject_identity_document_number")?,
                    registration_date: f
                        .text("subject_identity_document_system_registration_date")?,
                    issue_date: Some(f.text("subject_identity_document_issued_on")?),
                    expiration_date: Some(f.text("subject_identity_document_expire_on")?),
                },
            ],
            addresses: vec![
                Address {
                    kind: AddressKind::Residential,
                    locality: f.id("residential_address_locality")?,
                    street: f.text("residential_address_full")?,
                },
                Address {
                    kind: AddressKind::Registration,
                    locality: f.id("registration_address_locality")?,
                    street: f.text("registration_address_full")?,
                },
            ],
            communication: Communication {
                type_id: f.id("communication_type")?,
                value: f.text("communication")?,
            },
        };

        let general = General {
            contract_number: f.text("contract_number")?,
            funding_type: f.id("funding_type")?,
            credit_purpose: f.id("credit_purpose_2")?,
            credit_object: f.id("credit_object")?,
            contract_phase: f.id("contract_phase")?,
            contract_status: f.id("contract_status")?,
            start_date: f.text("start_date")?,
            end_date: f.text("end_date")?,
            real_payment_date: f.optional("real_payment_date"),
            classification: f.id("classification")?,
            collateral: Collateral {
                type_id: f.id("collateral")?,
                value: f.text("collateral_value")?,
                currency: f.text("collateral_currency")?,
                value_type: f.id("collateral_type")?,
            },
            subject: Subject {
                role_id: f.id("subject_role_id")?,
                individual,
            },
        };

        let instalment = Instalment {
            payment_method_id: f.id("instalment_payment_method_id")?,
            payment_period_id: f.id("instalment_payment_period_id")?,
            total_amount: f.text("total_amount")?,
            instalment_amount: f.text("instalment_amount")?,
            instalment_count: f.text("instalment_count")?,
            record: AccountingRecord {
                accounting_date: f.text("accounting_date")?,
                outstanding_instalment_count: f.text("outstanding_instalment_count")?,
                outstanding_amount: f.text("outstanding_amount")?,
                overdue_instalment_count: f.text("overdue_instalment_count")?,
                overdue_amount: f.text("overdue_amount")?,
            },
        };

        Ok(Self {
            operation: f.text("operation_type")?,
            general,
            instalment,
        })
    }

    /// Serializes the record as a UTF-8 XML document.
    pub fn to_xml(&self) -> Result<Vec<u8>, AppError> {
        let mut xml = XmlBuilder::new()?;
        xml.open(
            "Records",
            &[("xmlns", RECORDS_NAMESPACE), ("xmlns:xs", XS_NAMESPACE)],
        )?;
        xml.open("Contract", &[("operation", self.operation.as_str())])?;
        self.general.write(&mut xml)?;
        self.instalment.write(&mut xml)?;
        xml.close("Contract")?;
        xml.close("Records")?;
        Ok(xml.finish())
    }
}

/// `<name><Text language="ru-RU">value</Text></name>`
fn localized(xml: &mut XmlBuilder, name: &str, value: &str) -> Result<(), AppError> {
    xml.open(name, &[])?;
    xml.leaf("Text", &[("language", TEXT_LANGUAGE)], value)?;
    xml.close(name)
}

fn id_element(xml: &mut XmlBuilder, name: &str, id: &ClassifierId) -> Result<(), AppError> {
    xml.empty(name, &[("id", id.as_str())])
}

impl General {
    fn write(&self, xml: &mut XmlBuilder) -> Result<(), AppError> {
        xml.open("General", &[])?;
        xml.leaf("ContractCode", &[], &self.contract_number)?;
        xml.leaf("AgreementNumber", &[], &self.contract_number)?;
        id_element(xml, "FundingType", &self.funding_type)?;
        id_element(xml, "CreditPurpose2", &self.credit_purpose)?;
        id_element(xml, "CreditObject", &self.credit_object)?;
        id_element(xml, "ContractPhase", &self.contract_phase)?;
        id_element(xml, "ContractStatus", &self.contract_status)?;
        xml.leaf("StartDate", &[], &self.start_date)?;
        xml.leaf("EndDate", &[], &self.end_date)?;
        if let Some(date) = &self.real_payment_date {
            xml.leaf("RealPaymentDate", &[], date)?;
        }
        id_element(xml, "Classification", &self.classification)?;

        xml.open("Collaterals", &[])?;
        xml.open("Collateral", &[("typeId", self.collateral.type_id.as_str())])?;
        xml.leaf(
            "Value",
            &[
                ("currency", self.collateral.currency.as_str()),
                ("typeId", self.collateral.value_type.as_str()),
            ],
            &self.collateral.value,
        )?;
        xml.close("Collateral")?;
        xml.close("Collaterals")?;

        xml.open("Subjects", &[])?;
        xml.open("Subject", &[("roleId", self.subject.role_id.as_str())])?;
        xml.open("Entity", &[])?;
        self.subject.individual.write(xml)?;
        xml.close("Entity")?;
        xml.close("Subject")?;
        xml.close("Subjects")?;

        xml.close("General")
    }
}

impl Individual {
    fn write(&self, xml: &mut XmlBuilder) -> Result<(), AppError> {
        xml.open("Individual", &[])?;
        localized(xml, "FirstName", &self.first_name)?;
        localized(xml, "Surname", &self.surname)?;
        localized(xml, "FathersName", &self.fathers_name)?;
        xml.leaf("Gender", &[], &self.gender)?;
        id_element(xml, "Classification", &self.classification)?;
        id_element(xml, "Residency", &self.residency)?;
        xml.leaf("DateOfBirth", &[], &self.date_of_birth)?;
        id_element(xml, "Citizenship", &self.citizenship)?;

        xml.open("Identifications", &[])?;
        for identification in &self.identifications {
            xml.open(
                "Identification",
                &[
                    ("typeId", identification.kind.type_id()),
                    ("rank", identification.kind.rank()),
                ],
            )?;
            xml.leaf("Number", &[], &identification.number)?;
            xml.leaf("RegistrationDate", &[], &identification.registration_date)?;
            if let Some(date) = &identification.issue_date {
                xml.leaf("IssueDate", &[], date)?;
            }
            if let Some(date) = &identification.expiration_date {
                xml.leaf("ExpirationDate", &[], date)?;
            }
            xml.close("Identification")?;
        }
        xml.close("Identifications")?;

        xml.open("Addresses", &[])?;
        for address in &self.addresses {
            xml.open(
                "Address",
                &[
                    ("typeId", address.kind.type_id()),
                    ("katoId", address.locality.as_str()),
                ],
            )?;
            localized(xml, "StreetName", &address.street)?;
            xml.close("Address")?;
        }
        xml.close("Addresses")?;

        xml.open("Communications", &[])?;
        xml.leaf(
            "Communication",
            &[("typeId", self.communication.type_id.as_str())],
            &self.communication.value,
        )?;
        xml.close("Communications")?;

        xml.close("Individual")
    }
}

impl Instalment {
    fn write(&self, xml: &mut XmlBuilder) -> Result<(), AppError> {
        let kzt = [("currency", INSTALMENT_CURRENCY)];

        xml.open("Type", &[])?;
        xml.open(
            "Instalment",
            &[
                ("paymentMethodId", self.payment_method_id.as_str()),
                ("paymentPeriodId", self.payment_period_id.as_str()),
            ],
        )?;
        xml.leaf("TotalAmount", &kzt, &self.total_amount)?;
        xml.leaf("InstalmentAmount", &kzt, &self.instalment_amount)?;
        xml.leaf("InstalmentCount", &[], &self.instalment_count)?;

        let record = &self.record;
        xml.open("Records", &[])?;
        xml.open("Record", &[("accountingDate", record.accounting_date.as_str())])?;
        xml.leaf(
            "OutstandingInstalmentCount",
            &[],
            &record.outstanding_instalment_count,
        )?;
        xml.leaf("OutstandingAmount", &kzt, &record.outstanding_amount)?;
        xml.leaf("OverdueInstalmentCount", &[], &record.overdue_instalment_count)?;
        xml.leaf("OverdueAmount", &kzt, &record.overdue_amount)?;
        xml.close("Record")?;
        xml.close("Records")?;

        xml.close("Instalment")?;
        xml.close("Type")
    }
}
