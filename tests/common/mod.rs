//! Shared fixtures for integration tests.
#![allow(dead_code)]

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use fcb_datapump::transport::Transport;
use fcb_datapump::{AppError, SubmissionFields};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use url::Url;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn amount(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

/// A complete field set for a consumer instalment loan.
pub fn sample_fields() -> SubmissionFields {
    SubmissionFields::new()
        .with("operation_type", "1")
        .with("contract_number", "KZ-2024-000731")
        .with("funding_type", "6")
        .with("credit_purpose_2", "12")
        .with("credit_object", "31")
        .with("contract_phase", "4")
        .with("contract_status", "1")
        .with("start_date", date(2024, 1, 15))
        .with("end_date", date(2025, 1, 15))
        .with("classification", "1")
        .with("collateral", "21")
        .with("collateral_value", amount("450000.00"))
        .with("collateral_currency", "KZT")
        .with("collateral_type", "2")
        .with("subject_role_id", "1")
        .with("first_name", "Айгерим")
        .with("surname", "Садыкова")
        .with("fathers_name", "Ержановна")
        .with("gender", "2")
        .with("subject_classification", "1")
        .with("residency", "1")
        .with("date_of_birth", date(1991, 6, 2))
        .with("citizenship", "110")
        .with("subject_iin", "910602450123")
        .with("subject_iin_system_registration_date", date(2024, 1, 15))
        .with("subject_identity_document_number", "045612378")
        .with("subject_identity_document_issued_on", date(2019, 3, 11))
        .with("subject_identity_document_expire_on", date(2029, 3, 10))
        .with("subject_identity_document_system_registration_date", date(2024, 1, 15))
        .with("residential_address_locality", "751110000")
        .with("residential_address_full", "ул. Абая, д. 10, кв. 5")
        .with("registration_address_locality", "751110000")
        .with("registration_address_full", "пр. Достык, д. 3")
        .with("communication_type", "3")
        .with("communication", "+77011234567")
        .with("instalment_payment_method_id", "1")
        .with("instalment_payment_period_id", "3")
        .with("total_amount", amount("360000.00"))
        .with("instalment_amount", amount("30000.00"))
        .with("instalment_count", 12)
        .with("accounting_date", date(2024, 6, 30))
        .with("outstanding_instalment_count", 7)
        .with("outstanding_amount", amount("210000.00"))
        .with("overdue_instalment_count", 0)
        .with("overdue_amount", amount("1500.50"))
}

/// Element paths (`Records/Contract/...`) in document order.
pub fn element_paths(xml: &[u8]) -> Vec<String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut paths = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).unwrap() {
            Event::Start(e) => {
                stack.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                paths.push(stack.join("/"));
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                paths.push(format!("{}/{}", stack.join("/"), name));
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    paths
}

/// Text between `<tag>` and `</tag>`, first occurrence.
pub fn text_between<'a>(haystack: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = haystack.find(&open)? + open.len();
    let end = start + haystack[start..].find(&close)?;
    Some(&haystack[start..end])
}

/// Transport stub that records every request and answers with a canned body.
#[derive(Clone)]
pub struct StubTransport {
    response: String,
    calls: Arc<Mutex<Vec<(Url, String)>>>,
}

impl StubTransport {
    pub fn responding(body: &str) -> Self {
        Self {
            response: body.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_body(&self) -> Option<String> {
        self.calls.lock().unwrap().last().map(|(_, body)| body.clone())
    }

    pub fn last_url(&self) -> Option<Url> {
        self.calls.lock().unwrap().last().map(|(url, _)| url.clone())
    }
}

impl Transport for StubTransport {
    async fn post_xml(&self, url: &Url, body: String) -> Result<String, AppError> {
        self.calls.lock().unwrap().push((url.clone(), body));
        Ok(self.response.clone())
    }
}

pub const SUCCESS_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/">
  <S:Body>
    <UploadZippedData2Response xmlns="https://ws.creditinfo.com">
      <UploadZippedData2Result>ABC123</UploadZippedData2Result>
    </UploadZippedData2Response>
  </S:Body>
</S:Envelope>"#;

pub const FAULT_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/">
  <S:Body>
    <S:Fault>
      <faultcode>S:Client</faultcode>
      <faultstring>Invalid credentials</faultstring>
    </S:Fault>
  </S:Body>
</S:Envelope>"#;

pub const EMPTY_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/">
  <S:Body>
    <UploadZippedData2Response xmlns="https://ws.creditinfo.com"/>
  </S:Body>
</S:Envelope>"#;
