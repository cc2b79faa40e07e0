//! Interpretation of the data pump SOAP response.
//!
//! Elements are matched by local name so any namespace prefix the service
//! chooses (`S:`, `soap:`, none) is accepted.

use crate::envelope::OPERATION;
use crate::errors::AppError;
use crate::models::{Failure, Outcome, SoapFault};
use quick_xml::events::Event;
use quick_xml::Reader;

const FAULT_PATH: &[&str] = &["Envelope", "Body", "Fault"];

#[derive(Default)]
struct Scan {
    fault: Option<SoapFault>,
    result: Option<String>,
}

fn is_path(stack: &[String], path: &[&str]) -> bool {
    stack.len() == path.len() && stack.iter().zip(path).all(|(a, b)| a == b)
}

fn starts_with_path(stack: &[String], path: &[&str]) -> bool {
    stack.len() >= path.len() && stack.iter().zip(path).all(|(a, b)| a == b)
}

fn append(slot: &mut Option<String>, text: &str) {
    slot.get_or_insert_with(String::new).push_str(text);
}

fn local_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

/// Parses a SOAP response body.
///
/// * a `Fault` under `Envelope/Body` yields `RequestError` with `faultcode`
///   and `faultstring` when present;
/// * otherwise `Envelope/Body/UploadZippedData2Response/UploadZippedData2Result`
///   text is the success payload;
/// * a missing or empty result node yields `NoData`.
///
/// A body that is not well-formed XML, including one cut off before its
/// elements close, is an error. The payload is returned verbatim.
pub fn interpret(body: &str) -> Result<Outcome, AppError> {
    let response_name = format!("{}Response", OPERATION);
    let result_name = format!("{}Result", OPERATION);
    let result_path = ["Envelope", "Body", response_name.as_str(), result_name.as_str()];

    let mut reader = Reader::from_str(body);
    let mut stack: Vec<String> = Vec::new();
    let mut scan = Scan::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                stack.push(local_name(e.local_name().as_ref()));
                if is_path(&stack, FAULT_PATH) {
                    scan.fault.get_or_insert_with(SoapFault::default);
                }
            }
            Event::Empty(e) => {
                stack.push(local_name(e.local_name().as_ref()));
                if is_path(&stack, FAULT_PATH) {
                    scan.fault.get_or_insert_with(SoapFault::default);
                }
                stack.pop();
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                collect(&stack, &result_path, &mut scan, &text);
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                let text = String::from_utf8_lossy(&raw);
                collect(&stack, &result_path, &mut scan, &text);
            }
            Event::Eof => {
                if !stack.is_empty() {
                    return Err(AppError::Xml(format!(
                        "unexpected end of response inside <{}>",
                        stack.join("/")
                    )));
                }
                break;
            }
            _ => {}
        }
    }

    if let Some(fault) = scan.fault {
        tracing::warn!(
            "Data pump returned SOAP fault: code={:?} message={:?}",
            fault.code,
            fault.message
        );
        return Ok(Outcome::failure(Failure::RequestError(fault)));
    }

    match scan.result {
        Some(payload) if !payload.trim().is_empty() => Ok(Outcome::success(payload)),
        _ => {
            tracing::warn!("Data pump response carried no {} node", result_name);
            Ok(Outcome::failure(Failure::NoData))
        }
    }
}

fn collect(stack: &[String], result_path: &[&str], scan: &mut Scan, text: &str) {
    if is_path(stack, result_path) {
        append(&mut scan.result, text);
        return;
    }

    if starts_with_path(stack, FAULT_PATH) && stack.len() == FAULT_PATH.len() + 1 {
        if let Some(fault) = scan.fault.as_mut() {
            match stack[FAULT_PATH.len()].as_str() {
                "faultcode" => append(&mut fault.code, text.trim()),
                "faultstring" => append(&mut fault.message, text.trim()),
                _ => {}
            }
        }
    }
}
