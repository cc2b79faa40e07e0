use crate::errors::AppError;
use crate::models::Credentials;
use crate::xml_writer::XmlBuilder;

pub const SOAP_ENV_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SERVICE_NAMESPACE: &str = "https://ws.creditinfo.com";
/// Service operation invoked for every submission.
pub const OPERATION: &str = "UploadZippedData2";
/// Schema identifier of the credit record format.
pub const SCHEMA_ID: u32 = 3;

/// Builds the SOAP 1.1 request: credentials in `ws:CigWsHeader`, the encoded
/// archive and schema id as `ws:UploadZippedData2` parameters.
///
/// Business fields only ever travel inside `zipped_xml`.
pub fn build_envelope(credentials: &Credentials, zipped_xml: &str) -> Result<String, AppError> {
    let mut xml = XmlBuilder::new()?;
    xml.open(
        "soapenv:Envelope",
        &[
            ("xmlns:soapenv", SOAP_ENV_NAMESPACE),
            ("xmlns:ws", SERVICE_NAMESPACE),
        ],
    )?;

    xml.open("soapenv:Header", &[])?;
    xml.open("ws:CigWsHeader", &[])?;
    xml.leaf("ws:UserName", &[], &credentials.user_name)?;
    xml.leaf("ws:Password", &[], &credentials.password)?;
    xml.leaf("ws:Culture", &[], &credentials.culture)?;
    xml.close("ws:CigWsHeader")?;
    xml.close("soapenv:Header")?;

    let operation = format!("ws:{}", OPERATION);
    xml.open("soapenv:Body", &[])?;
    xml.open(&operation, &[])?;
    xml.leaf("ws:zippedXML", &[], zipped_xml)?;
    xml.leaf("ws:schemaId", &[], &SCHEMA_ID.to_string())?;
    xml.close(&operation)?;
    xml.close("soapenv:Body")?;

    xml.close("soapenv:Envelope")?;

    String::from_utf8(xml.finish())
        .map_err(|e| AppError::Xml(format!("Envelope is not valid UTF-8: {}", e)))
}
