/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
mod common;

use common::sample_fields;
use fcb_datapump::archive;
use fcb_datapump::fields::{validate, REQUIRED_FIELDS};
use fcb_datapump::response::interpret;
use fcb_datapump::Failure;
use proptest::prelude::*;

// Property: exactly the removed required keys are reported, in schema order
proptest! {
    #[test]
    fn missing_fields_reported_exactly(mask in proptest::collection::vec(any::<bool>(), REQUIRED_FIELDS.len())) {
        let mut fields = sample_fields();
        let mut removed = Vec::new();
        for (key, drop) in REQUIRED_FIELDS.iter().zip(&mask) {
            if *drop {
                fields.remove(key);
                removed.push(key.to_string());
            }
        }

        let result = validate(&fields);
        if removed.is_empty() {
            prop_assert_eq!(result, Ok(()));
        } else {
            prop_assert_eq!(result, Err(Failure::MissingFields(removed)));
        }
    }

    #[test]
    fn extra_keys_never_affect_validation(key in "[a-z_]{1,20}", value in "\\PC*") {
        prop_assume!(!REQUIRED_FIELDS.contains(&key.as_str()));
        let fields = sample_fields().with(key, value);
        prop_assert_eq!(validate(&fields), Ok(()));
    }
}

// Property: the archive always returns the exact bytes it was given
proptest! {
    #[test]
    fn archive_round_trip(document in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let encoded = archive::pack(&document).unwrap();
        let (name, content) = archive::unpack(&encoded).unwrap();
        prop_assert_eq!(name, archive::ENTRY_NAME);
        prop_assert_eq!(content, document);
    }
}

// Property: response interpretation never panics
proptest! {
    #[test]
    fn interpret_never_panics(body in "\\PC*") {
        let _ = interpret(&body);
    }

    #[test]
    fn any_result_text_is_returned(payload in "[A-Za-z0-9+/=]{1,64}") {
        let body = format!(
            "<S:Envelope xmlns:S=\"x\"><S:Body><UploadZippedData2Response><UploadZippedData2Result>{}</UploadZippedData2Result></UploadZippedData2Response></S:Body></S:Envelope>",
            payload
        );
        let outcome = interpret(&body).unwrap();
        prop_assert_eq!(outcome, fcb_datapump::Outcome::success(payload));
    }
}
