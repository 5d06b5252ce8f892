mod samples;

use querybind::{
    AnySignature, CoercionError, DecodeError, ElementKind, IntWidth, QueryValues, Signature, decode,
    decode_values,
};
use samples::*;

#[test]
fn singleton() {
    let original = Sample1::with_ignore("true");
    let sig = Signature::scan(&original).unwrap();
    assert_eq!(original.singleton, 0);

    let mut copy = Sample1::default();
    decode("singleton=1", &sig, &mut copy).unwrap();
    assert_eq!(copy.ignore(), original.ignore());
    assert_eq!(copy.singleton, 1);
}

#[test]
fn singleton_is_required() {
    let sig = Signature::scan(&Sample1::default()).unwrap();
    let mut copy = Sample1::default();
    let err = decode("", &sig, &mut copy).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::MissingRequiredParameter { ref name } if name == "singleton"
    ));
}

#[test]
fn singleton_rejects_repeats() {
    let sig = Signature::scan(&Sample1::default()).unwrap();
    let mut copy = Sample1::default();
    let err = decode("singleton=1&singleton=2", &sig, &mut copy).unwrap_err();
    assert!(matches!(err, DecodeError::TooManyValues { found: 2, .. }));
    assert_eq!(copy.singleton, 0);
}

#[test]
fn empty_value_list_counts_as_absent() {
    let sig = Signature::scan(&Sample1::default()).unwrap();
    let mut values = QueryValues::new();
    values.insert("singleton", Vec::new());

    let mut copy = Sample1::default();
    let err = decode_values(&values, &sig, &mut copy).unwrap_err();
    assert!(matches!(err, DecodeError::MissingRequiredParameter { .. }));
}

#[test]
fn optional() {
    let sig = Signature::scan(&Sample2::default()).unwrap();

    let mut copy = Sample2::default();
    decode("", &sig, &mut copy).unwrap();
    assert_eq!(copy.optional, None);

    decode("optional=1", &sig, &mut copy).unwrap();
    assert_eq!(copy.optional.as_deref(), Some("1"));

    // Absent again: the value already on the target survives.
    decode("", &sig, &mut copy).unwrap();
    assert_eq!(copy.optional.as_deref(), Some("1"));

    let err = decode("optional=a&optional=b", &sig, &mut copy).unwrap_err();
    assert!(matches!(err, DecodeError::TooManyValues { .. }));
}

#[test]
fn multiple() {
    let sig = Signature::scan(&Sample3::default()).unwrap();

    let mut copy = Sample3::default();
    decode("", &sig, &mut copy).unwrap();
    assert!(copy.multiple.is_empty());

    copy.multiple = vec![false, true];
    decode("", &sig, &mut copy).unwrap();
    assert_eq!(copy.multiple, [false, true]);

    decode(
        "multiple=true&multiple=yes&multiple=0&multiple=No",
        &sig,
        &mut copy,
    )
    .unwrap();
    assert_eq!(copy.multiple, [true, true, false, false]);
}

#[test]
fn multiple_replaces_rather_than_appends() {
    let sig = Signature::scan(&Sample3::default()).unwrap();
    let mut copy = Sample3 {
        multiple: vec![true, true, true],
    };
    decode("multiple=false", &sig, &mut copy).unwrap();
    assert_eq!(copy.multiple, [false]);
}

#[test]
fn repeated_has_no_ceiling() {
    let sig = Signature::scan(&Sample3::default()).unwrap();
    let values: QueryValues = (0..1000)
        .map(|i| ("multiple", if i % 2 == 0 { "1" } else { "0" }))
        .collect();
    let mut copy = Sample3::default();
    decode_values(&values, &sig, &mut copy).unwrap();
    assert_eq!(copy.multiple.len(), 1000);
    assert!(copy.multiple[0]);
    assert!(!copy.multiple[999]);
}

#[test]
fn fixed() {
    let sig = Signature::scan(&Sample4::default()).unwrap();
    assert_eq!(Sample4::default().fixed, [0, 0, 0, 0, 0]);

    let mut copy = Sample4::default();
    let err = decode("", &sig, &mut copy).unwrap_err();
    assert!(matches!(err, DecodeError::MissingRequiredParameter { .. }));

    decode("fixed=1&fixed=2&fixed=3&fixed=4&fixed=5", &sig, &mut copy).unwrap();
    assert_eq!(copy.fixed, [1, 2, 3, 4, 5]);

    decode("fixed=5&fixed=4&fixed=3&fixed=2&fixed=1", &sig, &mut copy).unwrap();
    assert_eq!(copy.fixed, [5, 4, 3, 2, 1]);
}

#[test]
fn fixed_with_too_few_values() {
    let sig = Signature::scan(&Sample4::default()).unwrap();
    let mut copy = Sample4::default();
    let err = decode("fixed=1&fixed=2&fixed=3&fixed=4", &sig, &mut copy).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::TooFewValues {
            min: 5,
            found: 4,
            ..
        }
    ));
    assert_eq!(copy.fixed, [0; 5]);
}

#[test]
fn fixed_with_too_many_values() {
    let sig = Signature::scan(&Sample4::default()).unwrap();
    let mut copy = Sample4::default();
    let err = decode(
        "fixed=1&fixed=2&fixed=3&fixed=4&fixed=5&fixed=6",
        &sig,
        &mut copy,
    )
    .unwrap_err();
    assert!(matches!(err, DecodeError::TooManyValues { found: 6, .. }));
}

#[test]
fn fixed_with_a_bad_element() {
    let sig = Signature::scan(&Sample4::default()).unwrap();
    let mut copy = Sample4::default();
    let err = decode("fixed=1&fixed=2&fixed=3&fixed=Four&fixed=5", &sig, &mut copy).unwrap_err();
    match err {
        DecodeError::ValueParseError { name, source } => {
            assert_eq!(name, "fixed");
            assert_eq!(
                source,
                CoercionError::InvalidInteger {
                    raw: "Four".into(),
                    kind: ElementKind::Uint(IntWidth::Size)
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn multiple_with_a_bad_element() {
    let sig = Signature::scan(&Sample3::default()).unwrap();
    let mut copy = Sample3 {
        multiple: vec![true],
    };
    let err = decode(
        "multiple=true&multiple=5&multiple=0&multiple=No",
        &sig,
        &mut copy,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DecodeError::ValueParseError {
            source: CoercionError::InvalidBoolean { .. },
            ..
        }
    ));
    assert_eq!(copy.multiple, [true]);
}

#[test]
fn tagged() {
    let sig = Signature::scan(&Sample5::default()).unwrap();

    let mut copy = Sample5::default();
    assert!(decode("", &sig, &mut copy).is_err());

    copy.label = "IsTagged".into();
    assert!(decode("", &sig, &mut copy).is_err());

    let err = decode("label=Ignore", &sig, &mut copy).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::MissingRequiredParameter { ref name } if name == "tagged"
    ));
    assert_eq!(copy.label, "IsTagged");

    decode("tagged=ItWorked", &sig, &mut copy).unwrap();
    assert_eq!(copy.label, "ItWorked");
}

#[test]
fn different_int_sizes() {
    let sig = Signature::scan(&Sample7::default()).unwrap();
    let mut copy = Sample7::default();
    decode(
        "int=2&int8=3&int16=4&int32=5&int64=6&uint=7&uint8=8&uint16=9&uint32=10&uint64=11",
        &sig,
        &mut copy,
    )
    .unwrap();
    assert_eq!(
        copy,
        Sample7 {
            int: 2,
            int8: 3,
            int16: 4,
            int32: 5,
            int64: 6,
            uint: 7,
            uint8: 8,
            uint16: 9,
            uint32: 10,
            uint64: 11,
        }
    );
}

#[test]
fn bogus_integer_values() {
    let sig = Signature::scan(&Sample7::default()).unwrap();
    let mut copy = Sample7::default();
    let err = decode(
        "int=2.5&int8=3&int16=4&int32=5&int64=6&uint=7&uint8=8&uint16=9&uint32=10&uint64=11",
        &sig,
        &mut copy,
    )
    .unwrap_err();
    assert_eq!(err.parameter(), Some("int"));
    assert_eq!(copy, Sample7::default());
}

#[test]
fn integer_overflow_for_the_field_width() {
    let sig = Signature::scan(&Sample7::default()).unwrap();
    let mut copy = Sample7::default();
    let err = decode(
        "int=2&int8=300&int16=4&int32=5&int64=6&uint=7&uint8=8&uint16=9&uint32=10&uint64=11",
        &sig,
        &mut copy,
    )
    .unwrap_err();
    assert_eq!(err.parameter(), Some("int8"));
}

#[test]
fn example() {
    let sig = Signature::scan(&Example1::with_unexported_data(true)).unwrap();

    let mut copy1 = Example1::default();
    decode("message=Hello&vec=.1&vec=.2&vec=.3&names=bill", &sig, &mut copy1).unwrap();
    let mut expected = Example1::with_unexported_data(true);
    expected.message = "Hello".into();
    expected.vec = [0.1, 0.2, 0.3];
    expected.name_list = vec!["bill".into()];
    assert_eq!(copy1, expected);
    assert_eq!(copy1.weight_kg, None);

    let mut copy2 = Example1::default();
    decode("message=Hello&vec=.1&vec=.2&vec=.3&weight=120", &sig, &mut copy2).unwrap();
    assert!(copy2.unexported_data());
    assert_eq!(copy2.message, "Hello");
    assert_eq!(copy2.weight_kg, Some(120));
    assert_eq!(copy2.vec, [0.1, 0.2, 0.3]);
    assert!(copy2.name_list.is_empty());
}

#[test]
fn bad_float() {
    let sig = Signature::scan(&Example1::with_unexported_data(true)).unwrap();
    let mut copy = Example1::default();
    let err = decode(
        "message=Hello&vec=.1&vec=seven&vec=.3&names=bill",
        &sig,
        &mut copy,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DecodeError::ValueParseError {
            source: CoercionError::InvalidFloat { .. },
            ..
        }
    ));
    assert_eq!(copy, Example1::default());
}

#[test]
fn bogus_query_string() {
    let sig = Signature::scan(&Sample1::default()).unwrap();
    let mut copy = Sample1::default();
    let err = decode("singleton=%5", &sig, &mut copy).unwrap_err();
    assert!(matches!(err, DecodeError::MalformedInput(_)));
}

#[test]
fn unknown_parameters_are_ignored() {
    let sig = Signature::scan(&Sample2::default()).unwrap();
    let mut copy = Sample2::default();
    decode("other=1&optional=x&more=2", &sig, &mut copy).unwrap();
    assert_eq!(copy.optional.as_deref(), Some("x"));
}

#[test]
fn empty_values_are_identity_without_required_parameters() {
    let sig = Signature::scan(&HiddenComplexity::default()).unwrap();
    let seeded = {
        let mut r = HiddenComplexity::default();
        r.count = 12;
        r
    };
    let decoded = sig.decode(&seeded, &QueryValues::new());
    // `count` is a scalar, so it is required.
    assert!(decoded.is_err());

    let sig = Signature::scan(&Sample3::default()).unwrap();
    let seeded = Sample3 {
        multiple: vec![true, false, true],
    };
    assert_eq!(sig.decode(&seeded, &QueryValues::new()).unwrap(), seeded);
}

#[test]
fn skipped_and_restricted_fields_come_from_the_default() {
    let sig = Signature::scan(&HiddenComplexity::default()).unwrap();
    let mut target = HiddenComplexity::default();
    target.scratch = vec![Point { x: 1.0, y: 1.0 }];
    target.origin = Point { x: 2.0, y: 2.0 };

    decode("count=3&scratch=ignored&origin=ignored", &sig, &mut target).unwrap();
    assert_eq!(target.count, 3);
    assert!(target.scratch.is_empty());
    assert_eq!(target.origin, Point::default());
}

#[test]
fn wrong_target_type() {
    let sig = AnySignature::new(Signature::scan(&Sample1::with_ignore("true")).unwrap());
    let values = QueryValues::parse("singleton=1").unwrap();

    let mut copy = Sample2::default();
    let err = sig.decode_values(&values, &mut copy).unwrap_err();
    match err {
        DecodeError::TypeMismatch { expected, found } => {
            assert!(expected.ends_with("Sample1"));
            assert!(found.ends_with("Sample2"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(copy, Sample2::default());

    let mut right = Sample1::default();
    sig.decode_values(&values, &mut right).unwrap();
    assert_eq!(right.singleton, 1);
    assert_eq!(right.ignore(), "true");
}

#[test]
fn signature_is_shared_across_threads() {
    let sig = std::sync::Arc::new(Signature::scan(&Sample7::default()).unwrap());
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let sig = sig.clone();
            std::thread::spawn(move || {
                let query = format!(
                    "int={i}&int8={i}&int16=0&int32=0&int64=0&uint=0&uint8={i}&uint16=0&uint32=0&uint64=0"
                );
                let mut copy = Sample7::default();
                decode(&query, &sig, &mut copy).map(|()| copy)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let copy = handle.join().unwrap().unwrap();
        assert_eq!(copy.int8, i as i8);
        assert_eq!(copy.uint8, i as u8);
    }
}
