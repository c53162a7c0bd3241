use super::*;
use crate::RestliValue;
use serde_json::{Value, json};

fn encode_example() -> Value {
    json!({
        "k1": "v1",
        "k2": "value with spaces",
        "k3": [1, 2, 3],
        "k4": "List(value:with%reserved,chars,'')",
        "k5": {"k51": "v51", "k52": "v52"},
        "k6": ["(v1,2)", "(v2,2)"],
        "dangerous('),:key:": "value",
        "emptystring": "",
        "querystringbreaker1": "?key=value",
        "querystringbreaker2": "&key=value&",
        "boom": null,
        "true": true,
        "false": false,
        "multibyte": "株式会社",
        "株式会社": "multibytekey",
        "": "emptystringkey",
        "emptyList": [],
        "emptyListString": [""]
    })
}

fn decode_example() -> Value {
    json!({
        "k1": "v1",
        "k2": "value with spaces",
        "k3": [1, 2, 3],
        "k4": "List(value:with%reserved,chars,'')",
        "k5": {"k51": "v51", "k52": "v52"},
        "dangerous('),:key:": "value",
        "emptystring": "",
        "emptyList": [],
        "emptyListString": [""],
        "querystri\"ngbreaker1": "?key=value",
        "querystringbreaker2": "&key=value&",
        "boom": null,
        "true": true,
        "false": false,
        "multibyte": "株式会社",
        "株式会社": "multibytekey",
        "": "emptystringkey"
    })
}

/// `decode_example` with every leaf as the string the decoder returns.
fn string_coerced_example() -> Value {
    json!({
        "k1": "v1",
        "k2": "value with spaces",
        "k3": ["1", "2", "3"],
        "k4": "List(value:with%reserved,chars,'')",
        "k5": {"k51": "v51", "k52": "v52"},
        "dangerous('),:key:": "value",
        "emptystring": "",
        "emptyList": [],
        "emptyListString": [""],
        "querystri\"ngbreaker1": "?key=value",
        "querystringbreaker2": "&key=value&",
        "boom": "null",
        "true": "true",
        "false": "false",
        "multibyte": "株式会社",
        "株式会社": "multibytekey",
        "": "emptystringkey"
    })
}

fn value(v: Value) -> RestliValue {
    RestliValue::from(v)
}

fn decoded_json(map: &indexmap::IndexMap<String, DecodedValue>) -> Value {
    Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

// ============================================================================
// ENCODE
// ============================================================================

#[test]
fn test_encode_full_example() {
    assert_eq!(
        encode(&value(encode_example())),
        "(k1:v1,k2:value%20with%20spaces,k3:List(1,2,3),\
         k4:List%28value%3Awith%25reserved%2Cchars%2C%27%27%29,k5:(k51:v51,k52:v52),\
         k6:List(%28v1%2C2%29,%28v2%2C2%29),dangerous%28%27%29%2C%3Akey%3A:value,\
         emptystring:'',querystringbreaker1:%3Fkey%3Dvalue,\
         querystringbreaker2:%26key%3Dvalue%26,boom:null,true:true,false:false,\
         multibyte:%E6%A0%AA%E5%BC%8F%E4%BC%9A%E7%A4%BE,\
         %E6%A0%AA%E5%BC%8F%E4%BC%9A%E7%A4%BE:multibytekey,'':emptystringkey,\
         emptyList:List(),emptyListString:List(''))"
    );
}

#[test]
fn test_encode_reduced_example() {
    assert_eq!(
        reduced_encode(&value(encode_example())),
        "(k1:v1,k2:value with spaces,k3:List(1,2,3),\
         k4:List%28value%3Awith%reserved%2Cchars%2C%27%27%29,k5:(k51:v51,k52:v52),\
         k6:List(%28v1%2C2%29,%28v2%2C2%29),dangerous%28%27%29%2C%3Akey%3A:value,\
         emptystring:'',querystringbreaker1:?key=value,querystringbreaker2:&key=value&,\
         boom:null,true:true,false:false,multibyte:株式会社,株式会社:multibytekey,\
         '':emptystringkey,emptyList:List(),emptyListString:List(''))"
    );
}

#[test]
fn test_param_encode_example() {
    assert_eq!(
        param_encode(&value(encode_example())).unwrap(),
        "k1=v1&k2=value%20with%20spaces&k3=List(1,2,3)&\
         k4=List%28value%3Awith%25reserved%2Cchars%2C%27%27%29&k5=(k51:v51,k52:v52)&\
         k6=List(%28v1%2C2%29,%28v2%2C2%29)&dangerous%28%27%29%2C%3Akey%3A=value&\
         emptystring=''&querystringbreaker1=%3Fkey%3Dvalue&\
         querystringbreaker2=%26key%3Dvalue%26&boom=null&true=true&false=false&\
         multibyte=%E6%A0%AA%E5%BC%8F%E4%BC%9A%E7%A4%BE&\
         %E6%A0%AA%E5%BC%8F%E4%BC%9A%E7%A4%BE=multibytekey&''=emptystringkey&\
         emptyList=List()&emptyListString=List('')"
    );
}

#[test]
fn test_param_encode_rejects_non_objects() {
    assert_eq!(
        param_encode(&value(json!([]))),
        Err(EncodeError::NotAnObject { found: "list" })
    );
    assert_eq!(
        param_encode(&value(json!("2024-01-01T00:00:00Z"))),
        Err(EncodeError::NotAnObject { found: "string" })
    );
    assert!(
        encode_query_params_for_get_requests(&value(json!(5))).is_err()
    );
}

#[test]
fn test_param_encode_null_and_empty() {
    assert_eq!(param_encode(&RestliValue::null()).unwrap(), "");
    assert_eq!(param_encode(&RestliValue::object()).unwrap(), "");
}

#[test]
fn test_encode_scalars() {
    assert_eq!(encode(&value(json!(null))), "null");
    assert_eq!(encode(&value(json!(true))), "true");
    assert_eq!(encode(&value(json!(-12))), "-12");
    assert_eq!(encode(&value(json!(2.5))), "2.5");
    assert_eq!(encode(&value(json!(""))), "''");
    assert_eq!(reduced_encode(&value(json!(""))), "''");
}

#[test]
fn test_encode_large_numbers_without_exponent() {
    assert_eq!(encode(&value(json!(1e21))), "1000000000000000000000");
    assert_eq!(encode(&value(json!(-0.000_001))), "-0.000001");
    assert_eq!(encode(&value(json!(u64::MAX))), "18446744073709551615");
}

#[test]
fn test_encode_compound_key() {
    let key = value(json!({
        "member": "urn:li:person:123",
        "account": "urn:li:account:234"
    }));
    insta::assert_snapshot!(
        encode(&key),
        @"(member:urn%3Ali%3Aperson%3A123,account:urn%3Ali%3Aaccount%3A234)"
    );
    insta::assert_snapshot!(
        reduced_encode(&key),
        @"(member:urn%3Ali%3Aperson%3A123,account:urn%3Ali%3Aaccount%3A234)"
    );
}

#[test]
fn test_get_request_params_move_fields_last() {
    let params = value(json!({
        "fields": "id,firstName,lastName",
        "otherParam": [1, 2, 3]
    }));
    assert_eq!(
        encode_query_params_for_get_requests(&params).unwrap(),
        "otherParam=List(1,2,3)&fields=id,firstName,lastName"
    );
}

#[test]
fn test_get_request_fields_list_is_joined() {
    let params = value(json!({"fields": ["id", "name"], "q": "x"}));
    assert_eq!(
        encode_query_params_for_get_requests(&params).unwrap(),
        "q=x&fields=id,name"
    );
}

#[test]
fn test_get_request_params_without_fields() {
    let params = value(json!({"a": "b c"}));
    assert_eq!(
        encode_query_params_for_get_requests(&params).unwrap(),
        param_encode(&params).unwrap()
    );
}

// ============================================================================
// DECODE
// ============================================================================

#[test]
fn test_decode_cases() {
    let cases = [
        ("List(1,2,(k:v),3)", json!(["1", "2", {"k": "v"}, "3"])),
        ("List(List(1))", json!([["1"]])),
        ("List((k:List(1)))", json!([{"k": ["1"]}])),
        ("List(%28v1%2C2%29,%28v2%2C2%29)", json!(["(v1,2)", "(v2,2)"])),
        ("", json!("")),
        ("List('')", json!([""])),
        ("List()", json!([])),
        (
            "(k1:v1,k2:List(1,2,3),k3:v3)",
            json!({"k1": "v1", "k2": ["1", "2", "3"], "k3": "v3"}),
        ),
        ("(k1:List())", json!({"k1": []})),
        ("()", json!({})),
        ("(k:)", json!({"k": ""})),
    ];
    for (input, expected) in cases {
        assert_eq!(decode(input).unwrap().to_json(), expected, "input: {input}");
    }
}

#[test]
fn test_decode_full_example() {
    let encoded = encode(&value(decode_example()));
    assert_eq!(
        decode(&encoded).unwrap().to_json(),
        string_coerced_example()
    );
}

#[test]
fn test_reduced_decode_example() {
    let encoded = reduced_encode(&value(decode_example()));
    assert_eq!(
        reduced_decode(&encoded).unwrap().to_json(),
        string_coerced_example()
    );
}

#[test]
fn test_decode_unbalanced() {
    for input in [
        "List((k1:v1)",
        "List((k1:List(v1))",
        "(k1:List((k2:(k3:v1,k4:List((string:v2)))))",
        "List(",
        "(",
        "(a:b",
    ] {
        assert!(
            matches!(decode(input), Err(DecodeError::UnbalancedBrackets { .. })),
            "expected unbalanced error for {input}"
        );
    }
}

#[test]
fn test_decode_missing_separator() {
    assert!(matches!(
        decode("(novalue)"),
        Err(DecodeError::MissingKeySeparator { .. })
    ));
    assert!(matches!(
        decode("(a:b,c)"),
        Err(DecodeError::MissingKeySeparator { .. })
    ));
}

#[test]
fn test_decode_error_message() {
    let err = decode("List((k1:v1)").unwrap_err();
    assert!(
        err.to_string()
            .starts_with("input has unbalanced prefix and suffix")
    );
}

#[test]
fn test_decode_literal_quote_pair() {
    let encoded = encode(&value(json!("''")));
    assert_eq!(encoded, "%27%27");
    assert_eq!(decode(&encoded).unwrap(), DecodedValue::from("''"));
}

#[test]
fn test_decoded_accessors() {
    let decoded = decode("(a:List(x),b:y)").unwrap();
    assert_eq!(decoded.get("b").and_then(DecodedValue::as_str), Some("y"));
    assert_eq!(
        decoded
            .get("a")
            .and_then(DecodedValue::as_list)
            .map(<[_]>::len),
        Some(1)
    );
    assert!(decoded.as_str().is_none());
    assert!(decoded.get("missing").is_none());
}

// ============================================================================
// PARAM DECODE
// ============================================================================

#[test]
fn test_param_decode_round_trip_example() {
    let encoded = param_encode(&value(decode_example())).unwrap();
    assert_eq!(
        decoded_json(&param_decode(&encoded).unwrap()),
        string_coerced_example()
    );
}

#[test]
fn test_param_decode_empty_map() {
    let encoded = param_encode(&RestliValue::object()).unwrap();
    assert!(param_decode(&encoded).unwrap().is_empty());
}

#[test]
fn test_param_decode_empty_key() {
    assert_eq!(
        decoded_json(&param_decode("''=foo").unwrap()),
        json!({"": "foo"})
    );
}

#[test]
fn test_param_decode_skips_nameless() {
    assert!(param_decode("=foo").unwrap().is_empty());
    assert!(param_decode("&&").unwrap().is_empty());
}

#[test]
fn test_param_decode_key_without_value() {
    assert_eq!(
        decoded_json(&param_decode("foo=").unwrap()),
        json!({"foo": ""})
    );
    assert_eq!(
        decoded_json(&param_decode("foo").unwrap()),
        json!({"foo": ""})
    );
}

#[test]
fn test_param_decode_later_duplicate_wins() {
    assert_eq!(
        decoded_json(&param_decode("a=1&a=2").unwrap()),
        json!({"a": "2"})
    );
}
