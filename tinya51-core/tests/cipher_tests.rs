#![allow(missing_docs)]
use tinya51_core::cipher::TinyA51;
use tinya51_core::codec;
use tinya51_core::error::CipherError;
use tinya51_core::key_generator;
use tinya51_core::register::RegisterSnapshot;

const KEY: &str = "10010101001110100110000";

#[test]
fn test_reference_scenario_with_trace() {
    let mut cipher = TinyA51::new(KEY).unwrap();
    let result = cipher.transform("111", true).unwrap();

    assert_eq!(result.output, "010");
    assert_eq!(
        result.initial_state,
        Some(RegisterSnapshot {
            x: [1, 0, 0, 1, 0, 1],
            y: [0, 1, 0, 0, 1, 1, 1, 0],
            z: [1, 0, 0, 1, 1, 0, 0, 0, 0],
        })
    );

    let steps = result.steps.unwrap();
    assert_eq!(steps.len(), 3);

    let first = &steps[0];
    assert_eq!((first.x2, first.y7, first.z8, first.majority), (0, 0, 0, 0));
    assert!(first.rotate_x && first.rotate_y && first.rotate_z);
    assert_eq!(first.x_after, [0, 1, 0, 0, 1, 0]);
    assert_eq!(first.y_after, [1, 0, 1, 0, 0, 1, 1, 1]);
    assert_eq!(first.z_after, [1, 1, 0, 0, 1, 1, 0, 0, 0]);
    assert_eq!((first.keystream_bit, first.data_bit, first.cipher_bit), (1, 1, 0));

    let second = &steps[1];
    assert_eq!((second.x2, second.y7, second.z8, second.majority), (0, 1, 0, 0));
    assert_eq!(
        (second.rotate_x, second.rotate_y, second.rotate_z),
        (true, false, true)
    );
    assert_eq!(second.y_before, second.y_after);
    assert_eq!(second.keystream_bit, 0);

    let third = &steps[2];
    assert_eq!((third.x2, third.y7, third.z8, third.majority), (1, 1, 0, 1));
    assert_eq!(
        (third.rotate_x, third.rotate_y, third.rotate_z),
        (true, true, false)
    );
    assert_eq!(third.x_after, [1, 1, 0, 1, 0, 0]);
    assert_eq!(third.cipher_bit, 0);

    for (index, step) in steps.iter().enumerate() {
        assert_eq!(step.step, index);
        assert_eq!(step.cipher_bit, step.data_bit ^ step.keystream_bit);
    }
    for pair in steps.windows(2) {
        assert_eq!(pair[0].after(), pair[1].before());
    }
}

#[test]
fn test_reference_outputs() {
    let mut cipher = TinyA51::new(KEY).unwrap();
    let cases = [
        ("0", "1"),
        ("1", "0"),
        ("000000", "101100"),
        ("101100111000101", "000000010011100"),
        (
            "111111111111111111111111111111",
            "010011010100110000010010110010",
        ),
    ];
    for (input, expected) in cases {
        assert_eq!(cipher.transform(input, false).unwrap().output, expected, "input {input}");
    }
}

#[test]
fn test_other_keys() {
    let mut ones = TinyA51::new(&"1".repeat(23)).unwrap();
    assert_eq!(ones.transform("000000000", false).unwrap().output, "111111100");

    let mut zeros = TinyA51::new(&"0".repeat(23)).unwrap();
    assert_eq!(zeros.transform("111111", false).unwrap().output, "111111");
}

#[test]
fn test_transform_is_self_inverse() {
    let data = [
        "",
        "0",
        "1",
        "0110",
        "111000111000111",
        "1010101010101010101010101010101010101010101010101",
    ];
    for _ in 0..8 {
        let key = key_generator::generate_key().unwrap().to_string();
        let mut cipher = TinyA51::new(&key).unwrap();
        for plaintext in data {
            let ciphertext = cipher.transform(plaintext, false).unwrap().output;
            assert_eq!(ciphertext.len(), plaintext.len());
            let recovered = cipher.transform(&ciphertext, false).unwrap().output;
            assert_eq!(recovered, plaintext, "key {key}");
        }
    }
}

#[test]
fn test_repeated_calls_are_deterministic() {
    let data = "1100101011110000101";
    let mut reused = TinyA51::new(KEY).unwrap();
    let first = reused.transform(data, true).unwrap();
    let second = reused.transform(data, true).unwrap();
    let fresh = TinyA51::new(KEY).unwrap().transform(data, true).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, fresh);
}

#[test]
fn test_trace_does_not_change_output() {
    let data = "0001110101";
    let mut cipher = TinyA51::new(KEY).unwrap();
    let traced = cipher.transform(data, true).unwrap();
    let plain = cipher.transform(data, false).unwrap();
    assert_eq!(traced.output, plain.output);
    assert!(plain.steps.is_none());
    assert!(plain.initial_state.is_none());
}

#[test]
fn test_empty_input() {
    let mut cipher = TinyA51::new(KEY).unwrap();
    let before = cipher.register_state();
    let result = cipher.transform("", true).unwrap();
    assert_eq!(result.output, "");
    assert_eq!(result.steps, Some(vec![]));
    assert_eq!(result.initial_state, before);
    assert_eq!(cipher.register_state(), before);
}

#[test]
fn test_invalid_inputs() {
    assert!(matches!(
        TinyA51::new("1001010100111010011000"),
        Err(CipherError::KeyFormat(_))
    ));
    let mut cipher = TinyA51::new(KEY).unwrap();
    assert!(matches!(
        cipher.transform("0101H", false),
        Err(CipherError::DataFormat { character: 'H', position: 4 })
    ));
}

#[test]
fn test_symbol_round_trip_through_cipher() {
    let mut cipher = TinyA51::new(KEY).unwrap();
    let bits = codec::encode("head").unwrap();
    let encrypted = cipher.transform(&bits, false).unwrap().output;
    assert_eq!(codec::decode(&encrypted).unwrap(), "CAFA");

    let decrypted = cipher.transform(&encrypted, false).unwrap().output;
    assert_eq!(codec::decode(&decrypted).unwrap(), "HEAD");
}

#[test]
fn test_trace_serializes_with_visualizer_field_names() {
    let mut cipher = TinyA51::new(KEY).unwrap();
    let result = cipher.transform("1", true).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    let step = &json["steps"][0];
    assert_eq!(step["step"], 0);
    assert_eq!(step["rotate_X"], true);
    assert_eq!(step["X_before"], serde_json::json!([1, 0, 0, 1, 0, 1]));
    assert_eq!(step["keystream_bit"], 1);
    assert_eq!(step["cipher_bit"], 0);
    assert_eq!(json["initial_state"]["Y"], serde_json::json!([0, 1, 0, 0, 1, 1, 1, 0]));

    let plain = serde_json::to_value(cipher.transform("1", false).unwrap()).unwrap();
    assert!(plain.get("steps").is_none());
}
