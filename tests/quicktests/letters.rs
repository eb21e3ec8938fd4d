use iterbst::letter_count;

#[quickcheck]
fn counts_add_up_to_input_length(input: String) -> bool {
    let counts = letter_count(&input);
    let total: i32 = counts.iter().map(|(_, count)| *count).sum();

    total as usize == input.chars().count()
}

#[quickcheck]
fn only_known_keys(input: String) -> bool {
    letter_count(&input)
        .iter()
        .all(|(key, _)| key.is_ascii_lowercase() || *key == ' ' || *key == '_')
}

#[test]
fn mixed_input() {
    let counts = letter_count("abBccc_ 123 *");
    let pairs: Vec<_> = counts.iter().map(|(k, v)| (*k, *v)).collect();

    assert_eq!(pairs, [(' ', 2), ('_', 5), ('a', 1), ('b', 2), ('c', 3)]);
}
