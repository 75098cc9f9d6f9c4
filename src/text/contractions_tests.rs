use super::*;

#[test]
fn test_negations() {
    assert_eq!(expand_contractions("i don't know"), "i do not know");
    assert_eq!(expand_contractions("it isn't bad"), "it is not bad");
    assert_eq!(expand_contractions("we won't return"), "we will not return");
    assert_eq!(expand_contractions("you can't miss it"), "you cannot miss it");
}

#[test]
fn test_auxiliaries() {
    assert_eq!(expand_contractions("they're great"), "they are great");
    assert_eq!(expand_contractions("we'll see"), "we will see");
    assert_eq!(expand_contractions("i've been"), "i have been");
    assert_eq!(expand_contractions("i'm here"), "i am here");
    assert_eq!(expand_contractions("i'd go"), "i would go");
    assert_eq!(expand_contractions("it's fine"), "it is fine");
}

#[test]
fn test_curly_apostrophe() {
    assert_eq!(expand_contractions("don\u{2019}t"), "do not");
}

#[test]
fn test_possessive_left_alone() {
    assert_eq!(expand_contractions("joe's diner"), "joe's diner");
}

#[test]
fn test_no_apostrophe_passthrough() {
    assert_eq!(expand_contractions("plain text"), "plain text");
    assert_eq!(expand_contractions(""), "");
}
