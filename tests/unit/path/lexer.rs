use super::*;

#[test]
fn numbers_split_on_sign_and_second_dot() {
    let mut s = Scanner::new("10-5.5.5e2,+3");
    assert_eq!(s.number().unwrap(), 10.0);
    assert_eq!(s.number().unwrap(), -5.5);
    assert_eq!(s.number().unwrap(), 50.0);
    assert_eq!(s.number().unwrap(), 3.0);
    assert!(s.at_end());
}

#[test]
fn exponent_requires_digits() {
    let mut s = Scanner::new("1e");
    let err = s.number().unwrap_err();
    assert_eq!(err.offset, 1);
}

#[test]
fn overflowing_number_is_rejected() {
    let mut s = Scanner::new("1e400");
    assert!(s.number().is_err());
}

#[test]
fn packed_arc_flags_are_split() {
    let mut s = Scanner::new("1150");
    assert!(s.flag().unwrap());
    assert!(s.flag().unwrap());
    assert_eq!(s.number().unwrap(), 50.0);
}

#[test]
fn command_letters_exclude_exponent_marker() {
    let mut s = Scanner::new(" M e");
    assert_eq!(s.command(), Some(b'M'));
    assert_eq!(s.command(), None);
    assert!(!s.has_number());
}

#[test]
fn has_number_accepts_leading_dot() {
    let mut s = Scanner::new(".5");
    assert!(s.has_number());
    assert_eq!(s.number().unwrap(), 0.5);

    let mut s = Scanner::new(". 5");
    assert!(!s.has_number());
}
