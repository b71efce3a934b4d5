// 电话号码掩码的公开 API 行为
use group_ride::phone::{format_with_mask, MaskPattern, PhoneField, DEFAULT_PHONE_MASK};

#[test]
fn test_full_us_number() {
    assert_eq!(
        format_with_mask(DEFAULT_PHONE_MASK, "5551234567"),
        "(555) 123-4567"
    );
}

#[test]
fn test_pasted_number_with_punctuation() {
    assert_eq!(
        format_with_mask(DEFAULT_PHONE_MASK, "+1 (555) 123-4567 ext"),
        "(155) 512-3456"
    );
}

#[test]
fn test_partial_input_drops_trailing_literals() {
    assert_eq!(format_with_mask(DEFAULT_PHONE_MASK, "1"), "(1");
    assert_eq!(format_with_mask(DEFAULT_PHONE_MASK, "555"), "(555");
    assert_eq!(format_with_mask(DEFAULT_PHONE_MASK, "5551"), "(555) 1");
    assert_eq!(format_with_mask(DEFAULT_PHONE_MASK, ""), "");
}

#[test]
fn test_typing_sequence_in_field() {
    let mut field = PhoneField::new(MaskPattern::default());
    let mut edits = Vec::new();

    for digit in "5551234567".chars() {
        let typed = format!("{}{}", field.text(), digit);
        edits.push(field.on_text_changed(&typed));
    }

    let last = edits.last().expect("at least one edit");
    assert_eq!(last.text, "(555) 123-4567");
    assert!(last.end_editing);
    assert!(edits[..edits.len() - 1].iter().all(|edit| !edit.end_editing));
    assert!(field.is_complete());
}

#[test]
fn test_backspace_over_literal_keeps_digits() {
    let mut field = PhoneField::new(MaskPattern::default());
    field.on_text_changed("5551");
    // 删除空格后只剩 "(555)"，数字仍为 555
    let edit = field.on_text_changed("(555)");
    assert_eq!(edit.text, "(555");
    assert!(!edit.end_editing);
}
