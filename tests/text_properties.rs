use proptest::prelude::*;

use razb_ui::text::html_encode_attribute;
use razb_ui::{format, format_single_pass, html_decode, html_encode};

proptest! {
    #[test]
    fn encode_decode_round_trip(s in ".*") {
        prop_assert_eq!(html_decode(&html_encode(&s)), s);
    }

    #[test]
    fn attribute_encode_decode_round_trip(s in ".*") {
        prop_assert_eq!(html_decode(&html_encode_attribute(&s)), s);
    }

    #[test]
    fn encoded_text_has_no_markup(s in ".*") {
        let encoded = html_encode(&s);
        prop_assert!(!encoded.contains('<'));
        prop_assert!(!encoded.contains('>'));
    }

    #[test]
    fn format_without_args_is_identity(s in ".*") {
        prop_assert_eq!(format(&s, &[]), s.clone());
        prop_assert_eq!(format_single_pass(&s, &[]), s);
    }

    #[test]
    fn plain_args_agree_between_modes(a in "[a-z0-9 ]*", b in "[a-z0-9 ]*") {
        let template = "{1}:{0}:{1}:{2}";
        prop_assert_eq!(format(template, &[&a, &b]), format_single_pass(template, &[&a, &b]));
    }
}

#[test]
fn test_reference_examples() {
    assert_eq!(format("{0}-{1}", &[&"a", &"b"]), "a-b");
    assert_eq!(format("{0}", &[]), "{0}");
    assert_eq!(format("{1}{0}", &[&"x", &"y"]), "yx");
    assert_eq!(html_encode("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
}

#[test]
fn test_is_function() {
    use razb_ui::model::value::HostFn;
    use razb_ui::{HostValue, is_function};

    let callable: HostValue = HostFn::new("f", |_, _| Ok(HostValue::Undefined)).into();
    assert!(is_function(&callable));
    assert!(!is_function(&HostValue::from(42_i64)));
    assert!(!is_function(&HostValue::from("text")));
}
