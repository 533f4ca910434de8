//! Properties of the message formatter.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proven_log::{Arg, MessageFormatter, format};

fn literal() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 :,._-]{0,8}"
}

/// Template with `k` sequential placeholders and the literals between them.
fn template(k: usize) -> impl Strategy<Value = (String, Vec<String>)> {
    prop::collection::vec(literal(), k + 1).prop_map(move |parts| {
        let template = parts.join("%s");
        (template, parts)
    })
}

proptest! {
    #[test]
    fn too_few_arguments_leave_template_unchanged(
        (k, (template, _parts), supplied) in (1usize..6)
            .prop_flat_map(|k| (Just(k), template(k), 0..k))
    ) {
        let args: Vec<Arg> = (0..supplied).map(|i| Arg::Int(i as i128)).collect();
        prop_assert!(args.len() < k);
        prop_assert_eq!(format(&template, &args), template);
    }

    #[test]
    fn enough_arguments_substitute_the_first_k(
        (k, (template, parts), extra) in (0usize..6)
            .prop_flat_map(|k| (Just(k), template(k), 0usize..4))
    ) {
        let args: Vec<Arg> = (0..k + extra).map(|i| Arg::Int(i as i128)).collect();

        let mut expected = parts[0].clone();
        for (i, part) in parts.iter().enumerate().skip(1) {
            expected.push_str(&(i - 1).to_string());
            expected.push_str(part);
        }

        if args.is_empty() {
            prop_assert_eq!(format(&template, &args), template);
        } else {
            prop_assert_eq!(format(&template, &args), expected);
        }
    }

    #[test]
    fn zero_arguments_is_identity(text in ".*") {
        prop_assert_eq!(MessageFormatter::new(&text).into_text(), text);
    }

    #[test]
    fn formatting_never_panics(text in ".*", n in 0usize..4) {
        let args: Vec<Arg> = (0..n).map(|i| Arg::Text(i.to_string())).collect();
        let _ = format(&text, &args);
    }
}

#[test]
fn sequence_rendering() {
    assert_eq!(proven_log::txt!("text: %s", vec![1, 2, 3]), "text: 1,2,3");
}

#[test]
fn mapping_rendering_keeps_insertion_order() {
    let mut map = indexmap::IndexMap::new();
    map.insert("1", 1);
    map.insert("2", 2);
    assert_eq!(proven_log::txt!("text: %s", map), "text: 1:1,2:2");
}

#[test]
fn positional_placeholders_ignore_extra_arguments() {
    assert_eq!(
        proven_log::txt!("%2%/%1%", "a", "b", "c"),
        "b/a"
    );
}
