#[cfg(test)]
mod verify {
    use proptest::prelude::*;

    use turbolisp::parsing::{parse, parse_all, Expr, ParsingError};

    #[test]
    fn reading_a_definition() {
        let text = r#"
; leading comment
(defun greet (name)
  "Say hello to NAME."
  (format t "hello ~a~%" name))
"#;
        let expr = parse(text).unwrap();

        assert_eq!(expr.head(), Some("defun"));
        match &expr {
            Expr::List(items) => {
                assert_eq!(items.len(), 5);
                assert_eq!(items[3], Expr::string("Say hello to NAME."));
            }
            _ => panic!("expected a list"),
        }
    }

    #[test]
    fn reader_errors() {
        assert_eq!(parse("(a (b c)"), Err(ParsingError::UnexpectedEndOfInput(8)));
        assert_eq!(parse_all("(a) b)"), Err(ParsingError::UnmatchedCloseParen(5)));
        assert_eq!(
            parse("(a #| unterminated"),
            Err(ParsingError::UnexpectedEndOfInput(18))
        );
    }

    #[test]
    fn printing_round_trips() {
        let text = r#"(a "b \"c\" \\" (d ()))"#;
        let expr = parse(text).unwrap();
        assert_eq!(expr.to_string(), text);
    }

    fn value() -> impl Strategy<Value = Expr> {
        let leaf = prop_oneof![
            "[a-z*+!?<>=-][a-z0-9*+!?<>=-]{0,7}".prop_map(Expr::Symbol),
            "[a-zA-Z0-9 ()\";\\\\|#'`,@]{0,10}".prop_map(Expr::String),
        ];
        leaf.prop_recursive(3, 32, 5, |inner| {
            proptest::collection::vec(inner, 0..5).prop_map(Expr::List)
        })
    }

    proptest! {
        #[test]
        fn parse_inverts_print(v in value()) {
            let printed = v.to_string();
            prop_assert_eq!(parse(&printed), Ok(v));
        }

        #[test]
        fn parse_all_reads_every_form(vs in proptest::collection::vec(value(), 0..4)) {
            let printed = vs
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            prop_assert_eq!(parse_all(&printed), Ok(vs));
        }
    }
}
