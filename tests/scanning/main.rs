#[cfg(test)]
mod verify {
    use proptest::prelude::*;

    use turbolisp::scanning::{scan, StreamTokenizer, TextRange, TokenKind, Tokenizer};

    fn kinds(text: &str) -> Vec<TokenKind> {
        scan(text, TextRange::whole(text))
            .iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn definition_with_comment() {
        let text = "(defun foo \"bar\" ; comment\n)";
        assert_eq!(
            kinds(text),
            vec![
                TokenKind::Paren,
                TokenKind::SpecialForm,
                TokenKind::Symbol,
                TokenKind::String,
                TokenKind::LineComment,
                TokenKind::Paren,
            ]
        );

        let tokens = scan(text, TextRange::whole(text));
        let texts: Vec<&str> = tokens
            .iter()
            .map(|token| token.text(text))
            .collect();
        assert_eq!(
            texts,
            vec!["(", "defun", "foo", "\"bar\"", "; comment", ")"]
        );
    }

    #[test]
    fn atom_classification() {
        assert_eq!(
            kinds("(LET :key 1/2 #xff x)"),
            vec![
                TokenKind::Paren,
                TokenKind::SpecialForm,
                TokenKind::Keyword,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::Symbol,
                TokenKind::Paren,
            ]
        );
    }

    #[test]
    fn parens_inside_strings_and_comments() {
        assert_eq!(
            kinds("\"(\" ; )\n#| ( #| ) |# ) |#"),
            vec![
                TokenKind::String,
                TokenKind::LineComment,
                TokenKind::BlockComment,
            ]
        );
    }

    #[test]
    fn only_comments() {
        assert_eq!(kinds("; one\n; two"), vec![TokenKind::LineComment, TokenKind::LineComment]);
        assert!(kinds("   \n\t ").is_empty());
        assert!(kinds("").is_empty());
    }

    #[test]
    fn stream_agrees_with_scan() {
        let text = "(defun f (x) ; note\n  (list \"s\" 'x #| c |# 2))";
        let spans = scan(text, TextRange::whole(text));

        let mut tokenizer = StreamTokenizer::new();
        tokenizer.reset(text);

        let mut streamed = Vec::new();
        while let Some(token) = tokenizer.next_token() {
            streamed.push((token.offset, token.length));
        }

        let scanned: Vec<(usize, usize)> = spans
            .iter()
            .map(|span| (span.offset, span.length))
            .collect();
        assert_eq!(streamed, scanned);
    }

    fn lisp_text() -> impl Strategy<Value = String> {
        let punctuation = proptest::sample::select(vec![
            "(", ")", " ", "\n", "'", "`", ",@", "\"", "\\", ";", "#|", "|#", "λ",
        ])
        .prop_map(str::to_string);
        let piece = prop_oneof![punctuation, "[a-z0-9:#*+-]{1,6}"];
        proptest::collection::vec(piece, 0..40).prop_map(|pieces| pieces.concat())
    }

    proptest! {
        #[test]
        fn spans_are_ordered_and_disjoint(text in lisp_text(), a in 0usize..200, b in 0usize..200) {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            let tokens = scan(&text, TextRange::new(start, end));

            for pair in tokens.windows(2) {
                prop_assert!(pair[0].end() <= pair[1].offset);
            }
            for token in &tokens {
                prop_assert!(token.length > 0);
                prop_assert!(token.end() <= text.len());
                prop_assert!(text.is_char_boundary(token.offset));
                prop_assert!(text.is_char_boundary(token.end()));
            }
        }
    }
}
